//! Desktop preview app for reactive-glow
//!
//! Simulates the radar sensor with sliders and renders the strip in a window.
//! Readings go through the same channel and frame scheduler the firmware uses,
//! driven by a synthetic clock in fixed 10ms steps.

use std::time::{Instant as StdInstant, SystemTime, UNIX_EPOCH};

use eframe::egui::{self};
use reactive_glow::{
    Duration, GlowEffect, Instant, OutputDriver, ReactiveConfig, ReactiveRenderer, ReadingChannel,
    ReadingSender, Rgb, SensorReadings, SplitMix,
    frame_scheduler::{DEFAULT_FRAME_DURATION, FrameScheduler},
};

/// Number of LEDs in the simulated strip
const LED_COUNT: usize = 60;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Reading channel size
const READING_CHANNEL_SIZE: usize = 4;

/// Upper bound of engine ticks per UI repaint
const MAX_TICKS_PER_UPDATE: usize = 200;

/// Duration of master brightness changes
const BRIGHTNESS_FADE: Duration = Duration::from_millis(100);

/// Static reading channel between the simulated sensor and the renderer
static READINGS_CHANNEL: ReadingChannel<READING_CHANNEL_SIZE> =
    ReadingChannel::<READING_CHANNEL_SIZE>::new();

type PreviewScheduler =
    FrameScheduler<'static, FrameBuffer, GlowEffect<SplitMix>, LED_COUNT, READING_CHANNEL_SIZE>;

/// Output driver that keeps the last written frame for painting
struct FrameBuffer {
    pixels: [Rgb; LED_COUNT],
}

impl OutputDriver for FrameBuffer {
    fn write(&mut self, colors: &[Rgb]) {
        let len = colors.len().min(LED_COUNT);
        self.pixels[..len].copy_from_slice(&colors[..len]);
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("Reactive Glow Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "reactive-glow-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// Renderer wrapped in the frame scheduler
    scheduler: PreviewScheduler,
    /// Simulated sensor side of the reading channel
    reading_sender: ReadingSender<'static, READING_CHANNEL_SIZE>,

    /// Simulated sensor state
    readings: SensorReadings,
    /// Raise the hardware flags automatically when the value clears the floor
    auto_flags: bool,
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Deadline of the next engine tick
    next_tick_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Master brightness (0-255)
    brightness: u8,
    /// LED pixel size for display
    led_size: f32,
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0x5eed, |elapsed| {
            #[allow(clippy::cast_possible_truncation)]
            let nanos = elapsed.as_nanos() as u64;
            nanos
        })
}

impl PreviewApp {
    fn new() -> Self {
        let config = ReactiveConfig::default();
        let renderer = ReactiveRenderer::<_, LED_COUNT>::with_glow(&config, SplitMix::new(seed()));
        let scheduler = FrameScheduler::new(
            renderer,
            FrameBuffer {
                pixels: [Rgb::default(); LED_COUNT],
            },
            READINGS_CHANNEL.receiver(),
        );

        Self {
            scheduler,
            reading_sender: READINGS_CHANNEL.sender(),
            readings: SensorReadings::default(),
            auto_flags: true,
            t_ms: 0,
            next_tick_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            brightness: config.brightness,
            led_size: LED_SIZE,
        }
    }

    /// Publish the simulated sensor state
    fn send_readings(&mut self) {
        if self.auto_flags {
            let floor = ReactiveConfig::default().presence.min_value;
            self.readings.presence_flag = self.readings.presence.unsigned_abs() > floor;
            let floor = ReactiveConfig::default().motion.min_value;
            self.readings.motion_flag = self.readings.motion.unsigned_abs() > floor;
        }
        self.reading_sender.push_latest(self.readings);
    }

    /// Drop all engine state, as after a power cycle
    ///
    /// The synthetic clock keeps running so engine timestamps never go
    /// backwards.
    fn reset(&mut self) {
        self.scheduler.renderer_mut().reset();
    }

    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    /// Run every engine tick that is due by the synthetic clock
    fn run_ticks(&mut self) {
        for _ in 0..MAX_TICKS_PER_UPDATE {
            if self.next_tick_ms > self.t_ms {
                return;
            }
            self.scheduler.tick(Instant::from_millis(self.next_tick_ms));
            self.next_tick_ms += DEFAULT_FRAME_DURATION.as_millis();
        }
        // Too far behind, skip ahead like a stalled device would
        self.next_tick_ms = self.t_ms;
    }

    fn diagnostics(&self, ui: &mut egui::Ui) {
        let renderer = self.scheduler.renderer();
        let status = renderer.status();
        let params = renderer.parameters();
        let smoothed = renderer.mapper().smoothed();

        ui.label(format!(
            "Presence: detected={} intensity={} smoothed={:.1}",
            status.presence.detected, status.presence.intensity, smoothed.presence
        ));
        ui.label(format!(
            "Motion: detected={} intensity={} smoothed={:.1}",
            status.motion.detected, status.motion.intensity, smoothed.motion
        ));
        ui.label(format!(
            "Parameters: hue={} brightness={} speed={} spread={}",
            params.hue, params.brightness, params.speed, params.spread
        ));
        ui.label(format!(
            "Glow points: {}  transitioning: {}",
            renderer.effect().active_count(),
            renderer.is_transitioning()
        ));
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_ticks();
        let frame = self.scheduler.output().pixels;

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("⏮ Reset").clicked() {
                            self.reset();
                        }
                        if ui
                            .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                            .clicked()
                        {
                            self.toggle_playing();
                        }
                    });

                    ui.add_space(4.0);

                    let secs = self.t_ms / 1000;
                    let ms = self.t_ms % 1000;
                    ui.label(format!("Time: {secs}.{ms:03}s"));

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
                    });

                    ui.horizontal(|ui| {
                        ui.label("Size:");
                        ui.add(egui::Slider::new(&mut self.led_size, 4.0..=32.0));
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <SensorControls>
                ui.vertical(|ui| {
                    let old_readings = self.readings;
                    let old_auto_flags = self.auto_flags;

                    ui.horizontal(|ui| {
                        ui.label("Presence:");
                        ui.add(egui::Slider::new(&mut self.readings.presence, -2000..=2000));
                        ui.add_enabled(
                            !self.auto_flags,
                            egui::Checkbox::new(&mut self.readings.presence_flag, "flag"),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label("Motion:");
                        ui.add(egui::Slider::new(&mut self.readings.motion, -2000..=2000));
                        ui.add_enabled(
                            !self.auto_flags,
                            egui::Checkbox::new(&mut self.readings.motion_flag, "flag"),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut self.auto_flags, "Auto flags");
                        if ui.button("Clear").clicked() {
                            self.readings = SensorReadings::default();
                        }
                    });

                    if self.readings != old_readings || self.auto_flags != old_auto_flags {
                        self.send_readings();
                    }

                    ui.horizontal(|ui| {
                        ui.label("Brightness:");
                        let old_brightness = self.brightness;
                        ui.add(egui::DragValue::new(&mut self.brightness).range(0u8..=255u8));
                        if self.brightness != old_brightness {
                            let now = Instant::from_millis(self.t_ms);
                            self.scheduler.renderer_mut().set_brightness(
                                self.brightness,
                                BRIGHTNESS_FADE,
                                now,
                            );
                        }
                    });
                });
                // </SensorControls>
            });

            ui.add_space(16.0);
            self.diagnostics(ui);
            ui.add_space(16.0);

            // === LED Display ===
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = LED_COUNT.div_ceil(leds_per_row);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) =
                ui.allocate_painter(egui::vec2(available_width, height), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(self.led_size, self.led_size),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 3.0, color);
            }
        });
    }
}
