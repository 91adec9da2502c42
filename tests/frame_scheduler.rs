mod tests {
    use embassy_time::{Duration, Instant};
    use reactive_glow::channel::ReadingChannel;
    use reactive_glow::color::{BLACK, Rgb};
    use reactive_glow::config::ReactiveConfig;
    use reactive_glow::effect::GlowEffect;
    use reactive_glow::frame_scheduler::FrameScheduler;
    use reactive_glow::random::SplitMix;
    use reactive_glow::renderer::ReactiveRenderer;
    use reactive_glow::sensor::SensorReadings;
    use reactive_glow::OutputDriver;

    #[derive(Default)]
    struct MockDriver {
        writes: usize,
        last: [Rgb; 16],
    }

    impl OutputDriver for MockDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.writes += 1;
            self.last.copy_from_slice(colors);
        }
    }

    fn renderer() -> ReactiveRenderer<GlowEffect<SplitMix>, 16> {
        ReactiveRenderer::with_glow(&ReactiveConfig::default(), SplitMix::new(1))
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_deadlines_advance_by_frame_duration() {
        let readings: ReadingChannel<4> = ReadingChannel::new();
        let mut scheduler = FrameScheduler::new(renderer(), MockDriver::default(), readings.receiver());

        let first = scheduler.tick(at(0));
        assert_eq!(first.next_deadline, at(10));
        assert_eq!(first.sleep_duration, Duration::from_millis(10));

        let second = scheduler.tick(at(13));
        assert_eq!(second.next_deadline, at(20));
        assert_eq!(second.sleep_duration, Duration::from_millis(7));

        // Late but within the drift allowance: no sleep, keep the cadence
        let third = scheduler.tick(at(35));
        assert_eq!(third.next_deadline, at(30));
        assert_eq!(third.sleep_duration, Duration::from_millis(0));

        assert_eq!(scheduler.output().writes, 3);
    }

    #[test]
    fn test_long_stall_resets_schedule() {
        let readings: ReadingChannel<4> = ReadingChannel::new();
        let mut scheduler = FrameScheduler::new(renderer(), MockDriver::default(), readings.receiver());

        scheduler.tick(at(0));
        let result = scheduler.tick(at(1000));
        assert_eq!(result.next_deadline, at(1010));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
    }

    #[test]
    fn test_custom_frame_duration() {
        let readings: ReadingChannel<4> = ReadingChannel::new();
        let mut scheduler = FrameScheduler::with_frame_duration(
            renderer(),
            MockDriver::default(),
            readings.receiver(),
            Duration::from_millis(20),
        );

        assert_eq!(scheduler.tick(at(0)).next_deadline, at(20));
        assert_eq!(scheduler.tick(at(20)).next_deadline, at(40));
    }

    #[test]
    fn test_newest_reading_is_used_and_kept() {
        let readings: ReadingChannel<4> = ReadingChannel::new();
        let sender = readings.sender();
        let mut scheduler = FrameScheduler::new(renderer(), MockDriver::default(), readings.receiver());

        let stale = SensorReadings {
            presence: 100,
            presence_flag: true,
            ..SensorReadings::default()
        };
        let fresh = SensorReadings {
            presence: -500,
            presence_flag: true,
            ..SensorReadings::default()
        };
        sender.push_latest(stale);
        sender.push_latest(fresh);

        scheduler.tick(at(0));
        assert_eq!(scheduler.last_reading(), fresh);
        assert!(readings.is_empty());

        // No new reading: the last one keeps driving the debounce
        scheduler.tick(at(10));
        scheduler.tick(at(20));
        assert_eq!(scheduler.last_reading(), fresh);
        assert!(scheduler.renderer().status().presence.detected);
    }

    #[test]
    fn test_driver_receives_rendered_frame() {
        let readings: ReadingChannel<4> = ReadingChannel::new();
        let mut scheduler = FrameScheduler::new(renderer(), MockDriver::default(), readings.receiver());

        for tick in 0..500 {
            scheduler.tick(at(tick * 10));
            assert_eq!(&scheduler.output().last, scheduler.renderer().frame());
        }

        scheduler.renderer_mut().reset();
        assert!(scheduler.renderer().frame().iter().all(|led| *led == BLACK));
    }
}
