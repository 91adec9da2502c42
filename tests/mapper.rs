mod tests {
    use embassy_time::{Duration, Instant};
    use reactive_glow::config::{
        BRIGHTNESS_MIN, ConditionerConfig, HUE_COOL, HUE_NEUTRAL, MapperConfig, SPEED_MAX,
        SPEED_MIN,
    };
    use reactive_glow::mapper::{AnimationParameters, ParameterMapper, smooth};
    use reactive_glow::sensor::{SensorConditioner, SensorReadings};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn idle() -> AnimationParameters {
        AnimationParameters {
            hue: HUE_COOL,
            brightness: BRIGHTNESS_MIN + 20,
            speed: SPEED_MIN + 5,
            spread: 2,
        }
    }

    #[test]
    fn test_smoothing_lies_strictly_between() {
        for alpha in [0.05f32, 0.3, 0.5, 0.95] {
            for (previous, new) in [(0.0f32, 255u8), (200.0, 10), (37.5, 38), (128.0, 0)] {
                let next = smooth(previous, new, alpha);
                let (low, high) = if previous < f32::from(new) {
                    (previous, f32::from(new))
                } else {
                    (f32::from(new), previous)
                };
                assert!(next > low && next < high, "{previous} -> {new} at {alpha}: {next}");
            }
        }
    }

    #[test]
    fn test_quiet_start_emits_nothing() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        assert_eq!(mapper.parameters(), idle());

        for tick in 0..200 {
            assert_eq!(mapper.update(false, false, 0, 0, at(tick * 10)), None);
        }
        assert_eq!(mapper.parameters(), idle());
    }

    #[test]
    fn test_first_detection_emits_immediately() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());

        let params = mapper.update(true, false, 138, 0, at(0));
        assert_eq!(
            params,
            Some(AnimationParameters {
                hue: HUE_COOL,
                brightness: 69,
                speed: SPEED_MIN,
                spread: 3,
            })
        );
        assert_eq!(mapper.parameters(), params.unwrap());
    }

    #[test]
    fn test_updates_are_rate_limited() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        assert!(mapper.update(true, false, 138, 0, at(0)).is_some());

        // Significant change, but only 100ms after the last one
        assert_eq!(mapper.update(true, false, 138, 0, at(100)), None);

        let later = mapper.update(true, false, 138, 0, at(300));
        assert!(later.is_some_and(|params| params.brightness > 69));
    }

    #[test]
    fn test_same_instant_never_emits_twice() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        assert!(mapper.update(true, true, 200, 200, at(500)).is_some());
        for _ in 0..10 {
            assert_eq!(mapper.update(true, true, 200, 200, at(500)), None);
        }
    }

    #[test]
    fn test_converged_input_stops_emitting() {
        let config = MapperConfig {
            min_update_interval: Duration::from_millis(0),
            ..MapperConfig::default()
        };
        let mut mapper = ParameterMapper::new(config);

        let mut emitted = 0;
        for tick in 0..100 {
            if mapper.update(true, false, 138, 0, at(tick)).is_some() {
                emitted += 1;
            }
        }
        assert!(emitted > 1);

        for tick in 100..120 {
            assert_eq!(mapper.update(true, false, 138, 0, at(tick)), None);
        }
        // Converged brightness is round(40 + 180 * 138 / 255) = 137
        assert!(mapper.parameters().brightness.abs_diff(137) <= 8);
    }

    #[test]
    fn test_strong_motion_turns_warm() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        for tick in 0..40 {
            mapper.update(false, true, 0, 255, at(tick * 300));
        }
        let params = mapper.parameters();
        assert!(params.hue <= 5, "hue {}", params.hue);
        assert!(params.speed >= SPEED_MAX - 5, "speed {}", params.speed);
    }

    #[test]
    fn test_strong_presence_turns_neutral() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        for tick in 0..40 {
            mapper.update(true, false, 255, 0, at(tick * 300));
        }
        let params = mapper.parameters();
        assert!((HUE_NEUTRAL..=HUE_NEUTRAL + 5).contains(&params.hue), "hue {}", params.hue);
        assert!(params.spread >= 7);
    }

    #[test]
    fn test_motion_takes_priority_over_presence() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        for tick in 0..40 {
            mapper.update(true, true, 255, 255, at(tick * 300));
        }
        assert!(mapper.parameters().hue <= 5);
    }

    #[test]
    fn test_weak_motion_keeps_cool_hue() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        for tick in 0..40 {
            mapper.update(false, true, 0, 100, at(tick * 300));
        }
        assert_eq!(mapper.parameters().hue, HUE_COOL);
    }

    #[test]
    fn test_idle_settles_and_ignores_jitter() {
        let mut sensors =
            SensorConditioner::new(ConditionerConfig::PRESENCE, ConditionerConfig::MOTION);
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        let mut now = 0;

        let active = SensorReadings {
            presence: -900,
            presence_flag: true,
            motion: 1500,
            motion_flag: true,
        };
        for _ in 0..300 {
            let status = sensors.update(active);
            mapper.update_from_status(&status, at(now));
            now += 10;
        }
        assert_ne!(mapper.parameters().hue, HUE_COOL);

        // Quiet for 1.5s
        for _ in 0..150 {
            let status = sensors.update(SensorReadings::default());
            mapper.update_from_status(&status, at(now));
            now += 10;
        }
        let settled = mapper.parameters();
        assert_eq!(settled.hue, idle().hue);
        assert_eq!(settled.brightness, idle().brightness);
        assert_eq!(settled.speed, idle().speed);

        // Sub-floor noise, sometimes with the hardware flag raised
        for tick in 0..100i16 {
            let jitter = SensorReadings {
                presence: (tick % 7) * 9 - 30,
                presence_flag: tick % 3 == 0,
                motion: 40 - (tick % 5) * 15,
                motion_flag: tick % 4 == 0,
            };
            let status = sensors.update(jitter);
            assert_eq!(mapper.update_from_status(&status, at(now)), None);
            now += 10;
        }
        assert_eq!(mapper.parameters(), settled);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut mapper = ParameterMapper::new(MapperConfig::default());
        mapper.update(true, true, 255, 255, at(0));
        mapper.reset();
        assert_eq!(mapper.parameters(), idle());
        assert_eq!(mapper.smoothed().presence, 0.0);
    }
}
