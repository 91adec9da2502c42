mod tests {
    use reactive_glow::config::{
        ConfigError, MapperConfig, RangeField, ReactiveConfig, ValueRange,
    };

    #[test]
    fn test_default_config_is_valid() {
        let config = ReactiveConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.mapper.idle_brightness(), 60);
        assert_eq!(config.mapper.idle_speed(), 15);
    }

    #[test]
    fn test_zero_debounce_is_rejected() {
        let mut config = ReactiveConfig::default();
        config.motion.debounce_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));
    }

    #[test]
    fn test_alpha_must_be_in_unit_interval() {
        for alpha in [0.0f32, -0.5, 1.5, f32::NAN] {
            let mut config = ReactiveConfig::default();
            config.mapper.alpha = alpha;
            assert_eq!(config.validate(), Err(ConfigError::InvalidAlpha), "{alpha}");
        }

        let mut config = ReactiveConfig::default();
        config.mapper.alpha = 1.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let config = ReactiveConfig {
            mapper: MapperConfig {
                spread: ValueRange::new(8, 2),
                ..MapperConfig::default()
            },
            ..ReactiveConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange(RangeField::Spread))
        );
    }

    #[test]
    fn test_idle_above_max_is_rejected() {
        let config = ReactiveConfig {
            mapper: MapperConfig {
                speed: ValueRange::new(10, 12),
                ..MapperConfig::default()
            },
            ..ReactiveConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::IdleAboveMax(RangeField::Speed))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::InvertedRange(RangeField::Brightness).to_string(),
            "brightness range has min above max"
        );
        assert_eq!(
            ConfigError::IdleAboveMax(RangeField::Speed).to_string(),
            "idle speed exceeds the range maximum"
        );
    }

    #[test]
    fn test_value_range_mapping() {
        let range = ValueRange::new(40, 220);
        assert_eq!(range.map(0), 40);
        assert_eq!(range.map(255), 220);
        assert_eq!(range.map_f32(0.0), 40);
        assert_eq!(range.map_f32(255.0), 220);
        assert_eq!(range.map_f32(41.4), 69);
        assert_eq!(range.map_f32(-3.0), 40);
        assert_eq!(range.map_f32(400.0), 220);

        let falling = ValueRange::new(250, 180);
        assert_eq!(falling.map(0), 250);
        assert_eq!(falling.map(255), 180);
        assert!(falling.map(128) < 250 && falling.map(128) > 180);
    }
}
