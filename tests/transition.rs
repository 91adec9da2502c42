mod tests {
    use embassy_time::{Duration, Instant};
    use reactive_glow::{
        color::{BLACK, Rgb},
        transition::{FrameTransition, ValueTransition},
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const TEAL: Rgb = Rgb {
        r: 0,
        g: 120,
        b: 90,
    };

    fn between(value: u8, a: u8, b: u8) -> bool {
        value >= a.min(b) && value <= a.max(b)
    }

    #[test]
    fn test_idle_transition_copies_target() {
        let mut transition = FrameTransition::<3>::new();
        let mut out = [BLACK; 3];

        assert!(!transition.tick(Instant::from_millis(5), &[TEAL; 3], &mut out));
        assert_eq!(out, [TEAL; 3]);
    }

    #[test]
    fn test_frame_transition_endpoints() {
        let mut transition = FrameTransition::<4>::new();
        let previous = [RED, TEAL, BLACK, BLUE];
        let target = [BLUE, RED, TEAL, BLUE];
        let mut out = [BLACK; 4];

        transition.start(&previous, Duration::from_millis(100), Instant::from_millis(1000));
        assert!(transition.is_active());

        assert!(transition.tick(Instant::from_millis(1000), &target, &mut out));
        assert_eq!(out, previous);

        assert!(transition.tick(Instant::from_millis(1050), &target, &mut out));
        for ((pixel, from), to) in out.iter().zip(&previous).zip(&target) {
            assert!(between(pixel.r, from.r, to.r));
            assert!(between(pixel.g, from.g, to.g));
            assert!(between(pixel.b, from.b, to.b));
        }

        assert!(!transition.tick(Instant::from_millis(1100), &target, &mut out));
        assert_eq!(out, target);
        assert!(!transition.is_active());
    }

    #[test]
    fn test_frame_transition_is_monotone_per_channel() {
        let mut transition = FrameTransition::<1>::new();
        let mut out = [BLACK; 1];
        transition.start(&[RED], Duration::from_millis(255), Instant::from_millis(0));

        let mut last_r = 255;
        let mut last_b = 0;
        for t in 0..=255 {
            transition.tick(Instant::from_millis(t), &[BLUE], &mut out);
            assert!(out[0].r <= last_r);
            assert!(out[0].b >= last_b);
            last_r = out[0].r;
            last_b = out[0].b;
        }
        assert_eq!(out[0], BLUE);
    }

    #[test]
    fn test_restart_rebases_on_given_frame() {
        let mut transition = FrameTransition::<2>::new();
        let mut out = [BLACK; 2];

        transition.start(&[RED; 2], Duration::from_millis(100), Instant::from_millis(0));
        transition.tick(Instant::from_millis(50), &[BLUE; 2], &mut out);
        let blended = out;

        transition.start(&blended, Duration::from_millis(100), Instant::from_millis(50));
        assert_eq!(transition.previous(), &blended);

        transition.tick(Instant::from_millis(50), &[TEAL; 2], &mut out);
        assert_eq!(out, blended);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut transition = FrameTransition::<2>::new();
        let mut out = [BLACK; 2];

        transition.start(&[RED; 2], Duration::from_millis(0), Instant::from_millis(10));
        assert!(!transition.tick(Instant::from_millis(10), &[BLUE; 2], &mut out));
        assert_eq!(out, [BLUE; 2]);
    }

    #[test]
    fn test_short_source_frame_is_padded_with_black() {
        let mut transition = FrameTransition::<3>::new();
        transition.start(&[RED], Duration::from_millis(10), Instant::from_millis(0));
        assert_eq!(transition.previous(), &[RED, BLACK, BLACK]);
    }

    #[test]
    fn test_value_transition_u8() {
        let mut transition = ValueTransition::new_u8(0);
        assert_eq!(transition.current(), 0);
        assert!(!transition.is_transitioning());
        transition.set(100, Duration::from_millis(100), Instant::from_millis(0));
        assert!(transition.is_transitioning());

        transition.tick(Instant::from_millis(50));
        assert_eq!(transition.current(), 50);

        transition.tick(Instant::from_millis(100));
        assert_eq!(transition.current(), 100);
        assert!(!transition.is_transitioning());
    }
}
