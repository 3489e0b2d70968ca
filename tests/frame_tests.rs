use plane_sketch::frame::FrameClock;
use std::thread::sleep;
use std::time::Duration;

#[cfg(test)]
mod frame_tests {
    use super::*;

    #[test]
    fn test_time_strictly_increases_between_frames() {
        let mut clock = FrameClock::new();
        let first = clock.advance();
        sleep(Duration::from_millis(2));
        let second = clock.advance();

        assert!(
            second.time > first.time,
            "uniform time must strictly increase across frames"
        );
    }

    #[test]
    fn test_frame_numbers_increment_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance().number, 0);
        assert_eq!(clock.advance().number, 1);
        assert_eq!(clock.advance().number, 2);
        assert_eq!(clock.frame_number(), 3);
    }

    #[test]
    fn test_delta_matches_gap_between_frames() {
        let mut clock = FrameClock::new();
        let first = clock.advance();
        sleep(Duration::from_millis(5));
        let second = clock.advance();

        assert!(second.delta > 0.0);
        let gap = second.time - first.time;
        assert!(
            (second.delta - gap).abs() < 0.005,
            "delta should equal the elapsed gap between advances"
        );
    }

    #[test]
    fn test_reading_time_does_not_advance_a_frame() {
        let mut clock = FrameClock::new();
        let _ = clock.time();
        let _ = clock.time();
        assert_eq!(clock.frame_number(), 0);
        assert_eq!(clock.advance().number, 0);
    }

    #[test]
    fn test_clock_is_an_endless_iterator() {
        let mut clock = FrameClock::new();
        for expected in 0..5 {
            let frame = clock.next().expect("frame clock never ends");
            assert_eq!(frame.number, expected);
        }
    }
}
