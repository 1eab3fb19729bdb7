// tests/throttle/error_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::test_clock::TestClock;
    use etl_throttle::{ClockError, Throttle, ThrottleConfig, ThrottleError};

    #[test]
    fn clock_error_propagates_in_request_admission() {
        let clock = TestClock::new(0);
        let throttle = Throttle::with_config(ThrottleConfig::new(3, 10), clock.clone()).unwrap();

        clock.fail_next_call();

        match throttle.request_admission() {
            Err(ThrottleError::Clock(ClockError::SystemTimeError)) => {} // Expected
            other => panic!("Expected clock error, got: {:?}", other),
        }
    }

    #[test]
    fn failed_admission_reserves_nothing() {
        let clock = TestClock::new(0);
        let throttle = Throttle::with_config(ThrottleConfig::new(1, 10), clock.clone()).unwrap();

        clock.fail_next_call();
        assert!(throttle.admit().is_err());
        assert_eq!(throttle.pending(), 0);

        // Clock should work again automatically
        assert!(throttle.admit().unwrap().is_immediate());
        assert_eq!(throttle.pending(), 1);
    }

    #[test]
    fn error_display_formatting() {
        let clock_error = ThrottleError::from(ClockError::SystemTimeError);
        assert!(clock_error.to_string().to_lowercase().contains("clock"));

        assert_eq!(ThrottleError::InvalidLimit.to_string(), "Limit must be positive");
        assert_eq!(ThrottleError::InvalidWindow.to_string(), "Window must be positive");
        assert!(
            ThrottleError::AlreadyInitialized
                .to_string()
                .contains("already initialized")
        );
    }
}
