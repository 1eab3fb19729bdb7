// tests/throttle/concurrency_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::test_clock::{SECOND, TestClock};
    use crate::helpers::assertions::assert_no_window_overbooked;
    use etl_throttle::{Admission, Throttle, ThrottleConfig};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    fn admit_concurrently<C>(throttle: Arc<Throttle<C>>, callers: usize) -> Vec<Admission>
    where
        C: etl_throttle::Clock + 'static,
    {
        let barrier = Arc::new(Barrier::new(callers));
        let handles: Vec<_> = (0..callers)
            .map(|_| {
                let throttle = Arc::clone(&throttle);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    throttle.admit().unwrap()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    }

    #[test]
    fn at_most_limit_callers_are_admitted_immediately() {
        let throttle = Arc::new(Throttle::new(4, 60));
        let admissions = admit_concurrently(Arc::clone(&throttle), 16);

        let immediate = admissions.iter().filter(|a| a.is_immediate()).count();
        assert_eq!(immediate, 4);
        assert_eq!(throttle.pending(), 4);
        assert_no_window_overbooked(&admissions, 4, 60 * SECOND);
    }

    #[test]
    fn delayed_callers_wait_roughly_one_window() {
        let throttle = Arc::new(Throttle::new(3, 30));
        let admissions = admit_concurrently(throttle, 6);

        let mut waits: Vec<Duration> = admissions.iter().map(|a| a.wait).collect();
        waits.sort();

        assert!(waits[..3].iter().all(|w| w.is_zero()));
        for wait in &waits[3..] {
            // allow for scheduling jitter between the threads
            assert!(*wait > Duration::from_secs(29) && *wait <= Duration::from_secs(30));
        }
    }

    #[test]
    fn reservations_under_a_frozen_clock_stack_by_window() {
        let clock = TestClock::new(0);
        let throttle = Arc::new(
            Throttle::with_config(ThrottleConfig::new(3, 10), clock.clone()).unwrap(),
        );
        let admissions = admit_concurrently(throttle, 12);

        let mut instants: Vec<u64> = admissions.iter().map(|a| a.scheduled_at_nanos).collect();
        instants.sort_unstable();

        let expected: Vec<u64> = (0..12).map(|i| (i / 3) * 10 * SECOND).collect();
        assert_eq!(instants, expected);
        assert_no_window_overbooked(&admissions, 3, 10 * SECOND);
    }

    #[test]
    fn independent_throttles_share_nothing() {
        let first = Arc::new(Throttle::new(2, 60));
        let second = Arc::new(Throttle::new(2, 60));

        let a = admit_concurrently(Arc::clone(&first), 2);
        let b = admit_concurrently(Arc::clone(&second), 2);

        assert!(a.iter().chain(b.iter()).all(|admission| admission.is_immediate()));
        assert!(!first.admit().unwrap().is_immediate());
        assert!(!second.admit().unwrap().is_immediate());
    }
}
