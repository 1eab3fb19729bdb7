// src/lib.rs

//! # ETL Throttle
//!
//! A thread-safe call-rate throttle based on a sliding log of reserved
//! admission instants. A throttle configured with `limit` and `window`
//! guarantees that callers honoring the returned wait never perform more than
//! `limit` calls within any rolling `window`.
//!
//! The throttle only computes the wait; sleeping is up to the caller.
//!
//! ## Quick Example
//!
//! ```rust
//! use etl_throttle::Throttle;
//!
//! // at most 3 calls in any 10 second window
//! let throttle = Throttle::new(3, 10);
//!
//! for _ in 0..3 {
//!     assert!(throttle.next_wait().is_zero());
//! }
//!
//! let wait = throttle.next_wait();
//! assert!(wait.as_secs_f64() > 9.0);
//! // std::thread::sleep(wait); then call the upstream API
//! ```

// private modules
mod clock;
mod config;
mod deferred;
mod errors;
mod history;
mod registry;
mod throttle;

// public API exports
pub use clock::{Clock, ClockError, MonotonicClock, SystemClock};
pub use config::ThrottleConfig;
pub use deferred::DeferredThrottle;
pub use errors::ThrottleError;
pub use registry::ThrottleRegistry;
pub use throttle::{Admission, Throttle};
