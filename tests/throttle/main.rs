// tests/throttle/main.rs

// test modules
mod fixtures;
mod concurrency_tests;
mod error_tests;
