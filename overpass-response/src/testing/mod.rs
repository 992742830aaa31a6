//! Test doubles for code built on this crate

pub mod mocks;

pub use mocks::MockTransport;
