//! Test doubles and fixtures.
//!
//! Shipped as a normal module so downstream crates can script pipeline
//! behavior in their own tests without re-implementing adapters.

pub mod fixtures;
pub mod mocks;

pub use mocks::StubAdapter;
