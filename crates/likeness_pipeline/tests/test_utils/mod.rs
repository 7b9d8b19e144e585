//! Test utilities for pipeline tests.
//!
//! This module provides a scripted gateway, a scripted fetcher and error helpers.

pub mod mock_gateway;

#[allow(unused_imports)]
pub use mock_gateway::{
    MockCompletion, MockFetcher, MockGateway, MockVideo, fatal, png, rate_limited, transient,
};
