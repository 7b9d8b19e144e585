//! Gemini REST gateway.

mod client;
mod conversion;
mod dto;

pub use client::GeminiGateway;
