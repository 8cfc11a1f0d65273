//! Gemini adapter
//!
//! Implementation of the generative AI client over the Gemini REST API.

pub mod client;

pub use client::GeminiClient;
