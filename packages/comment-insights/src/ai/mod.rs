//! AI implementations for the analysis pipeline.
//!
//! This module provides reference implementations of the `AI` trait.
//! Users can use these directly or implement their own.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiAI;
