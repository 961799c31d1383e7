//! Core trait abstractions for the pipeline.
//!
//! These traits are the seams to the two external services: where comments
//! come from and which model answers prompts.

pub mod ai;
pub mod source;
