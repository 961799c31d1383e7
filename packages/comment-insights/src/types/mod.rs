//! Data types shared across the pipeline.

pub mod comment;
pub mod config;
pub mod report;
pub mod sentiment;
