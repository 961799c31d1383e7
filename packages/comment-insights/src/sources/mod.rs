//! Comment sources for the ingestion pipeline.
//!
//! Reference implementations of the `CommentSource` trait.

#[cfg(feature = "youtube")]
mod youtube;

#[cfg(feature = "youtube")]
pub use youtube::YouTubeCommentSource;
