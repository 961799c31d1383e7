// HTTP routes
pub mod analyze;
pub mod comments;
pub mod health;

pub use analyze::*;
pub use comments::*;
pub use health::*;
