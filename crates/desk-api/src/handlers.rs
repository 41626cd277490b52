//! Request handlers.

pub mod applications;
pub mod health;
pub mod jobs;
pub mod session;

pub use applications::*;
pub use health::*;
pub use jobs::*;
pub use session::*;
