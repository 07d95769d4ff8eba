//! Homeroom Push Delivery
//!
//! Chunked, paced delivery of push notifications through a single HTTP
//! push gateway.

mod batch;
mod config;
mod dispatch;
mod http;
mod pace;
mod traits;

pub use batch::*;
pub use config::*;
pub use dispatch::*;
pub use http::*;
pub use pace::*;
pub use traits::*;
