//! Homeroom Notification Service
//!
//! Turns attendance, announcement and guardian-request events into push
//! notifications for the matching guardians.

mod error;
mod notifier;
mod resolver;
mod traits;

pub use error::NotificationError;
pub use notifier::Notifier;
pub use resolver::TokenResolver;
pub use traits::*;
