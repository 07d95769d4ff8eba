//! Homeroom Core Types
//!
//! Directory records, domain events and push notification types shared by
//! storage, dispatch and the notification orchestrators.

mod criterion;
mod directory;
mod event;
mod names;
mod push;

pub use criterion::*;
pub use directory::*;
pub use event::*;
pub use names::*;
pub use push::*;
