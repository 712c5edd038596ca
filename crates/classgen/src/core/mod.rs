//! Core abstractions shared by the model and the emitters
//!
//! Error types, change notifications, language and visibility vocabulary,
//! and the chumsky helpers used by every parser.

pub mod chumsky_utils;
mod error;
pub mod logging;
mod observer;
mod types;

pub use error::*;
pub use logging::*;
pub use observer::*;
pub use types::*;
