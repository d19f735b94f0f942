#![forbid(unsafe_code)]

//! Core: field declarations, validation errors, and change notification.
//!
//! - [`Field`] / [`TraitType`]: named, validated slots that notify listeners
//!   with a [`FieldChange`] when their value changes.
//! - [`Notifier`] / [`Subscription`]: the single-threaded listener set used by
//!   fields and eventful containers alike.
//! - [`Slot`]: the "absent" marker for keys and indices that did not exist.
//! - [`Error`]: the error type shared by every wbind crate.

pub mod error;
pub mod field;
pub mod notify;
pub mod slot;

pub use error::{Error, ErrorKind, Result};
pub use field::{Field, FieldChange, TraitType};
pub use notify::{Notifier, Subscription};
pub use slot::Slot;
