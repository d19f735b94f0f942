#![forbid(unsafe_code)]

//! Trait types: validated scalars and coercing references.
//!
//! - [`Color`]: named CSS colors and hex triplets.
//! - [`Date`] / [`Datetime`]: chrono values with a wire codec for the
//!   presentation layer ([`datetime::to_wire`], [`datetime::from_wire`]).
//! - [`NumberFormat`]: d3-format specifier strings.
//! - [`InstanceDict`]: a typed instance that may be given as constructor
//!   arguments.

pub mod color;
pub mod datetime;
pub mod instance;
pub mod number_format;

pub use color::{COLOR_NAMES, Color, is_valid_color};
pub use datetime::{Date, DateWire, Datetime, WireDate};
pub use instance::{Coerce, InstanceDict};
pub use number_format::{FormatSpec, NUMBER_FORMAT_TYPES, NumberFormat};
