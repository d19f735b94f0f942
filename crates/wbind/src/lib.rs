#![forbid(unsafe_code)]

//! wbind: validated attribute types and change-event-aware containers for
//! widget state binding.
//!
//! The workspace crates are re-exported under short names; most users only
//! need the [`prelude`].
//!
//! ```
//! use wbind::prelude::*;
//!
//! let mut color = Field::new("color", Color);
//! assert!(color.set("Teal".to_string()).unwrap());
//! assert!(color.set("#12".to_string()).is_err());
//!
//! let mut tags: EventfulList<String> = EventfulList::named("tags");
//! tags.append("new".to_string());
//! assert_eq!(tags.len(), 1);
//! ```

pub use wbind_core as core;
pub use wbind_eventful as eventful;
pub use wbind_types as types;

pub use wbind_core::{Error, ErrorKind, Result};

/// Everything needed to declare fields and observe containers.
pub mod prelude {
    pub use wbind_core::{
        Error, ErrorKind, Field, FieldChange, Notifier, Result, Slot, Subscription, TraitType,
    };
    pub use wbind_eventful::{
        Change, ChangeEvent, Dict, Eventful, EventfulDict, EventfulDictTrait, EventfulList,
        EventfulListTrait, EventfulTrait, Method, Operation,
    };
    pub use wbind_types::{
        Coerce, Color, Date, Datetime, FormatSpec, InstanceDict, NumberFormat,
    };
}
