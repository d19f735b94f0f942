#![forbid(unsafe_code)]

//! Eventful containers: mappings and sequences that notify listeners of
//! every mutation.
//!
//! ```
//! use wbind_eventful::{Change, EventfulList};
//! use wbind_core::Slot;
//!
//! let mut list = EventfulList::new("items", vec![1]);
//! let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let sink = seen.clone();
//! let _sub = list.observe(move |event| sink.borrow_mut().push(event.change.clone()));
//!
//! list.append(2);
//! assert_eq!(
//!     seen.borrow()[0],
//!     Change::Set { key: 1, old: Slot::Absent, new: 2 }
//! );
//! ```
//!
//! # Layout
//!
//! - [`table`]: abstract operations and the per-kind method tables.
//! - [`hooks`]: the before/after hook protocol and element hooks.
//! - [`protocol`]: the [`Eventful`] wrapper and its interception loop.
//! - [`dict`] / [`list`]: the mapping and sequence instrumentation.
//! - [`field`]: field types whose values are eventful containers.

pub mod change;
pub mod dict;
pub mod field;
pub mod hooks;
pub mod list;
pub mod protocol;
pub mod table;

pub use change::{Change, ChangeEvent};
pub use dict::{Dict, EventfulDict};
pub use field::{EventfulDictTrait, EventfulListTrait, EventfulTrait};
pub use hooks::{Captured, Container, DelItem, Fold, Hook, SetItem};
pub use list::EventfulList;
pub use protocol::{EventNotifier, Eventful};
pub use table::{DICT_TABLE, LIST_TABLE, Method, Operation, OperationTable};
