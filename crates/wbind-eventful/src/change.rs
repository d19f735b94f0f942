#![forbid(unsafe_code)]

//! Change records and the event delivered to observers.

use wbind_core::Slot;

use crate::table::{Method, Operation};

/// What a mutation did to a container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Change<K, V> {
    /// `key` now holds `new`; `old` is [`Slot::Absent`] if it did not exist.
    Set { key: K, old: Slot<V>, new: V },
    /// `key` held `old` and was removed.
    Delete { key: K, old: V },
    /// Whole-sequence snapshots around a reorder.
    Rearrange { old: Vec<V>, new: Vec<V> },
    /// Per-element records of an accumulating operation, in application order.
    Batch(Vec<Change<K, V>>),
}

impl<K, V> Change<K, V> {
    /// Element records carried by this change: the batch contents, or the
    /// change itself.
    #[must_use]
    pub fn records(&self) -> &[Change<K, V>] {
        match self {
            Self::Batch(records) => records,
            other => std::slice::from_ref(other),
        }
    }

    /// Key touched by a `Set` or `Delete` record.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        match self {
            Self::Set { key, .. } | Self::Delete { key, .. } => Some(key),
            Self::Rearrange { .. } | Self::Batch(_) => None,
        }
    }
}

/// One notification: a single call on an eventful container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChangeEvent<K, V> {
    /// Name of the container (usually the owning field).
    pub name: String,
    pub operation: Operation,
    pub method: Method,
    pub change: Change<K, V>,
}

impl<K, V> ChangeEvent<K, V> {
    #[must_use]
    pub fn records(&self) -> &[Change<K, V>] {
        self.change.records()
    }
}
