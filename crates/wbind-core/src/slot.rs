#![forbid(unsafe_code)]

//! The "absent" marker used in change records.

/// A value that may be absent.
///
/// `Slot::Absent` marks a key or index that did not exist before a mutation.
/// It is distinct from every valid value, including `None` when the value
/// type is itself an `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Slot<T> {
    #[default]
    Absent,
    Present(T),
}

impl<T> Slot<T> {
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Present(v),
            None => Self::Absent,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    #[must_use]
    pub const fn as_ref(&self) -> Slot<&T> {
        match self {
            Self::Present(v) => Slot::Present(v),
            Self::Absent => Slot::Absent,
        }
    }

    /// The contained value, if present.
    #[must_use]
    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }
}

impl<T: Clone> Slot<&T> {
    #[must_use]
    pub fn cloned(self) -> Slot<T> {
        match self {
            Slot::Present(v) => Slot::Present(v.clone()),
            Slot::Absent => Slot::Absent,
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}
