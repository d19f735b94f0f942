#![forbid(unsafe_code)]

//! Typed, validated, observable attribute slots.
//!
//! A [`TraitType`] describes how raw input is validated and coerced into a
//! stored value. A [`Field`] owns one such value under a name and notifies its
//! listeners with a [`FieldChange`] whenever an assignment changes it.
//!
//! # Invariants
//!
//! 1. A rejected assignment leaves the stored value untouched and emits
//!    nothing.
//! 2. Assigning a value equal to the current one emits nothing.
//! 3. Defaults are built lazily on first read, once per field, so dynamic
//!    defaults are never shared between owners.

use std::fmt;

use crate::error::{Error, Result};
use crate::notify::{Notifier, Subscription};
use crate::slot::Slot;

/// Validation and coercion contract for a field's values.
pub trait TraitType {
    /// What callers hand to [`Field::set`].
    type Input;
    /// What the field stores.
    type Value: Clone + PartialEq + fmt::Debug;

    /// Short description of accepted values, used in error messages.
    fn info(&self) -> &'static str;

    /// Validate `input`, returning the value to store.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `input` is rejected.
    fn validate(&self, input: Self::Input) -> Result<Self::Value>;

    /// Value used when a field is read before any assignment.
    ///
    /// # Errors
    ///
    /// Returns an error when a dynamic default cannot be built.
    fn make_default(&self) -> Result<Option<Self::Value>> {
        Ok(None)
    }
}

/// Emitted by a [`Field`] after an assignment changed its value.
///
/// `None` stands for an explicit null (see [`Field::allow_none`]);
/// `Slot::Absent` as `old` means the field had no value yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldChange<V> {
    pub name: String,
    pub old: Slot<Option<V>>,
    pub new: Option<V>,
}

/// A named slot holding a value validated by `T`.
pub struct Field<T: TraitType> {
    name: String,
    ty: T,
    allow_none: bool,
    default: Option<T::Value>,
    value: Slot<Option<T::Value>>,
    notifier: Notifier<FieldChange<T::Value>>,
}

impl<T> fmt::Debug for Field<T>
where
    T: TraitType + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("allow_none", &self.allow_none)
            .field("value", &self.value)
            .finish()
    }
}

impl<T: TraitType> Field<T> {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: T) -> Self {
        Self {
            name: name.into(),
            ty,
            allow_none: false,
            default: None,
            value: Slot::Absent,
            notifier: Notifier::new(),
        }
    }

    /// Accept `None` as a value.
    #[must_use]
    pub fn allow_none(mut self, allow: bool) -> Self {
        self.allow_none = allow;
        self
    }

    /// Static default, taking precedence over the trait type's default.
    #[must_use]
    pub fn with_default(mut self, value: T::Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Share an existing listener set instead of the field's own.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier<FieldChange<T::Value>>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn trait_type(&self) -> &T {
        &self.ty
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier<FieldChange<T::Value>> {
        &self.notifier
    }

    /// Whether a value (or default) has been materialized.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.value.is_present()
    }

    /// Current value, building the default on first read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDefault`] when the field was never assigned and has
    /// no default, or the trait type's error if its dynamic default fails.
    pub fn get(&mut self) -> Result<Option<&T::Value>> {
        self.materialize()?;
        Ok(self.value.present().and_then(Option::as_ref))
    }

    /// Mutable access to the current value, building the default on first
    /// read.
    ///
    /// Changes made in place skip validation and emit no [`FieldChange`].
    /// Values that report their own mutations, such as eventful containers,
    /// stay observable through their own listeners.
    ///
    /// # Errors
    ///
    /// Same as [`Field::get`].
    pub fn get_mut(&mut self) -> Result<Option<&mut T::Value>> {
        self.materialize()?;
        Ok(match &mut self.value {
            Slot::Present(value) => value.as_mut(),
            Slot::Absent => None,
        })
    }

    /// Validate and assign `input`. Returns whether the stored value changed.
    ///
    /// # Errors
    ///
    /// Returns the trait type's validation error; the field is left unchanged.
    pub fn set(&mut self, input: T::Input) -> Result<bool> {
        match self.ty.validate(input) {
            Ok(value) => Ok(self.store(Some(value))),
            Err(err) => {
                tracing::debug!(message = "field.rejected", name = %self.name, error = %err);
                Err(err)
            }
        }
    }

    /// Assign `None`.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless the field allows `None`.
    pub fn set_none(&mut self) -> Result<bool> {
        if !self.allow_none {
            let err = Error::invalid(self.ty.info(), &None::<()>);
            tracing::debug!(message = "field.rejected", name = %self.name, error = %err);
            return Err(err);
        }
        Ok(self.store(None))
    }

    /// Register a listener for changes of this field.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn observe(&self, callback: impl Fn(&FieldChange<T::Value>) + 'static) -> Subscription
    where
        T::Value: 'static,
    {
        self.notifier.subscribe(callback)
    }

    fn materialize(&mut self) -> Result<()> {
        if self.value.is_absent() {
            let default = match self.default.clone() {
                Some(v) => v,
                None => self.ty.make_default()?.ok_or_else(|| Error::NoDefault {
                    name: self.name.clone(),
                })?,
            };
            self.value = Slot::Present(Some(default));
        }
        Ok(())
    }

    fn store(&mut self, new: Option<T::Value>) -> bool {
        if let Slot::Present(current) = &self.value
            && *current == new
        {
            return false;
        }
        let old = std::mem::replace(&mut self.value, Slot::Present(new.clone()));
        tracing::trace!(message = "field.change", name = %self.name);
        self.notifier.notify(&FieldChange {
            name: self.name.clone(),
            old,
            new,
        });
        true
    }
}
