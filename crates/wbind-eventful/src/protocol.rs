#![forbid(unsafe_code)]

//! The eventful wrapper.
//!
//! [`Eventful<C>`] owns a container and routes every mutating method through
//! [`Eventful::intercept`]: run the hook's `before` half, apply the raw
//! mutation, run the `after` half, and notify listeners with one
//! [`ChangeEvent`] if anything changed.
//!
//! Read access goes through `Deref<Target = C>`. There is no `DerefMut`;
//! every mutation goes through a hook.
//!
//! # Invariants
//!
//! 1. At most one event per mutating call, delivered after the mutation.
//! 2. A call rejected by `before` or by the mutation itself leaves the
//!    container unchanged and emits nothing.
//! 3. A call that changes nothing emits nothing.
//!
//! # Failure Modes
//!
//! - **Listener panics**: the container is already mutated; the panic
//!   reaches the caller.

use std::fmt;
use std::ops::Deref;

use wbind_core::{Notifier, Subscription};

use crate::change::{Change, ChangeEvent};
use crate::hooks::{Container, Hook};
use crate::table::{Method, Operation, OperationTable};

/// Listener set for one container's events.
pub type EventNotifier<C> =
    Notifier<ChangeEvent<<C as Container>::Key, <C as Container>::Value>>;

/// A container whose mutations are observable.
pub struct Eventful<C: Container> {
    value: C,
    name: String,
    notifier: EventNotifier<C>,
}

impl<C: Container> Eventful<C> {
    pub fn new(name: impl Into<String>, value: C) -> Self {
        Self::with_notifier(name, value, Notifier::new())
    }

    /// Share an existing listener set, e.g. an owning model's.
    pub fn with_notifier(name: impl Into<String>, value: C, notifier: EventNotifier<C>) -> Self {
        Self {
            value,
            name: name.into(),
            notifier,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn notifier(&self) -> &EventNotifier<C> {
        &self.notifier
    }

    /// Operation table of this container kind.
    #[must_use]
    pub fn table() -> OperationTable {
        C::TABLE
    }

    #[must_use]
    pub fn into_inner(self) -> C {
        self.value
    }

    /// Run `invoke` under `hook`, notifying listeners of the resulting
    /// change.
    ///
    /// # Errors
    ///
    /// Returns the hook's rejection or the mutation's own error. Neither
    /// mutates the container nor notifies.
    pub(crate) fn intercept<H, R, E>(
        &mut self,
        method: Method,
        hook: &H,
        args: H::Args,
        invoke: impl FnOnce(&mut C, H::Args) -> Result<R, E>,
    ) -> Result<R, E>
    where
        H: Hook<C>,
        E: From<H::Error> + fmt::Display,
    {
        debug_assert_eq!(
            C::TABLE.operation_for(method),
            Some(H::OPERATION),
            "{} bound to the wrong operation in the {} table",
            method,
            C::KIND,
        );

        let state = match hook.before(&self.value, &args) {
            Ok(state) => state,
            Err(e) => return Err(self.rejected(method, E::from(e))),
        };
        let result = match invoke(&mut self.value, args) {
            Ok(result) => result,
            Err(e) => return Err(self.rejected(method, e)),
        };
        match hook.after(&self.value, state) {
            Some(change) => self.emit(H::OPERATION, method, change),
            None => tracing::trace!(
                message = "eventful.noop",
                name = %self.name,
                kind = C::KIND,
                method = method.name(),
            ),
        }
        Ok(result)
    }

    fn rejected<E: fmt::Display>(&self, method: Method, error: E) -> E {
        tracing::debug!(
            message = "eventful.rejected",
            name = %self.name,
            kind = C::KIND,
            method = method.name(),
            error = %error,
        );
        error
    }

    fn emit(&self, operation: Operation, method: Method, change: Change<C::Key, C::Value>) {
        tracing::trace!(
            message = "eventful.change",
            name = %self.name,
            kind = C::KIND,
            operation = operation.name(),
            method = method.name(),
            records = change.records().len(),
        );
        self.notifier.notify(&ChangeEvent {
            name: self.name.clone(),
            operation,
            method,
            change,
        });
    }
}

impl<C> Eventful<C>
where
    C: Container,
    C::Key: 'static,
    C::Value: 'static,
{
    /// Register a listener for this container's change events.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn observe(
        &self,
        callback: impl Fn(&ChangeEvent<C::Key, C::Value>) + 'static,
    ) -> Subscription {
        self.notifier.subscribe(callback)
    }
}

impl<C: Container + Default> Eventful<C> {
    /// An empty container.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, C::default())
    }
}

impl<C: Container> Deref for Eventful<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.value
    }
}

/// Compares contents only; names and listeners are ignored.
impl<C: Container + PartialEq> PartialEq for Eventful<C> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Copies the contents and name. The clone shares the listener set.
impl<C: Container + Clone> Clone for Eventful<C> {
    fn clone(&self) -> Self {
        Self::with_notifier(self.name.clone(), self.value.clone(), self.notifier.clone())
    }
}

impl<C: Container + fmt::Debug> fmt::Debug for Eventful<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Eventful")
            .field("name", &self.name)
            .field("kind", &C::KIND)
            .field("value", &self.value)
            .field("subscribers", &self.notifier.subscriber_count())
            .finish()
    }
}
