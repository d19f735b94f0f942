#![forbid(unsafe_code)]

//! Before/after hooks describing what an operation changed.
//!
//! A [`Hook`] runs in two halves around the raw mutation: `before` captures
//! whatever state is needed (and may reject the call), `after` compares that
//! capture with the mutated container and yields a [`Change`] or nothing.
//!
//! Composite operations are built from element hooks with [`Captured`]:
//! `append` is one `setitem` at the end, `clear` is one `delitem` per key,
//! and so on.
//!
//! # Invariants
//!
//! 1. `before` never mutates the container or its arguments.
//! 2. A [`Fold::One`] capture is taken at most once per operation.
//! 3. `setitem` reports nothing when the stored value is unchanged.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use wbind_core::Slot;

use crate::change::Change;
use crate::table::{Operation, OperationTable};

/// A container kind that can be made eventful.
pub trait Container {
    type Key: Clone + fmt::Debug;
    type Value: Clone + PartialEq + fmt::Debug;

    /// Short kind label used in diagnostics.
    const KIND: &'static str;
    const TABLE: OperationTable;

    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;
}

/// Two-phase observation of one operation.
pub trait Hook<C: Container> {
    type Args;
    type State;
    type Error;

    const OPERATION: Operation;

    /// Capture pre-mutation state. An error aborts the call before mutation.
    ///
    /// # Errors
    ///
    /// Hook specific; infallible hooks use [`Infallible`].
    fn before(&self, container: &C, args: &Self::Args) -> Result<Self::State, Self::Error>;

    fn after(&self, container: &C, state: Self::State) -> Option<Change<C::Key, C::Value>>;
}

/// How captured element states fold into one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Exactly one element; its change is reported as is.
    One,
    /// Any number of elements; reported as a [`Change::Batch`].
    Many,
}

/// Element hook states captured on behalf of a composite operation.
pub struct Captured<C: Container, H: Hook<C>> {
    hook: H,
    fold: Fold,
    states: Vec<H::State>,
    _container: PhantomData<fn(&C)>,
}

impl<C: Container, H: Hook<C>> Captured<C, H> {
    #[must_use]
    pub fn once(hook: H) -> Self {
        Self::with_fold(hook, Fold::One)
    }

    #[must_use]
    pub fn many(hook: H) -> Self {
        Self::with_fold(hook, Fold::Many)
    }

    fn with_fold(hook: H, fold: Fold) -> Self {
        Self {
            hook,
            fold,
            states: Vec::new(),
            _container: PhantomData,
        }
    }

    /// Run the element hook's `before` half.
    ///
    /// # Errors
    ///
    /// Propagates the element hook's error.
    pub fn capture(&mut self, container: &C, args: &H::Args) -> Result<(), H::Error> {
        debug_assert!(
            self.fold == Fold::Many || self.states.is_empty(),
            "single-shot hook captured twice"
        );
        self.states.push(self.hook.before(container, args)?);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Run every `after` half in capture order and fold the results.
    pub fn finish(self, container: &C) -> Option<Change<C::Key, C::Value>> {
        let Self {
            hook, fold, states, ..
        } = self;
        match fold {
            Fold::One => states
                .into_iter()
                .next()
                .and_then(|state| hook.after(container, state)),
            Fold::Many => {
                let records: Vec<_> = states
                    .into_iter()
                    .filter_map(|state| hook.after(container, state))
                    .collect();
                (!records.is_empty()).then_some(Change::Batch(records))
            }
        }
    }
}

impl<C: Container, H: Hook<C>> fmt::Debug for Captured<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Captured")
            .field("operation", &H::OPERATION)
            .field("fold", &self.fold)
            .field("states", &self.states.len())
            .finish()
    }
}

/// Element assignment: `container[key] = value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetItem;

impl<C: Container> Hook<C> for SetItem {
    type Args = C::Key;
    type State = (C::Key, Slot<C::Value>);
    type Error = Infallible;

    const OPERATION: Operation = Operation::SetItem;

    fn before(&self, container: &C, key: &C::Key) -> Result<Self::State, Infallible> {
        Ok((key.clone(), Slot::from(container.lookup(key).cloned())))
    }

    fn after(&self, container: &C, (key, old): Self::State) -> Option<Change<C::Key, C::Value>> {
        let new = container.lookup(&key)?;
        if old.present() == Some(new) {
            return None;
        }
        Some(Change::Set {
            key,
            old,
            new: new.clone(),
        })
    }
}

/// Element removal: `del container[key]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelItem;

impl<C: Container> Hook<C> for DelItem {
    type Args = C::Key;
    type State = Option<Change<C::Key, C::Value>>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::DelItem;

    fn before(&self, container: &C, key: &C::Key) -> Result<Self::State, Infallible> {
        Ok(container.lookup(key).map(|old| Change::Delete {
            key: key.clone(),
            old: old.clone(),
        }))
    }

    fn after(&self, _container: &C, state: Self::State) -> Option<Change<C::Key, C::Value>> {
        state
    }
}
