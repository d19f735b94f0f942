#![forbid(unsafe_code)]

//! Eventful sequence.
//!
//! Element operations are modeled on `setitem` / `delitem` at concrete
//! indices: `append` assigns index `len`, `extend` assigns `len`, `len + 1`,
//! ... left to right, and `remove` deletes the index of the first equal
//! element. Reorders report whole-sequence snapshots.
//!
//! Indices are `usize`; there is no negative indexing.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;

use wbind_core::{Error, Result};

use crate::change::Change;
use crate::hooks::{Captured, Container, DelItem, Hook, SetItem};
use crate::protocol::Eventful;
use crate::table::{LIST_TABLE, Method, Operation, OperationTable};

/// Sequence that reports its mutations.
pub type EventfulList<T> = Eventful<Vec<T>>;

impl<T> Container for Vec<T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    type Key = usize;
    type Value = T;

    const KIND: &'static str = "elist";
    const TABLE: OperationTable = LIST_TABLE;

    fn lookup(&self, index: &usize) -> Option<&T> {
        self.get(*index)
    }
}

/// `append`: one `setitem` at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Append;

impl<T: Clone + PartialEq + fmt::Debug> Hook<Vec<T>> for Append {
    type Args = T;
    type State = Captured<Vec<T>, SetItem>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::Append;

    fn before(&self, list: &Vec<T>, _value: &T) -> std::result::Result<Self::State, Infallible> {
        let mut setitem = Captured::once(SetItem);
        setitem.capture(list, &list.len())?;
        Ok(setitem)
    }

    fn after(&self, list: &Vec<T>, setitem: Self::State) -> Option<Change<usize, T>> {
        setitem.finish(list)
    }
}

/// `extend`: a `setitem` per new element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extend;

impl<T: Clone + PartialEq + fmt::Debug> Hook<Vec<T>> for Extend {
    type Args = Vec<T>;
    type State = Captured<Vec<T>, SetItem>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::Extend;

    fn before(&self, list: &Vec<T>, items: &Vec<T>) -> std::result::Result<Self::State, Infallible> {
        let mut setitem = Captured::many(SetItem);
        for index in list.len()..list.len() + items.len() {
            setitem.capture(list, &index)?;
        }
        Ok(setitem)
    }

    fn after(&self, list: &Vec<T>, setitem: Self::State) -> Option<Change<usize, T>> {
        setitem.finish(list)
    }
}

/// `remove`: one `delitem` at the first equal element.
#[derive(Debug, Clone, Copy, Default)]
pub struct Remove;

impl<T: Clone + PartialEq + fmt::Debug> Hook<Vec<T>> for Remove {
    type Args = T;
    type State = Captured<Vec<T>, DelItem>;
    type Error = Error;

    const OPERATION: Operation = Operation::Remove;

    fn before(&self, list: &Vec<T>, value: &T) -> Result<Self::State> {
        let index = list
            .iter()
            .position(|item| item == value)
            .ok_or_else(|| Error::not_found(value))?;
        let mut delitem = Captured::once(DelItem);
        let Ok(()) = delitem.capture(list, &index);
        Ok(delitem)
    }

    fn after(&self, list: &Vec<T>, delitem: Self::State) -> Option<Change<usize, T>> {
        delitem.finish(list)
    }
}

fn rearranged<T: Clone>(list: &[T], old: Vec<T>) -> Option<Change<usize, T>> {
    Some(Change::Rearrange {
        old,
        new: list.to_vec(),
    })
}

/// `reverse`: snapshot around the reorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl<T: Clone + PartialEq + fmt::Debug> Hook<Vec<T>> for Reverse {
    type Args = ();
    type State = Vec<T>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::Reverse;

    fn before(&self, list: &Vec<T>, (): &()) -> std::result::Result<Vec<T>, Infallible> {
        Ok(list.clone())
    }

    fn after(&self, list: &Vec<T>, old: Vec<T>) -> Option<Change<usize, T>> {
        rearranged(list, old)
    }
}

/// `sort` / `sort_by`: snapshot around the reorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sort;

impl<T: Clone + PartialEq + fmt::Debug> Hook<Vec<T>> for Sort {
    type Args = ();
    type State = Vec<T>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::Sort;

    fn before(&self, list: &Vec<T>, (): &()) -> std::result::Result<Vec<T>, Infallible> {
        Ok(list.clone())
    }

    fn after(&self, list: &Vec<T>, old: Vec<T>) -> Option<Change<usize, T>> {
        rearranged(list, old)
    }
}

impl<T> Eventful<Vec<T>>
where
    T: Clone + PartialEq + fmt::Debug,
{
    pub fn append(&mut self, value: T) {
        let Ok(()) = self.intercept(Method::Append, &Append, value, |list, value| {
            list.push(value);
            Ok::<_, Infallible>(())
        });
    }

    /// Append every item, reporting them in one event.
    pub fn extend<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let Ok(()) = self.intercept(Method::Extend, &Extend, items, |list, items| {
            list.extend(items);
            Ok::<_, Infallible>(())
        });
    }

    /// Replace the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.intercept(Method::Set, &SetItem, index, |list, index| {
            let len = list.len();
            list.get_mut(index)
                .map(|slot| std::mem::replace(slot, value))
                .ok_or(Error::IndexOutOfRange { index, len })
        })
    }

    /// Remove the first element equal to `value`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no element is equal.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        self.intercept(Method::Remove, &Remove, value.clone(), |list, value| {
            let index = list
                .iter()
                .position(|item| *item == value)
                .ok_or_else(|| Error::not_found(&value))?;
            Ok(list.remove(index))
        })
    }

    /// Remove the element at `index`, shifting later elements down.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        self.intercept(Method::Delete, &DelItem, index, |list, index| {
            if index < list.len() {
                Ok(list.remove(index))
            } else {
                Err(Error::IndexOutOfRange {
                    index,
                    len: list.len(),
                })
            }
        })
    }

    /// Remove the last element.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        let Ok(removed) = self.intercept(Method::Pop, &DelItem, last, |list, _| {
            Ok::<_, Infallible>(list.pop())
        });
        removed
    }

    pub fn reverse(&mut self) {
        let Ok(()) = self.intercept(Method::Reverse, &Reverse, (), |list, ()| {
            list.reverse();
            Ok::<_, Infallible>(())
        });
    }

    /// Stable sort. Always reports a rearrangement, even if nothing moved.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_with(Method::Sort, Ord::cmp);
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_with(Method::SortBy, compare);
    }

    fn sort_with<F>(&mut self, method: Method, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let Ok(()) = self.intercept(method, &Sort, (), |list, ()| {
            list.sort_by(compare);
            Ok::<_, Infallible>(())
        });
    }
}
