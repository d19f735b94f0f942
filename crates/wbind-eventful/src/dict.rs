#![forbid(unsafe_code)]

//! Eventful mapping.
//!
//! Backed by an [`IndexMap`], so keys keep insertion order and batch records
//! from `update` and `clear` come out in that order. Removal uses
//! `shift_remove` to preserve the order of the remaining keys.

use std::convert::Infallible;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;
use wbind_core::{Error, Result};

use crate::change::Change;
use crate::hooks::{Captured, Container, DelItem, Hook, SetItem};
use crate::protocol::Eventful;
use crate::table::{DICT_TABLE, Method, Operation, OperationTable};

/// Insertion-ordered map with the workspace hasher.
pub type Dict<K, V> = IndexMap<K, V, ahash::RandomState>;

/// Mapping that reports its mutations.
pub type EventfulDict<K, V> = Eventful<Dict<K, V>>;

impl<K, V, S> Container for IndexMap<K, V, S>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + PartialEq + fmt::Debug,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    const KIND: &'static str = "edict";
    const TABLE: OperationTable = DICT_TABLE;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }
}

/// `update`: a `setitem` per merged key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Update;

impl<K, V, S> Hook<IndexMap<K, V, S>> for Update
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + PartialEq + fmt::Debug,
    S: BuildHasher,
{
    type Args = IndexMap<K, V, S>;
    type State = Captured<IndexMap<K, V, S>, SetItem>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::Update;

    fn before(
        &self,
        map: &IndexMap<K, V, S>,
        merged: &IndexMap<K, V, S>,
    ) -> std::result::Result<Self::State, Infallible> {
        let mut setitem = Captured::many(SetItem);
        for key in merged.keys() {
            setitem.capture(map, key)?;
        }
        Ok(setitem)
    }

    fn after(&self, map: &IndexMap<K, V, S>, setitem: Self::State) -> Option<Change<K, V>> {
        setitem.finish(map)
    }
}

/// `clear`: a `delitem` per existing key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clear;

impl<K, V, S> Hook<IndexMap<K, V, S>> for Clear
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + PartialEq + fmt::Debug,
    S: BuildHasher,
{
    type Args = ();
    type State = Captured<IndexMap<K, V, S>, DelItem>;
    type Error = Infallible;

    const OPERATION: Operation = Operation::Clear;

    fn before(&self, map: &IndexMap<K, V, S>, (): &()) -> std::result::Result<Self::State, Infallible> {
        let mut delitem = Captured::many(DelItem);
        for key in map.keys() {
            delitem.capture(map, key)?;
        }
        Ok(delitem)
    }

    fn after(&self, map: &IndexMap<K, V, S>, delitem: Self::State) -> Option<Change<K, V>> {
        delitem.finish(map)
    }
}

impl<K, V, S> Eventful<IndexMap<K, V, S>>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone + PartialEq + fmt::Debug,
    S: BuildHasher + Default,
{
    /// Store `value` under `key`, returning the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let Ok(previous) = self.intercept(Method::Set, &SetItem, key, |map, key| {
            Ok::<_, Infallible>(map.insert(key, value))
        });
        previous
    }

    /// The value under `key`, inserting `default` first if missing.
    pub fn set_default(&mut self, key: K, default: V) -> V {
        let Ok(value) = self.intercept(Method::SetDefault, &SetItem, key, |map, key| {
            Ok::<_, Infallible>(map.entry(key).or_insert(default).clone())
        });
        value
    }

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is missing.
    pub fn delete(&mut self, key: &K) -> Result<V> {
        self.intercept(Method::Delete, &DelItem, key.clone(), |map, key| {
            map.shift_remove(&key).ok_or_else(|| Error::key_not_found(&key))
        })
    }

    /// Remove `key` if present.
    pub fn pop(&mut self, key: &K) -> Option<V> {
        let Ok(removed) = self.intercept(Method::Pop, &DelItem, key.clone(), |map, key| {
            Ok::<_, Infallible>(map.shift_remove(&key))
        });
        removed
    }

    /// Remove `key`, or return `default` if it is missing.
    pub fn pop_or(&mut self, key: &K, default: V) -> V {
        self.pop(key).unwrap_or(default)
    }

    /// Insert every pair. Later pairs win over earlier ones with the same
    /// key; one event covers every key whose value changed.
    pub fn update<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let merged: IndexMap<K, V, S> = pairs.into_iter().collect();
        let Ok(()) = self.intercept(Method::Update, &Update, merged, |map, merged| {
            map.extend(merged);
            Ok::<_, Infallible>(())
        });
    }

    /// [`update`](Self::update) with `positional` applied first and `named`
    /// taking precedence on collision.
    pub fn update_merge<P, N>(&mut self, positional: P, named: N)
    where
        P: IntoIterator<Item = (K, V)>,
        N: IntoIterator<Item = (K, V)>,
    {
        self.update(positional.into_iter().chain(named));
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        let Ok(()) = self.intercept(Method::Clear, &Clear, (), |map, ()| {
            map.clear();
            Ok::<_, Infallible>(())
        });
    }
}
