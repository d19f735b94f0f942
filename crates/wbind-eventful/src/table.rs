#![forbid(unsafe_code)]

//! Operation tables: which container methods realize which abstract
//! operation.
//!
//! Each container kind has one `const` table. A method appears under at most
//! one operation, and every instrumented method of the kind appears somewhere
//! in its table.

use std::fmt;

/// Abstract mutation, independent of the container method used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Operation {
    SetItem,
    DelItem,
    Append,
    Extend,
    Remove,
    Update,
    Clear,
    Reverse,
    Sort,
}

impl Operation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SetItem => "setitem",
            Self::DelItem => "delitem",
            Self::Append => "append",
            Self::Extend => "extend",
            Self::Remove => "remove",
            Self::Update => "update",
            Self::Clear => "clear",
            Self::Reverse => "reverse",
            Self::Sort => "sort",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete container method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Method {
    Set,
    SetDefault,
    Delete,
    Pop,
    Update,
    Clear,
    Append,
    Extend,
    Remove,
    Reverse,
    Sort,
    SortBy,
}

impl Method {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::SetDefault => "set_default",
            Self::Delete => "delete",
            Self::Pop => "pop",
            Self::Update => "update",
            Self::Clear => "clear",
            Self::Append => "append",
            Self::Extend => "extend",
            Self::Remove => "remove",
            Self::Reverse => "reverse",
            Self::Sort => "sort",
            Self::SortBy => "sort_by",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from abstract operation to the methods bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTable {
    entries: &'static [(Operation, &'static [Method])],
}

impl OperationTable {
    #[must_use]
    pub const fn new(entries: &'static [(Operation, &'static [Method])]) -> Self {
        Self { entries }
    }

    /// The abstract operation `method` is bound to, if any.
    #[must_use]
    pub fn operation_for(&self, method: Method) -> Option<Operation> {
        self.entries
            .iter()
            .find(|(_, methods)| methods.contains(&method))
            .map(|(op, _)| *op)
    }

    /// Methods bound to `operation` (empty if the kind does not support it).
    #[must_use]
    pub fn methods(&self, operation: Operation) -> &'static [Method] {
        self.entries
            .iter()
            .find(|(op, _)| *op == operation)
            .map_or(&[], |(_, methods)| *methods)
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.entries.iter().map(|(op, _)| *op)
    }

    #[must_use]
    pub const fn entries(&self) -> &'static [(Operation, &'static [Method])] {
        self.entries
    }
}

/// Mapping containers.
pub const DICT_TABLE: OperationTable = OperationTable::new(&[
    (Operation::SetItem, &[Method::Set, Method::SetDefault]),
    (Operation::DelItem, &[Method::Delete, Method::Pop]),
    (Operation::Update, &[Method::Update]),
    (Operation::Clear, &[Method::Clear]),
]);

/// Sequence containers.
pub const LIST_TABLE: OperationTable = OperationTable::new(&[
    (Operation::Append, &[Method::Append]),
    (Operation::Extend, &[Method::Extend]),
    (Operation::SetItem, &[Method::Set]),
    (Operation::Remove, &[Method::Remove]),
    (Operation::DelItem, &[Method::Delete, Method::Pop]),
    (Operation::Reverse, &[Method::Reverse]),
    (Operation::Sort, &[Method::Sort, Method::SortBy]),
]);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_methods_unique(table: &OperationTable) {
        let mut seen = Vec::new();
        for (_, methods) in table.entries() {
            for m in *methods {
                assert!(!seen.contains(m), "{m} bound twice");
                seen.push(*m);
            }
        }
    }

    #[test]
    fn each_method_bound_once() {
        assert_methods_unique(&DICT_TABLE);
        assert_methods_unique(&LIST_TABLE);
    }

    #[test]
    fn dict_table_lookups() {
        assert_eq!(DICT_TABLE.operation_for(Method::SetDefault), Some(Operation::SetItem));
        assert_eq!(DICT_TABLE.operation_for(Method::Pop), Some(Operation::DelItem));
        assert_eq!(DICT_TABLE.operation_for(Method::Append), None);
        assert_eq!(DICT_TABLE.methods(Operation::Update), &[Method::Update]);
        assert!(DICT_TABLE.methods(Operation::Sort).is_empty());
    }

    #[test]
    fn list_table_covers_all_sequence_operations() {
        let ops: Vec<_> = LIST_TABLE.operations().collect();
        assert_eq!(
            ops,
            vec![
                Operation::Append,
                Operation::Extend,
                Operation::SetItem,
                Operation::Remove,
                Operation::DelItem,
                Operation::Reverse,
                Operation::Sort,
            ]
        );
        assert_eq!(LIST_TABLE.operation_for(Method::SortBy), Some(Operation::Sort));
    }

    #[test]
    fn names() {
        assert_eq!(Operation::SetItem.to_string(), "setitem");
        assert_eq!(Method::SetDefault.to_string(), "set_default");
    }
}
