#![forbid(unsafe_code)]

//! Instance references that can be given as a mapping of constructor
//! arguments.
//!
//! [`InstanceDict<T>`] accepts either an already built `T` or a string-keyed
//! mapping whose entries become `T`'s named constructor arguments. Building
//! goes through `T`'s `Deserialize` impl, so unknown or missing arguments are
//! handled according to `T`'s serde attributes (`deny_unknown_fields`,
//! `default`, ...).

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use wbind_core::{Error, Result, TraitType};

/// Input accepted by [`InstanceDict`].
pub enum Coerce {
    /// Named constructor arguments.
    Mapping(Map<String, Value>),
    /// An already built value of some type.
    Instance {
        value: Box<dyn Any>,
        type_name: &'static str,
    },
}

impl Coerce {
    #[must_use]
    pub fn instance<U: Any>(value: U) -> Self {
        Self::Instance {
            value: Box::new(value),
            type_name: type_name::<U>(),
        }
    }
}

impl From<Map<String, Value>> for Coerce {
    fn from(map: Map<String, Value>) -> Self {
        Self::Mapping(map)
    }
}

impl fmt::Debug for Coerce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Self::Instance { type_name, .. } => f
                .debug_struct("Instance")
                .field("type_name", type_name)
                .finish_non_exhaustive(),
        }
    }
}

/// Trait type holding a `T`, coercing mappings into new instances.
///
/// The default is built per field from the stored default arguments, empty
/// unless set with [`with_args`](Self::with_args) or
/// [`with_kwargs`](Self::with_kwargs).
#[derive(Debug, Clone)]
pub struct InstanceDict<T> {
    args: Vec<Value>,
    kwargs: Map<String, Value>,
    _target: PhantomData<fn() -> T>,
}

impl<T> Default for InstanceDict<T> {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            kwargs: Map::new(),
            _target: PhantomData,
        }
    }
}

impl<T> InstanceDict<T>
where
    T: DeserializeOwned + Clone + PartialEq + fmt::Debug + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional default arguments, matched to `T`'s fields in order.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Named default arguments.
    #[must_use]
    pub fn with_kwargs(mut self, kwargs: Map<String, Value>) -> Self {
        self.kwargs = kwargs;
        self
    }

    fn construct(arguments: Value) -> Result<T> {
        serde_json::from_value(arguments).map_err(|e| Error::Construct {
            target: type_name::<T>(),
            reason: e.to_string(),
        })
    }
}

impl<T> TraitType for InstanceDict<T>
where
    T: DeserializeOwned + Clone + PartialEq + fmt::Debug + 'static,
{
    type Input = Coerce;
    type Value = T;

    fn info(&self) -> &'static str {
        type_name::<T>()
    }

    fn validate(&self, input: Coerce) -> Result<T> {
        match input {
            Coerce::Mapping(map) => {
                tracing::trace!(message = "instance.coerce", ty = type_name::<T>(), args = map.len());
                Self::construct(Value::Object(map))
            }
            Coerce::Instance { value, type_name: found } => value
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| Error::WrongType {
                    expected: type_name::<T>(),
                    found: found.to_string(),
                }),
        }
    }

    fn make_default(&self) -> Result<Option<T>> {
        let arguments = match (self.args.is_empty(), self.kwargs.is_empty()) {
            (true, _) => Value::Object(self.kwargs.clone()),
            (false, true) => Value::Array(self.args.clone()),
            (false, false) => {
                return Err(Error::Construct {
                    target: type_name::<T>(),
                    reason: "positional and named default arguments cannot be combined".into(),
                });
            }
        };
        Self::construct(arguments).map(Some)
    }
}
