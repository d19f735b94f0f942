#![forbid(unsafe_code)]

//! Field types holding eventful containers.
//!
//! [`EventfulTrait`] accepts a plain container on assignment and wraps it in
//! an [`Eventful`] carrying the field's name. Every container it builds shares
//! one listener set, so container subscribers survive reassignment.
//!
//! Replacing the whole value reports a [`FieldChange`](wbind_core::FieldChange)
//! to the field's listeners; mutating in place through [`Field::get_mut`]
//! reports [`ChangeEvent`]s to the container listeners.

use std::fmt;

use wbind_core::{Field, Notifier, Result, Subscription, TraitType};

use crate::change::ChangeEvent;
use crate::dict::Dict;
use crate::hooks::Container;
use crate::protocol::{EventNotifier, Eventful};

/// Field type for an [`EventfulDict`](crate::EventfulDict).
pub type EventfulDictTrait<K, V> = EventfulTrait<Dict<K, V>>;

/// Field type for an [`EventfulList`](crate::EventfulList).
pub type EventfulListTrait<T> = EventfulTrait<Vec<T>>;

/// Trait type wrapping assigned containers in [`Eventful`].
pub struct EventfulTrait<C: Container> {
    name: String,
    notifier: EventNotifier<C>,
}

impl<C: Container> EventfulTrait<C> {
    /// Containers built by this type are named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_notifier(name, Notifier::new())
    }

    /// Share an existing listener set, e.g. an owning model's.
    pub fn with_notifier(name: impl Into<String>, notifier: EventNotifier<C>) -> Self {
        Self {
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

    fn wrap(&self, value: C) -> Eventful<C> {
        Eventful::with_notifier(self.name.clone(), value, self.notifier.clone())
    }
}

impl<C> EventfulTrait<C>
where
    C: Container + Clone + PartialEq + Default + fmt::Debug,
{
    /// A field named `name` whose containers carry the same name. Reading it
    /// before any assignment yields an empty container.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Field<Self> {
        let name = name.into();
        let ty = Self::new(name.clone());
        Field::new(name, ty)
    }
}

impl<C> EventfulTrait<C>
where
    C: Container,
    C::Key: 'static,
    C::Value: 'static,
{
    /// Register a listener for in-place mutations of every container this
    /// type builds.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn observe(
        &self,
        callback: impl Fn(&ChangeEvent<C::Key, C::Value>) + 'static,
    ) -> Subscription {
        self.notifier.subscribe(callback)
    }
}

impl<C: Container> fmt::Debug for EventfulTrait<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventfulTrait")
            .field("name", &self.name)
            .field("kind", &C::KIND)
            .field("subscribers", &self.notifier.subscriber_count())
            .finish()
    }
}

impl<C> TraitType for EventfulTrait<C>
where
    C: Container + Clone + PartialEq + Default + fmt::Debug,
{
    type Input = C;
    type Value = Eventful<C>;

    fn info(&self) -> &'static str {
        "an eventful container"
    }

    fn validate(&self, input: C) -> Result<Eventful<C>> {
        Ok(self.wrap(input))
    }

    fn make_default(&self) -> Result<Option<Eventful<C>>> {
        Ok(Some(self.wrap(C::default())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Operation;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn list_field_reports_reassignment_and_in_place_mutation() {
        let mut labels: Field<EventfulListTrait<String>> = EventfulListTrait::field("labels");

        let assigned = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&assigned);
        let _field_sub = labels.observe(move |c| {
            a.borrow_mut().push(c.new.as_ref().map(|list| list.to_vec()));
        });
        let mutated = Rc::new(RefCell::new(Vec::new()));
        let m = Rc::clone(&mutated);
        let _list_sub = labels.trait_type().observe(move |e| {
            m.borrow_mut().push((e.name.clone(), e.operation));
        });

        assert!(labels.set(strings(&["a"])).unwrap());
        assert!(!labels.set(strings(&["a"])).unwrap());

        let list = labels.get_mut().unwrap().unwrap();
        assert_eq!(list.name(), "labels");
        list.append("b".to_string());
        assert_eq!(**labels.get().unwrap().unwrap(), strings(&["a", "b"]));

        assert!(labels.set(Vec::new()).unwrap());
        labels.get_mut().unwrap().unwrap().append("c".to_string());

        assert_eq!(
            *assigned.borrow(),
            vec![Some(strings(&["a"])), Some(Vec::new())]
        );
        assert_eq!(
            *mutated.borrow(),
            vec![
                ("labels".to_string(), Operation::Append),
                ("labels".to_string(), Operation::Append),
            ]
        );
    }

    #[test]
    fn dict_field_defaults_to_an_empty_named_container() {
        let mut series: Field<EventfulDictTrait<String, i64>> = EventfulDictTrait::field("series");

        let records = Rc::new(RefCell::new(Vec::new()));
        let r = Rc::clone(&records);
        let _dict_sub = series
            .trait_type()
            .observe(move |e| r.borrow_mut().push((e.name.clone(), e.records().len())));
        let old_lens = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&old_lens);
        let _field_sub = series.observe(move |c| {
            o.borrow_mut()
                .push(c.old.present().and_then(Option::as_ref).map(|d| d.len()));
        });

        let dict = series.get_mut().unwrap().unwrap();
        assert!(dict.is_empty());
        dict.update([("a".to_string(), 1), ("b".to_string(), 2)]);

        let replacement: Dict<String, i64> = [("z".to_string(), 26)].into_iter().collect();
        assert!(series.set(replacement).unwrap());
        series.get_mut().unwrap().unwrap().set("z".to_string(), 0);

        assert_eq!(*old_lens.borrow(), vec![Some(2)]);
        assert_eq!(
            *records.borrow(),
            vec![("series".to_string(), 2), ("series".to_string(), 1)]
        );
    }

    #[test]
    fn shared_notifier_spans_fields() {
        let shared: EventNotifier<Vec<u8>> = Notifier::new();
        let mut x = Field::new("x", EventfulListTrait::<u8>::with_notifier("x", shared.clone()));
        let mut y = Field::new("y", EventfulListTrait::<u8>::with_notifier("y", shared.clone()));

        let names = Rc::new(RefCell::new(Vec::new()));
        let n = Rc::clone(&names);
        let _sub = shared.subscribe(move |e: &ChangeEvent<usize, u8>| {
            n.borrow_mut().push(e.name.clone());
        });

        x.get_mut().unwrap().unwrap().append(1);
        y.set(vec![7]).unwrap();
        y.get_mut().unwrap().unwrap().append(2);

        assert_eq!(*names.borrow(), vec!["x".to_string(), "y".to_string()]);
        assert!(format!("{:?}", x.trait_type()).contains("elist"));
    }
}
