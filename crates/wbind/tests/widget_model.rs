//! A widget-like owner with validated fields and eventful container fields,
//! all reporting into one change log.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use wbind::prelude::*;
use wbind::types::datetime;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Layout {
    width: Option<String>,
    height: Option<String>,
}

type Log = Rc<RefCell<Vec<String>>>;

struct Chart {
    accent: Field<Color>,
    tick_format: Field<NumberFormat>,
    updated: Field<Datetime>,
    layout: Field<InstanceDict<Layout>>,
    series: Field<EventfulDictTrait<String, i64>>,
    labels: Field<EventfulListTrait<String>>,
    _subs: Vec<Subscription>,
}

impl Chart {
    fn new(log: &Log) -> Self {
        let accent = Field::new("accent", Color).allow_none(true);
        let tick_format = Field::new("tick_format", NumberFormat).with_default(String::new());
        let updated = Field::new("updated", Datetime);
        let layout = Field::new("layout", InstanceDict::<Layout>::new());
        let series: Field<EventfulDictTrait<String, i64>> = EventfulDictTrait::field("series");
        let labels: Field<EventfulListTrait<String>> = EventfulListTrait::field("labels");

        let mut subs = Vec::new();
        let l = Rc::clone(log);
        subs.push(accent.observe(move |c| {
            l.borrow_mut()
                .push(format!("{}: {:?} -> {:?}", c.name, c.old.present().cloned().flatten(), c.new));
        }));
        let l = Rc::clone(log);
        subs.push(tick_format.observe(move |c| {
            l.borrow_mut().push(format!("{}: {:?}", c.name, c.new));
        }));
        let l = Rc::clone(log);
        subs.push(layout.observe(move |c| {
            l.borrow_mut().push(format!("{} changed", c.name));
        }));
        let l = Rc::clone(log);
        subs.push(series.trait_type().observe(move |e: &ChangeEvent<String, i64>| {
            l.borrow_mut()
                .push(format!("{}.{}: {} record(s)", e.name, e.method, e.records().len()));
        }));
        let l = Rc::clone(log);
        subs.push(labels.trait_type().observe(move |e: &ChangeEvent<usize, String>| {
            l.borrow_mut()
                .push(format!("{}.{}: {} record(s)", e.name, e.operation, e.records().len()));
        }));
        let l = Rc::clone(log);
        subs.push(labels.observe(move |c| {
            l.borrow_mut().push(format!("{} replaced", c.name));
        }));

        Self {
            accent,
            tick_format,
            updated,
            layout,
            series,
            labels,
            _subs: subs,
        }
    }

    fn series(&mut self) -> &mut EventfulDict<String, i64> {
        self.series.get_mut().unwrap().unwrap()
    }

    fn labels(&mut self) -> &mut EventfulList<String> {
        self.labels.get_mut().unwrap().unwrap()
    }

    fn state(&mut self) -> Result<Value> {
        let updated = datetime::to_json(self.updated.get()?);
        let accent = self.accent.get()?.cloned();
        let format = self.tick_format.get()?.cloned();
        let series: Map<String, Value> = self
            .series
            .get()?
            .into_iter()
            .flat_map(|dict| dict.iter())
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect();
        let labels = self.labels.get()?.map(|list| list.to_vec());
        Ok(json!({
            "accent": accent,
            "tick_format": format,
            "updated": updated,
            "series": series,
            "labels": labels,
        }))
    }
}

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn fields_and_containers_report_into_one_log() {
    let log = new_log();
    let mut chart = Chart::new(&log);

    assert!(chart.accent.set("Navy".to_string()).unwrap());
    assert!(!chart.accent.set("Navy".to_string()).unwrap());
    assert!(chart.accent.set("not-a-color".to_string()).is_err());
    assert!(chart.accent.set_none().unwrap());

    chart.tick_format.set(",.2f".to_string()).unwrap();
    let err = chart.tick_format.set(".2q".to_string()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormatType { .. }));

    chart.series().update([("a".to_string(), 1), ("b".to_string(), 2)]);
    chart.series().set("a".to_string(), 1);
    chart.series().clear();

    chart.labels().extend(["x".to_string(), "y".to_string()]);
    chart.labels().sort_by(|a, b| b.cmp(a));
    assert!(chart.labels.set(vec!["z".to_string()]).unwrap());
    chart.labels().append("w".to_string());

    assert_eq!(
        *log.borrow(),
        vec![
            "accent: None -> Some(\"Navy\")",
            "accent: Some(\"Navy\") -> None",
            "tick_format: Some(\",.2f\")",
            "series.update: 2 record(s)",
            "series.clear: 2 record(s)",
            "labels.extend: 2 record(s)",
            "labels.sort: 1 record(s)",
            "labels replaced",
            "labels.append: 1 record(s)",
        ]
    );
}

#[test]
fn state_snapshot_uses_the_wire_codec() {
    let log = new_log();
    let mut chart = Chart::new(&log);

    assert!(matches!(chart.state(), Err(Error::NoDefault { .. })));

    chart.accent.set("#0af".to_string()).unwrap();
    chart
        .updated
        .set(
            NaiveDate::from_ymd_opt(2015, 5, 12)
                .unwrap()
                .and_hms_milli_opt(8, 30, 0, 250)
                .unwrap(),
        )
        .unwrap();
    chart.series().set("n".to_string(), 3);
    chart.labels().append("q1".to_string());

    let state = chart.state().unwrap();
    assert_eq!(state["accent"], "#0af");
    assert_eq!(state["tick_format"], "");
    assert_eq!(state["updated"]["month"], 4);
    assert_eq!(state["updated"]["milliseconds"], 250.0);
    assert_eq!(state["series"]["n"], 3);
    assert_eq!(state["labels"], json!(["q1"]));
}

#[test]
fn layout_is_coerced_from_a_mapping() {
    let log = new_log();
    let mut chart = Chart::new(&log);

    assert_eq!(chart.layout.get().unwrap(), Some(&Layout::default()));

    let Value::Object(args) = json!({"width": "50%"}) else {
        unreachable!()
    };
    assert!(chart.layout.set(Coerce::Mapping(args)).unwrap());
    assert_eq!(
        chart.layout.get().unwrap().and_then(|l| l.width.as_deref()),
        Some("50%")
    );

    let err = chart.layout.set(Coerce::instance(7u32)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(*log.borrow(), vec!["layout changed"]);
}

#[test]
fn fresh_owners_do_not_share_defaults() {
    let log = new_log();
    let mut first = Chart::new(&log);
    let mut second = Chart::new(&log);

    let Value::Object(args) = json!({"height": "1em"}) else {
        unreachable!()
    };
    first.layout.set(Coerce::Mapping(args)).unwrap();
    assert_eq!(second.layout.get().unwrap(), Some(&Layout::default()));
}

#[test]
fn shared_notifier_sees_every_container() {
    let notifier: Notifier<ChangeEvent<usize, i32>> = Notifier::new();
    let mut a = Eventful::with_notifier("a", vec![1, 2], notifier.clone());
    let mut b = Eventful::with_notifier("b", Vec::<i32>::new(), notifier.clone());

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let _sub = notifier.subscribe(move |e: &ChangeEvent<usize, i32>| {
        s.borrow_mut().push((e.name.clone(), e.operation, e.change.clone()));
    });

    a.remove(&2).unwrap();
    b.append(9);
    assert!(a.remove(&42).is_err());

    assert_eq!(
        *seen.borrow(),
        vec![
            ("a".to_string(), Operation::Remove, Change::Delete { key: 1, old: 2 }),
            (
                "b".to_string(),
                Operation::Append,
                Change::Set {
                    key: 0,
                    old: Slot::Absent,
                    new: 9
                }
            ),
        ]
    );
}

#[cfg(feature = "serde")]
#[test]
fn change_events_serialize_for_transport() {
    let mut list = EventfulList::new("xs", vec![1]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let _sub = list.observe(move |e| s.borrow_mut().push(serde_json::to_value(e).unwrap()));

    list.set(0, 5).unwrap();
    let events = seen.borrow();
    assert_eq!(events[0]["name"], "xs");
    assert_eq!(events[0]["operation"], "setitem");
    assert_eq!(events[0]["change"]["set"]["old"]["Present"], 1);
}
