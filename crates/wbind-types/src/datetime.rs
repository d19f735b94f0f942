#![forbid(unsafe_code)]

//! Date and date-time trait types and their wire codec.
//!
//! The presentation layer builds dates from constructor components, with
//! 0-based months and plural time unit names:
//!
//! ```text
//! {"year": 2015, "month": 4, "date": 12, "hours": 0, "minutes": 0,
//!  "seconds": 0, "milliseconds": 0.0}      // 2015-05-12
//! ```
//!
//! Milliseconds are fractional so microsecond resolution survives a round
//! trip. `None` is encoded as `None` (JSON `null`) in both directions. A leap
//! second is carried as `seconds: 59` with `milliseconds` of 1000 or more.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wbind_core::{Error, Result, TraitType};

/// Date components as exchanged with the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateWire {
    pub year: i32,
    /// 0-based month.
    pub month: u32,
    /// Day of month.
    pub date: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: f64,
}

/// A value with a wire encoding.
pub trait WireDate: Sized {
    /// Description used in validation errors.
    const INFO: &'static str;

    fn to_wire(&self) -> DateWire;

    /// # Errors
    ///
    /// Returns a validation error when the components do not form a valid
    /// value.
    fn from_wire(wire: &DateWire) -> Result<Self>;
}

fn wire_date(wire: &DateWire, info: &'static str) -> Result<NaiveDate> {
    wire.month
        .checked_add(1)
        .and_then(|month| NaiveDate::from_ymd_opt(wire.year, month, wire.date))
        .ok_or_else(|| Error::invalid(info, wire))
}

impl WireDate for NaiveDate {
    const INFO: &'static str = "a valid date";

    fn to_wire(&self) -> DateWire {
        DateWire {
            year: self.year(),
            month: self.month0(),
            date: self.day(),
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0.0,
        }
    }

    fn from_wire(wire: &DateWire) -> Result<Self> {
        wire_date(wire, Self::INFO)
    }
}

impl WireDate for NaiveDateTime {
    const INFO: &'static str = "a valid datetime";

    fn to_wire(&self) -> DateWire {
        let micros = self.nanosecond() / 1_000;
        DateWire {
            year: self.year(),
            month: self.month0(),
            date: self.day(),
            hours: self.hour(),
            minutes: self.minute(),
            seconds: self.second(),
            milliseconds: f64::from(micros) / 1_000.0,
        }
    }

    fn from_wire(wire: &DateWire) -> Result<Self> {
        let date = wire_date(wire, Self::INFO)?;
        let micros = (wire.milliseconds * 1_000.0).round();
        // Leap seconds extend the fraction past one second; chrono only
        // accepts that at second 59.
        if !(0.0..2_000_000.0).contains(&micros) {
            return Err(Error::invalid(Self::INFO, wire));
        }
        let micros = micros as u32;
        NaiveTime::from_hms_micro_opt(wire.hours, wire.minutes, wire.seconds, micros)
            .map(|time| date.and_time(time))
            .ok_or_else(|| Error::invalid(Self::INFO, wire))
    }
}

#[must_use]
pub fn to_wire<T: WireDate>(value: Option<&T>) -> Option<DateWire> {
    value.map(WireDate::to_wire)
}

/// # Errors
///
/// Returns a validation error when `wire` does not describe a valid value.
pub fn from_wire<T: WireDate>(wire: Option<&DateWire>) -> Result<Option<T>> {
    wire.map(T::from_wire).transpose()
}

/// [`to_wire`] rendered as JSON.
#[must_use]
pub fn to_json<T: WireDate>(value: Option<&T>) -> Value {
    match to_wire(value) {
        None => Value::Null,
        Some(w) => json!({
            "year": w.year,
            "month": w.month,
            "date": w.date,
            "hours": w.hours,
            "minutes": w.minutes,
            "seconds": w.seconds,
            "milliseconds": w.milliseconds,
        }),
    }
}

/// [`from_wire`] reading JSON.
///
/// # Errors
///
/// Returns a validation error when `json` is neither `null` nor a valid wire
/// object.
pub fn from_json<T: WireDate>(json: &Value) -> Result<Option<T>> {
    if json.is_null() {
        return Ok(None);
    }
    let wire = DateWire::deserialize(json).map_err(|_| Error::invalid(T::INFO, json))?;
    T::from_wire(&wire).map(Some)
}

/// Trait type holding a date. Defaults to 1900-01-01.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Date;

impl TraitType for Date {
    type Input = NaiveDate;
    type Value = NaiveDate;

    fn info(&self) -> &'static str {
        "a date"
    }

    fn validate(&self, input: NaiveDate) -> Result<NaiveDate> {
        Ok(input)
    }

    fn make_default(&self) -> Result<Option<NaiveDate>> {
        Ok(NaiveDate::from_ymd_opt(1900, 1, 1))
    }
}

/// Trait type holding a date and time. Defaults to 1900-01-01 00:00.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Datetime;

impl TraitType for Datetime {
    type Input = NaiveDateTime;
    type Value = NaiveDateTime;

    fn info(&self) -> &'static str {
        "a datetime"
    }

    fn validate(&self, input: NaiveDateTime) -> Result<NaiveDateTime> {
        Ok(input)
    }

    fn make_default(&self) -> Result<Option<NaiveDateTime>> {
        Ok(NaiveDate::from_ymd_opt(1900, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)))
    }
}
