#![forbid(unsafe_code)]

//! Number format specifiers in the d3-format mini-language.
//!
//! Grammar: `[[fill]align][sign][symbol][0][width][,][.precision][type]`
//! where `align` is one of `<>=^`, `sign` one of `+- (`, `symbol` `$` or `#`,
//! and `type` a single letter or `%` (letters matched case-insensitively).
//! Only the type codes in [`NUMBER_FORMAT_TYPES`] are accepted.
//!
//! Width and precision are digit runs of any length; values past `usize::MAX`
//! saturate. The pattern is anchored at the true end of the input, so a
//! trailing newline (`".3f\n"`) is rejected.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use wbind_core::{Error, Result, TraitType};

const INFO: &str = "a valid number format";

/// Accepted type codes. The empty code means "no type".
pub const NUMBER_FORMAT_TYPES: [&str; 14] =
    ["e", "f", "g", "r", "s", "%", "p", "b", "o", "d", "x", "X", "c", ""];

fn specifier() -> &'static Regex {
    static SPEC: OnceLock<Regex> = OnceLock::new();
    SPEC.get_or_init(|| {
        Regex::new(r"(?i)^(?:(.)?([<>=^]))?([+\-( ])?([$#])?(0)?([0-9]+)?(,)?(\.[0-9]+)?([a-z%])?$")
            .expect("number format pattern compiles")
    })
}

/// Components of a parsed format specifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: Option<char>,
    pub align: Option<char>,
    pub sign: Option<char>,
    pub symbol: Option<char>,
    pub zero: bool,
    pub width: Option<usize>,
    pub comma: bool,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl FormatSpec {
    /// Parse `spec`, checking both the grammar and the type code.
    ///
    /// # Errors
    ///
    /// [`Error::Invalid`] when `spec` does not match the grammar,
    /// [`Error::UnsupportedFormatType`] when the type code is not one of
    /// [`NUMBER_FORMAT_TYPES`].
    pub fn parse(spec: &str) -> Result<Self> {
        let caps = specifier()
            .captures(spec)
            .ok_or_else(|| Error::invalid(INFO, &spec))?;

        if let Some(kind) = caps.get(9)
            && !NUMBER_FORMAT_TYPES.contains(&kind.as_str())
        {
            return Err(Error::UnsupportedFormatType {
                allowed: NUMBER_FORMAT_TYPES.to_vec(),
                found: kind.as_str().to_string(),
            });
        }

        let number = |group: usize, skip: usize| {
            caps.get(group)
                .map(|m| saturating_digits(&m.as_str()[skip..]))
        };

        Ok(Self {
            fill: first_char(&caps, 1),
            align: first_char(&caps, 2),
            sign: first_char(&caps, 3),
            symbol: first_char(&caps, 4),
            zero: caps.get(5).is_some(),
            width: number(6, 0),
            comma: caps.get(7).is_some(),
            precision: number(8, 1),
            kind: first_char(&caps, 9),
        })
    }
}

fn saturating_digits(digits: &str) -> usize {
    digits.bytes().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    })
}

fn first_char(caps: &Captures<'_>, group: usize) -> Option<char> {
    caps.get(group).and_then(|m| m.as_str().chars().next())
}

/// Trait type holding a number format specifier such as `".3f"`. Has no
/// default; accepted strings are stored unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberFormat;

impl TraitType for NumberFormat {
    type Input = String;
    type Value = String;

    fn info(&self) -> &'static str {
        INFO
    }

    fn validate(&self, input: String) -> Result<String> {
        FormatSpec::parse(&input)?;
        Ok(input)
    }
}
