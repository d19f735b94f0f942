#![forbid(unsafe_code)]

//! HTML color strings.
//!
//! A color is either one of the CSS named colors (matched case-insensitively)
//! or a hex triplet `#RGB` / `#RRGGBB`. Accepted strings are stored exactly as
//! given. Matching is exact: surrounding whitespace, including a trailing
//! newline such as `"#fff\n"`, is rejected.

use std::sync::OnceLock;

use regex::Regex;
use wbind_core::{Error, Result, TraitType};

/// CSS named colors, sorted.
pub const COLOR_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkkhaki", "darkmagenta", "darkolivegreen",
    "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen", "darkslateblue",
    "darkslategray", "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray",
    "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite",
    "gold", "goldenrod", "gray", "green", "greenyellow", "honeydew", "hotpink", "indianred",
    "indigo", "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon",
    "lightblue", "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon",
    "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
    "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue",
    "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab",
    "orange", "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise",
    "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple",
    "rebeccapurple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown",
    "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
    "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

fn hex_color() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| {
        Regex::new(r"^#[a-fA-F0-9]{3}(?:[a-fA-F0-9]{3})?$").expect("hex color pattern compiles")
    })
}

/// Whether `value` is a named color or a hex triplet.
#[must_use]
pub fn is_valid_color(value: &str) -> bool {
    COLOR_NAMES
        .binary_search(&value.to_lowercase().as_str())
        .is_ok()
        || hex_color().is_match(value)
}

/// Trait type holding a valid HTML color such as `"blue"`, `"#060482"` or
/// `"#A80"`. Has no default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color;

impl TraitType for Color {
    type Input = String;
    type Value = String;

    fn info(&self) -> &'static str {
        "a valid HTML color"
    }

    fn validate(&self, input: String) -> Result<String> {
        if is_valid_color(&input) {
            Ok(input)
        } else {
            Err(Error::invalid(self.info(), &input))
        }
    }
}
