//! CSS color syntax checking
//!
//! Only the syntax is checked. Values are passed to the template verbatim.

use std::fmt;
use std::num::ParseFloatError;

/// Named colors accepted in addition to hex and functional notation.
const NAMED_COLORS: &[&str] = &[
    "aqua",
    "black",
    "blue",
    "brown",
    "coral",
    "crimson",
    "cyan",
    "darkblue",
    "darkgray",
    "darkgreen",
    "darkgrey",
    "darkred",
    "darkslategray",
    "dimgray",
    "firebrick",
    "fuchsia",
    "gold",
    "gray",
    "green",
    "grey",
    "indigo",
    "ivory",
    "lightblue",
    "lightgray",
    "lightgrey",
    "lime",
    "maroon",
    "navy",
    "olive",
    "orange",
    "pink",
    "purple",
    "red",
    "royalblue",
    "silver",
    "slategray",
    "steelblue",
    "teal",
    "tomato",
    "white",
    "whitesmoke",
    "yellow",
];

/// Error type for color strings that are not valid CSS colors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Empty or whitespace-only input
    Empty,
    /// Hex string has invalid length (must be 3, 4, 6 or 8 digits after '#')
    InvalidHexLength(usize),
    /// Invalid hexadecimal character encountered
    InvalidHexDigit(char),
    /// Functional notation with the wrong number of components
    WrongComponentCount {
        /// Function name, e.g. `rgb`
        function: String,
        /// Number of components found
        found: usize,
    },
    /// A component of a functional notation is not a number
    InvalidComponent(ParseFloatError),
    /// Neither hex, functional notation, nor a known color name
    UnknownName(String),
}

impl From<ParseFloatError> for ParseColorError {
    fn from(err: ParseFloatError) -> Self {
        ParseColorError::InvalidComponent(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Empty => write!(f, "color is empty"),
            ParseColorError::InvalidHexLength(len) => {
                write!(
                    f,
                    "invalid hex color length {} (expected 3, 4, 6 or 8 digits)",
                    len
                )
            }
            ParseColorError::InvalidHexDigit(c) => write!(f, "invalid hex digit '{}'", c),
            ParseColorError::WrongComponentCount { function, found } => {
                write!(
                    f,
                    "{}() expects 3 or 4 components, found {}",
                    function, found
                )
            }
            ParseColorError::InvalidComponent(err) => {
                write!(f, "invalid color component: {}", err)
            }
            ParseColorError::UnknownName(name) => write!(f, "unknown color name '{}'", name),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidComponent(err) => Some(err),
            _ => None,
        }
    }
}

/// Check that `input` is a CSS color this crate accepts.
///
/// # Example
///
/// ```
/// use resume_style::parse_css_color;
///
/// assert!(parse_css_color("#1e293b").is_ok());
/// assert!(parse_css_color("rgba(255, 255, 255, 0.3)").is_ok());
/// assert!(parse_css_color("#12345").is_err());
/// ```
pub fn parse_css_color(input: &str) -> Result<(), ParseColorError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    for function in ["rgba", "rgb", "hsla", "hsl"] {
        if let Some(rest) = lower.strip_prefix(function) {
            if let Some(args) = rest
                .trim_start()
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
            {
                return parse_components(function, args);
            }
        }
    }

    if lower == "transparent" || lower == "currentcolor" || NAMED_COLORS.contains(&lower.as_str())
    {
        Ok(())
    } else {
        Err(ParseColorError::UnknownName(s.to_string()))
    }
}

/// Convenience wrapper around [`parse_css_color`].
pub fn is_css_color(input: &str) -> bool {
    parse_css_color(input).is_ok()
}

fn parse_hex(hex: &str) -> Result<(), ParseColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ParseColorError::InvalidHexDigit(c));
    }
    match hex.len() {
        3 | 4 | 6 | 8 => Ok(()),
        len => Err(ParseColorError::InvalidHexLength(len)),
    }
}

fn parse_components(function: &str, args: &str) -> Result<(), ParseColorError> {
    let components: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    if !(3..=4).contains(&components.len()) {
        return Err(ParseColorError::WrongComponentCount {
            function: function.to_string(),
            found: components.len(),
        });
    }

    for component in components {
        let number = component
            .strip_suffix('%')
            .or_else(|| component.strip_suffix("deg"))
            .unwrap_or(component);
        number.parse::<f64>()?;
    }

    Ok(())
}
