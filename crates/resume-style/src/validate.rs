//! Turning untrusted JSON into [`StyleSettings`]

use std::fmt;

use serde_json::{Map, Value};

use crate::color::{parse_css_color, ParseColorError};
use crate::settings::{ColorSettings, ColorSlot, NumericField, Placement, StyleSettings};

/// How to treat fields that are present but invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Replace the offending value with its default
    Lenient,
    /// Reject the whole style
    Strict,
}

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    NotAnObject,
    NotANumber,
    NotAString,
    OutOfRange { min: f64, max: f64, found: f64 },
    InvalidColor(ParseColorError),
    UnknownPlacement(String),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::NotAnObject => write!(f, "must be an object"),
            IssueKind::NotANumber => write!(f, "must be a number"),
            IssueKind::NotAString => write!(f, "must be a string"),
            IssueKind::OutOfRange { min, max, found } => {
                write!(f, "must be between {} and {} (got {})", min, max, found)
            }
            IssueKind::InvalidColor(err) => write!(f, "invalid color: {}", err),
            IssueKind::UnknownPlacement(value) => {
                write!(f, "must be \"sidebar\" or \"main\" (got \"{}\")", value)
            }
        }
    }
}

/// A rejected field and the reason.
///
/// `field` is a dotted path relative to the style object, e.g.
/// `colors.primary`. It is empty when the style itself is not an object.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleIssue {
    pub field: String,
    pub kind: IssueKind,
}

impl StyleIssue {
    fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for StyleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.field, self.kind)
        }
    }
}

/// Strict validation failure, carrying every offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleError {
    pub issues: Vec<StyleIssue>,
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid style settings")?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for StyleError {}

/// Resolve `raw` into settings, substituting defaults for anything invalid.
///
/// Never fails. The second element lists every field that was replaced
/// because it was present but invalid; missing and `null` fields are not
/// reported.
pub fn resolve_style(raw: &Value) -> (StyleSettings, Vec<StyleIssue>) {
    let mut style = StyleSettings::default();
    let mut issues = Vec::new();

    let obj = match raw {
        Value::Null => return (style, issues),
        Value::Object(obj) => obj,
        _ => {
            issues.push(StyleIssue::new("", IssueKind::NotAnObject));
            return (style, issues);
        }
    };

    for field in NumericField::ALL {
        let Some(value) = present(obj, field.key()) else {
            continue;
        };
        let Some(number) = value.as_f64() else {
            issues.push(StyleIssue::new(field.key(), IssueKind::NotANumber));
            continue;
        };
        let bounds = field.bounds();
        if bounds.contains(number) {
            field.set(&mut style, number);
        } else {
            issues.push(StyleIssue::new(
                field.key(),
                IssueKind::OutOfRange {
                    min: bounds.min,
                    max: bounds.max,
                    found: number,
                },
            ));
        }
    }

    match present(obj, "colors") {
        None => {}
        Some(Value::Object(colors)) => resolve_colors(colors, &mut style.colors, &mut issues),
        Some(_) => issues.push(StyleIssue::new("colors", IssueKind::NotAnObject)),
    }

    if let Some(p) = resolve_placement(obj, "referencePlacement", &mut issues) {
        style.reference_placement = p;
    }
    if let Some(p) = resolve_placement(obj, "aboutMePlacement", &mut issues) {
        style.about_me_placement = p;
    }

    (style, issues)
}

/// Validate `raw` according to `mode`.
///
/// In [`Validation::Lenient`] mode this always succeeds.
pub fn validate_style(raw: &Value, mode: Validation) -> Result<StyleSettings, StyleError> {
    let (style, issues) = resolve_style(raw);
    match mode {
        Validation::Strict if !issues.is_empty() => Err(StyleError { issues }),
        _ => Ok(style),
    }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn resolve_colors(
    raw: &Map<String, Value>,
    colors: &mut ColorSettings,
    issues: &mut Vec<StyleIssue>,
) {
    for slot in ColorSlot::ALL {
        let Some(value) = present(raw, slot.key()) else {
            continue;
        };
        let path = format!("colors.{}", slot.key());
        let Some(s) = value.as_str() else {
            issues.push(StyleIssue::new(path, IssueKind::NotAString));
            continue;
        };
        // Blank means "use the default"
        if s.trim().is_empty() {
            continue;
        }
        match parse_css_color(s) {
            Ok(()) => colors.set(slot, s.trim()),
            Err(err) => issues.push(StyleIssue::new(path, IssueKind::InvalidColor(err))),
        }
    }
}

fn resolve_placement(
    obj: &Map<String, Value>,
    key: &str,
    issues: &mut Vec<StyleIssue>,
) -> Option<Placement> {
    let value = present(obj, key)?;
    let Some(s) = value.as_str() else {
        issues.push(StyleIssue::new(key, IssueKind::NotAString));
        return None;
    };
    let placement = Placement::parse(s);
    if placement.is_none() {
        issues.push(StyleIssue::new(
            key,
            IssueKind::UnknownPlacement(s.to_string()),
        ));
    }
    placement
}
