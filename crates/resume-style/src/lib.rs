//! resume-style: the style contract shared by every résumé template
//!
//! A template is rendered from two inputs: the résumé document and a
//! [`StyleSettings`] value. This crate owns the second one. It defines the
//! numeric layout knobs, the eight color slots and the two placement toggles,
//! together with their documented ranges and defaults.
//!
//! # Quick Start
//!
//! ```
//! use resume_style::{validate_style, StyleSettings, Validation};
//! use serde_json::json;
//!
//! let raw = json!({ "bodyFontSize": 14, "colors": { "primary": "#0f766e" } });
//! let style = validate_style(&raw, Validation::Strict).unwrap();
//!
//! assert_eq!(style.body_font_size, 14.0);
//! assert_eq!(style.header_font_size, StyleSettings::default().header_font_size);
//! ```
//!
//! # Validation Modes
//!
//! Missing or `null` fields always take their documented default. What
//! happens to a field that is *present but wrong* depends on the mode:
//!
//! - [`Validation::Strict`] rejects it. The returned [`StyleError`] lists
//!   every offending field, not just the first one. Used where data crosses a
//!   trust boundary (persistence, PDF export).
//! - [`Validation::Lenient`] replaces it with the default and carries on.
//!   Used for live preview and for catalog defaults read from configuration.
//!
//! ```
//! use resume_style::{validate_style, Validation};
//! use serde_json::json;
//!
//! let raw = json!({ "bodyFontSize": 50 });
//!
//! assert!(validate_style(&raw, Validation::Strict).is_err());
//! let style = validate_style(&raw, Validation::Lenient).unwrap();
//! assert_eq!(style.body_font_size, 12.0);
//! ```
//!
//! Unknown fields are ignored in both modes so older clients and newer
//! servers can talk to each other.
//!
//! # Colors
//!
//! Color slots hold CSS color strings. [`parse_css_color`] accepts hex
//! notation (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), the `rgb()`, `rgba()`,
//! `hsl()` and `hsla()` functions, `transparent`, and CSS named colors. The
//! value is only checked, never normalized: what the user typed is what the
//! template receives.

pub mod color;
pub mod settings;
pub mod validate;

pub use color::{is_css_color, parse_css_color, ParseColorError};
pub use settings::{Bounds, ColorSettings, ColorSlot, NumericField, Placement, StyleSettings};
pub use validate::{resolve_style, validate_style, IssueKind, StyleError, StyleIssue, Validation};
