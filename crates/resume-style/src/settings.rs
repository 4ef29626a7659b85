//! Style settings types, their ranges and defaults

use serde::{Deserialize, Serialize};

/// Inclusive range and default of a numeric style knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Bounds {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Whether `value` lies within the inclusive range.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// The numeric knobs of [`StyleSettings`], addressable by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    HeaderFontSize,
    BodyFontSize,
    SectionSpacing,
    SidebarSectionSpacing,
    LineHeight,
    MarginTop,
    MarginBottom,
    MarginLeft,
    MarginRight,
    SidebarWidth,
}

impl NumericField {
    pub const ALL: [NumericField; 10] = [
        NumericField::HeaderFontSize,
        NumericField::BodyFontSize,
        NumericField::SectionSpacing,
        NumericField::SidebarSectionSpacing,
        NumericField::LineHeight,
        NumericField::MarginTop,
        NumericField::MarginBottom,
        NumericField::MarginLeft,
        NumericField::MarginRight,
        NumericField::SidebarWidth,
    ];

    /// JSON key of the field
    pub fn key(self) -> &'static str {
        match self {
            NumericField::HeaderFontSize => "headerFontSize",
            NumericField::BodyFontSize => "bodyFontSize",
            NumericField::SectionSpacing => "sectionSpacing",
            NumericField::SidebarSectionSpacing => "sidebarSectionSpacing",
            NumericField::LineHeight => "lineHeight",
            NumericField::MarginTop => "marginTop",
            NumericField::MarginBottom => "marginBottom",
            NumericField::MarginLeft => "marginLeft",
            NumericField::MarginRight => "marginRight",
            NumericField::SidebarWidth => "sidebarWidth",
        }
    }

    pub fn bounds(self) -> Bounds {
        match self {
            NumericField::HeaderFontSize => Bounds::new(16.0, 24.0, 18.0),
            NumericField::BodyFontSize => Bounds::new(10.0, 16.0, 12.0),
            NumericField::SectionSpacing | NumericField::SidebarSectionSpacing => {
                Bounds::new(8.0, 32.0, 16.0)
            }
            NumericField::LineHeight => Bounds::new(1.2, 2.0, 1.5),
            NumericField::MarginTop
            | NumericField::MarginBottom
            | NumericField::MarginLeft
            | NumericField::MarginRight => Bounds::new(10.0, 40.0, 20.0),
            NumericField::SidebarWidth => Bounds::new(30.0, 45.0, 40.0),
        }
    }

    pub fn get(self, style: &StyleSettings) -> f64 {
        match self {
            NumericField::HeaderFontSize => style.header_font_size,
            NumericField::BodyFontSize => style.body_font_size,
            NumericField::SectionSpacing => style.section_spacing,
            NumericField::SidebarSectionSpacing => style.sidebar_section_spacing,
            NumericField::LineHeight => style.line_height,
            NumericField::MarginTop => style.margin_top,
            NumericField::MarginBottom => style.margin_bottom,
            NumericField::MarginLeft => style.margin_left,
            NumericField::MarginRight => style.margin_right,
            NumericField::SidebarWidth => style.sidebar_width,
        }
    }

    pub fn set(self, style: &mut StyleSettings, value: f64) {
        let slot = match self {
            NumericField::HeaderFontSize => &mut style.header_font_size,
            NumericField::BodyFontSize => &mut style.body_font_size,
            NumericField::SectionSpacing => &mut style.section_spacing,
            NumericField::SidebarSectionSpacing => &mut style.sidebar_section_spacing,
            NumericField::LineHeight => &mut style.line_height,
            NumericField::MarginTop => &mut style.margin_top,
            NumericField::MarginBottom => &mut style.margin_bottom,
            NumericField::MarginLeft => &mut style.margin_left,
            NumericField::MarginRight => &mut style.margin_right,
            NumericField::SidebarWidth => &mut style.sidebar_width,
        };
        *slot = value;
    }
}

/// The eight named color slots of [`ColorSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Primary,
    Secondary,
    Accent,
    Background,
    SidebarBackground,
    HeaderTextColor,
    BodyTextColor,
    SidebarTextColor,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 8] = [
        ColorSlot::Primary,
        ColorSlot::Secondary,
        ColorSlot::Accent,
        ColorSlot::Background,
        ColorSlot::SidebarBackground,
        ColorSlot::HeaderTextColor,
        ColorSlot::BodyTextColor,
        ColorSlot::SidebarTextColor,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ColorSlot::Primary => "primary",
            ColorSlot::Secondary => "secondary",
            ColorSlot::Accent => "accent",
            ColorSlot::Background => "background",
            ColorSlot::SidebarBackground => "sidebarBackground",
            ColorSlot::HeaderTextColor => "headerTextColor",
            ColorSlot::BodyTextColor => "bodyTextColor",
            ColorSlot::SidebarTextColor => "sidebarTextColor",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ColorSlot::Primary => "#3b82f6",
            ColorSlot::Secondary => "#64748b",
            ColorSlot::Accent => "#06b6d4",
            ColorSlot::Background => "#ffffff",
            ColorSlot::SidebarBackground => "#1e293b",
            ColorSlot::HeaderTextColor => "#1e293b",
            ColorSlot::BodyTextColor => "#374151",
            ColorSlot::SidebarTextColor => "#ffffff",
        }
    }
}

/// Color palette of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ColorSettings {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub sidebar_background: String,
    pub header_text_color: String,
    pub body_text_color: String,
    pub sidebar_text_color: String,
}

impl ColorSettings {
    pub fn get(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Primary => &self.primary,
            ColorSlot::Secondary => &self.secondary,
            ColorSlot::Accent => &self.accent,
            ColorSlot::Background => &self.background,
            ColorSlot::SidebarBackground => &self.sidebar_background,
            ColorSlot::HeaderTextColor => &self.header_text_color,
            ColorSlot::BodyTextColor => &self.body_text_color,
            ColorSlot::SidebarTextColor => &self.sidebar_text_color,
        }
    }

    pub fn set(&mut self, slot: ColorSlot, value: impl Into<String>) {
        let target = match slot {
            ColorSlot::Primary => &mut self.primary,
            ColorSlot::Secondary => &mut self.secondary,
            ColorSlot::Accent => &mut self.accent,
            ColorSlot::Background => &mut self.background,
            ColorSlot::SidebarBackground => &mut self.sidebar_background,
            ColorSlot::HeaderTextColor => &mut self.header_text_color,
            ColorSlot::BodyTextColor => &mut self.body_text_color,
            ColorSlot::SidebarTextColor => &mut self.sidebar_text_color,
        };
        *target = value.into();
    }

    /// Copy with every blank slot replaced by its default.
    pub fn resolved(&self) -> Self {
        let mut out = self.clone();
        for slot in ColorSlot::ALL {
            if out.get(slot).trim().is_empty() {
                out.set(slot, slot.default_value());
            }
        }
        out
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        let mut colors = Self {
            primary: String::new(),
            secondary: String::new(),
            accent: String::new(),
            background: String::new(),
            sidebar_background: String::new(),
            header_text_color: String::new(),
            body_text_color: String::new(),
            sidebar_text_color: String::new(),
        };
        for slot in ColorSlot::ALL {
            colors.set(slot, slot.default_value());
        }
        colors
    }
}

/// Region a movable section renders in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Sidebar,
    Main,
}

impl Placement {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sidebar" => Some(Placement::Sidebar),
            "main" => Some(Placement::Main),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Sidebar => "sidebar",
            Placement::Main => "main",
        }
    }
}

/// Numeric and color configuration controlling how a template renders.
///
/// Values built through [`crate::validate_style`] always satisfy the ranges
/// reported by [`NumericField::bounds`]. Values deserialized directly with
/// serde are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    pub header_font_size: f64,
    pub body_font_size: f64,
    pub section_spacing: f64,
    pub sidebar_section_spacing: f64,
    pub line_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Sidebar width in percent of the page width
    pub sidebar_width: f64,
    pub colors: ColorSettings,
    pub reference_placement: Placement,
    pub about_me_placement: Placement,
}

impl Default for StyleSettings {
    fn default() -> Self {
        let mut style = Self {
            header_font_size: 0.0,
            body_font_size: 0.0,
            section_spacing: 0.0,
            sidebar_section_spacing: 0.0,
            line_height: 0.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            sidebar_width: 0.0,
            colors: ColorSettings::default(),
            reference_placement: Placement::Sidebar,
            about_me_placement: Placement::Sidebar,
        };
        for field in NumericField::ALL {
            field.set(&mut style, field.bounds().default);
        }
        style
    }
}
