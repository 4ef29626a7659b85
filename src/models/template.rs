use resume_style::StyleSettings;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Columns {
    One,
    #[default]
    Two,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    #[default]
    Plain,
    /// Full-width colored band above both columns
    Banner,
    /// Photo placeholder next to the name
    PhotoInline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceStyle {
    #[default]
    Flat,
    Timeline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarDecoration {
    #[default]
    Plain,
    Photo,
    RoundedPhoto,
}

/// Structural knobs distinguishing one catalog template from another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LayoutMode {
    pub columns: Columns,
    pub header: HeaderStyle,
    pub experience: ExperienceStyle,
    pub sidebar: SidebarDecoration,
}

impl LayoutMode {
    pub fn is_two_column(&self) -> bool {
        self.columns == Columns::Two
    }

    /// Space-separated CSS classes for the page root
    pub fn css_classes(&self) -> String {
        let columns = match self.columns {
            Columns::One => "layout-one",
            Columns::Two => "layout-two",
        };
        let header = match self.header {
            HeaderStyle::Plain => "header-plain",
            HeaderStyle::Banner => "header-banner",
            HeaderStyle::PhotoInline => "header-photo-inline",
        };
        let experience = match self.experience {
            ExperienceStyle::Flat => "experience-flat",
            ExperienceStyle::Timeline => "experience-timeline",
        };
        let sidebar = match self.sidebar {
            SidebarDecoration::Plain => "sidebar-plain",
            SidebarDecoration::Photo => "sidebar-photo",
            SidebarDecoration::RoundedPhoto => "sidebar-rounded-photo",
        };
        format!("{columns} {header} {experience} {sidebar}")
    }
}

/// A catalog template: a layout plus its default style.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub layout: LayoutMode,
    pub default_style: StyleSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutMode::default();
        assert!(layout.is_two_column());
        assert_eq!(
            layout.css_classes(),
            "layout-two header-plain experience-flat sidebar-plain"
        );
    }

    #[test]
    fn test_layout_from_yaml() {
        let layout: LayoutMode =
            serde_yaml::from_str("columns: one\nheader: photo-inline\nsidebar: rounded-photo\n")
                .unwrap();
        assert_eq!(layout.columns, Columns::One);
        assert_eq!(layout.header, HeaderStyle::PhotoInline);
        assert_eq!(layout.experience, ExperienceStyle::Flat);
        assert_eq!(layout.sidebar, SidebarDecoration::RoundedPhoto);
    }
}
