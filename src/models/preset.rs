use resume_style::ColorSettings;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PresetCategory {
    #[serde(rename = "dark colors")]
    Dark,
    #[serde(rename = "Light colors")]
    Light,
}

/// A named color palette offered for a set of templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,
    /// CSS class the client uses for the preset button
    pub class_name: String,
    pub category: PresetCategory,
    #[serde(default)]
    pub for_templates: Vec<String>,
    pub preset_id: String,
    #[serde(default)]
    pub preset_values: ColorSettings,
}

impl Preset {
    pub fn applies_to(&self, template_id: &str) -> bool {
        self.for_templates.iter().any(|t| t == template_id)
    }
}
