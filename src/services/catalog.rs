//! Template and preset catalogs
//!
//! Both are built once from [`AppConfig`] at startup and never mutated.

use resume_style::{is_css_color, resolve_style, ColorSlot, StyleSettings};
use std::collections::HashSet;

use crate::models::{AppConfig, LayoutMode, Preset, Template, TemplateConfig};

/// The catalog of renderable templates
pub struct TemplateCatalog {
    templates: Vec<Template>,
    default_index: usize,
}

impl TemplateCatalog {
    pub fn from_config(config: &AppConfig) -> Self {
        let mut seen = HashSet::new();
        let mut templates: Vec<Template> = Vec::with_capacity(config.templates.len());

        for entry in &config.templates {
            if !seen.insert(entry.id.clone()) {
                tracing::warn!(template_id = %entry.id, "Duplicate template id in config, ignoring");
                continue;
            }
            templates.push(Self::build(entry));
        }

        if templates.is_empty() {
            tracing::warn!("No templates configured, using built-in default");
            templates.push(Template {
                id: config.default_template.clone(),
                name: "Default".to_string(),
                description: String::new(),
                layout: LayoutMode::default(),
                default_style: StyleSettings::default(),
            });
        }

        let default_index = templates
            .iter()
            .position(|t| t.id == config.default_template)
            .unwrap_or_else(|| {
                tracing::warn!(
                    default_template = %config.default_template,
                    fallback = %templates[0].id,
                    "Configured default template not in catalog"
                );
                0
            });

        tracing::info!(templates = templates.len(), "Template catalog initialized");

        Self {
            templates,
            default_index,
        }
    }

    fn build(entry: &TemplateConfig) -> Template {
        let raw = serde_json::to_value(&entry.default_style).unwrap_or_default();
        let (default_style, issues) = resolve_style(&raw);
        for issue in &issues {
            tracing::warn!(template_id = %entry.id, %issue, "Invalid default style value, using default");
        }

        Template {
            id: entry.id.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            layout: entry.layout,
            default_style,
        }
    }

    /// All templates in catalog order
    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn default_template(&self) -> &Template {
        &self.templates[self.default_index]
    }

    /// Look up a template, falling back to the default for unknown ids.
    pub fn resolve(&self, id: &str) -> &Template {
        self.get(id).unwrap_or_else(|| {
            let fallback = self.default_template();
            tracing::warn!(
                template_id = id,
                fallback = %fallback.id,
                "Unknown template, falling back to default"
            );
            fallback
        })
    }
}

/// The catalog of color presets
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn from_config(config: &AppConfig) -> Self {
        let presets = config.presets.iter().map(Self::sanitize).collect::<Vec<_>>();
        tracing::info!(presets = presets.len(), "Preset catalog initialized");
        Self { presets }
    }

    fn sanitize(preset: &Preset) -> Preset {
        let mut preset = preset.clone();
        for slot in ColorSlot::ALL {
            let value = preset.preset_values.get(slot);
            if !is_css_color(value) {
                tracing::warn!(
                    preset = %preset.preset_id,
                    slot = slot.key(),
                    value,
                    "Invalid preset color, using default"
                );
                preset.preset_values.set(slot, slot.default_value());
            }
        }
        preset
    }

    /// Presets in catalog order, optionally only those offered for `template_id`
    pub fn list(&self, template_id: Option<&str>) -> Vec<Preset> {
        self.presets
            .iter()
            .filter(|p| template_id.map_or(true, |id| p.applies_to(id)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::models::{Columns, PresetCategory};
    use resume_style::ColorSettings;

    fn entry(id: &str, style: &str) -> TemplateConfig {
        TemplateConfig {
            id: id.to_string(),
            name: format!("Template {id}"),
            description: String::new(),
            layout: LayoutMode::default(),
            default_style: serde_yaml::from_str(style).unwrap(),
        }
    }

    fn config(templates: Vec<TemplateConfig>) -> AppConfig {
        AppConfig {
            templates,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let catalog = TemplateCatalog::from_config(&config(vec![
            entry("1", "{}"),
            entry("2", "{}"),
        ]));
        assert_eq!(catalog.resolve("2").id, "2");
        assert_eq!(catalog.resolve("does-not-exist").id, "1");
        assert!(catalog.get("does-not-exist").is_none());
    }

    #[test]
    fn test_default_style_is_resolved_leniently() {
        let catalog = TemplateCatalog::from_config(&config(vec![entry(
            "1",
            "bodyFontSize: 14\nheaderFontSize: 99\ncolors:\n  primary: \"#0f766e\"\n",
        )]));
        let style = &catalog.get("1").unwrap().default_style;
        assert_eq!(style.body_font_size, 14.0);
        assert_eq!(style.header_font_size, 18.0);
        assert_eq!(style.colors.primary, "#0f766e");
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut second = entry("1", "{}");
        second.name = "Second".into();
        let catalog = TemplateCatalog::from_config(&config(vec![entry("1", "{}"), second]));
        assert_eq!(catalog.all().len(), 1);
        assert_eq!(catalog.get("1").unwrap().name, "Template 1");
    }

    #[test]
    fn test_empty_catalog_gets_builtin_default() {
        let catalog = TemplateCatalog::from_config(&config(vec![]));
        assert_eq!(catalog.all().len(), 1);
        assert_eq!(catalog.default_template().id, "1");
    }

    #[test]
    fn test_missing_default_uses_first() {
        let mut cfg = config(vec![entry("5", "{}"), entry("6", "{}")]);
        cfg.default_template = "1".into();
        let catalog = TemplateCatalog::from_config(&cfg);
        assert_eq!(catalog.default_template().id, "5");
    }

    #[test]
    fn test_embedded_catalog() {
        let config = AppConfig::load_from_assets(&AssetLoader::new(None, None));
        let catalog = TemplateCatalog::from_config(&config);

        let ids: Vec<&str> = catalog.all().iter().map(|t| t.id.as_str()).collect();
        let expected: Vec<String> = (1..=16).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(catalog
            .all()
            .iter()
            .any(|t| t.layout.columns == Columns::One));
    }

    #[test]
    fn test_presets_filter_and_sanitize() {
        let mut bad = ColorSettings::default();
        bad.accent = "not a color".into();
        let cfg = AppConfig {
            presets: vec![
                Preset {
                    name: "A".into(),
                    class_name: "a".into(),
                    category: PresetCategory::Dark,
                    for_templates: vec!["1".into()],
                    preset_id: "a".into(),
                    preset_values: bad,
                },
                Preset {
                    name: "B".into(),
                    class_name: "b".into(),
                    category: PresetCategory::Light,
                    for_templates: vec!["2".into()],
                    preset_id: "b".into(),
                    preset_values: ColorSettings::default(),
                },
            ],
            ..AppConfig::default()
        };
        let catalog = PresetCatalog::from_config(&cfg);

        assert_eq!(catalog.list(None).len(), 2);
        let for_one = catalog.list(Some("1"));
        assert_eq!(for_one.len(), 1);
        assert_eq!(for_one[0].preset_values.accent, "#06b6d4");
        assert!(catalog.list(Some("9")).is_empty());
    }
}
