//! Résumé markup rendering
//!
//! Turns a validated [`ResumeData`] and [`StyleSettings`] into one
//! self-contained HTML document. The same markup feeds the live preview and
//! the PDF engine, so the two cannot drift apart.

use resume_style::{is_css_color, ColorSlot, StyleSettings};
use serde::Serialize;
use tera::{Context, Tera};

use super::sections::{SectionKind, SectionPlan};
use crate::assets::AssetLoader;
use crate::error::TemplateError;
use crate::models::{
    ExperienceStyle, HeaderStyle, ResumeData, SidebarDecoration, Template,
};

/// Template files, in the order they are registered with Tera
pub const TEMPLATE_FILES: [&str; 3] = ["base.html", "header.html", "resume.html"];

const ENTRY_TEMPLATE: &str = "resume.html";

/// A rendered résumé
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    pub template_id: String,
    pub html: String,
}

impl MarkupDocument {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

/// Renders résumés with the Tera templates from the asset loader
pub struct ResumeRenderer {
    tera: Tera,
}

impl ResumeRenderer {
    /// Load and compile the markup templates
    pub fn new(loader: &AssetLoader) -> Result<Self, TemplateError> {
        let mut sources = Vec::with_capacity(TEMPLATE_FILES.len());
        for name in TEMPLATE_FILES {
            sources.push((name, loader.read_template_string(name)?));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;

        tracing::info!(templates = TEMPLATE_FILES.len(), "Resume renderer initialized");

        Ok(Self { tera })
    }

    /// Render `data` with `style` using `template`'s layout.
    ///
    /// Identical inputs always produce byte-identical output.
    pub fn render(
        &self,
        data: &ResumeData,
        style: &StyleSettings,
        template: &Template,
    ) -> Result<MarkupDocument, TemplateError> {
        let plan = SectionPlan::build(data, style, &template.layout);
        let page = PageView::new(data, style, template, &plan);

        let context = Context::from_serialize(&page)?;
        let html = self.tera.render(ENTRY_TEMPLATE, &context)?;

        tracing::debug!(
            template_id = %template.id,
            sidebar_sections = plan.sidebar.len(),
            main_sections = plan.main.len(),
            bytes = html.len(),
            "Rendered resume markup"
        );

        Ok(MarkupDocument {
            template_id: template.id.clone(),
            html,
        })
    }
}

/// Format a number with at most two decimals and no trailing zeros
pub fn fmt_num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn pt(value: f64) -> String {
    format!("{}pt", fmt_num(value))
}

fn px(value: f64) -> String {
    format!("{}px", fmt_num(value))
}

/// Font sizes derived from the two base sizes
#[derive(Debug, Serialize)]
struct FontSizes {
    name: String,
    title: String,
    section_heading: String,
    body: String,
    sidebar_heading: String,
    position: String,
    company: String,
    detail: String,
    meta: String,
}

impl FontSizes {
    fn new(style: &StyleSettings) -> Self {
        let header = style.header_font_size;
        let body = style.body_font_size;
        Self {
            name: pt(header * 1.5),
            title: pt(header * 0.8),
            section_heading: pt(header),
            body: pt(body),
            sidebar_heading: pt(body * 1.2),
            position: pt(body * 1.1),
            company: pt(body * 0.95),
            detail: pt(body * 0.9),
            meta: pt(body * 0.85),
        }
    }
}

#[derive(Debug, Serialize)]
struct Palette {
    primary: String,
    secondary: String,
    accent: String,
    background: String,
    sidebar_background: String,
    header_text: String,
    body_text: String,
    sidebar_text: String,
}

impl Palette {
    fn new(style: &StyleSettings) -> Self {
        let colors = style.colors.resolved();
        // Anything that is not a plain CSS color never reaches the stylesheet
        let pick = |slot: ColorSlot| {
            let value = colors.get(slot).trim();
            if is_css_color(value) {
                value.to_string()
            } else {
                slot.default_value().to_string()
            }
        };
        Self {
            primary: pick(ColorSlot::Primary),
            secondary: pick(ColorSlot::Secondary),
            accent: pick(ColorSlot::Accent),
            background: pick(ColorSlot::Background),
            sidebar_background: pick(ColorSlot::SidebarBackground),
            header_text: pick(ColorSlot::HeaderTextColor),
            body_text: pick(ColorSlot::BodyTextColor),
            sidebar_text: pick(ColorSlot::SidebarTextColor),
        }
    }
}

#[derive(Debug, Serialize)]
struct Metrics {
    line_height: String,
    section_spacing: String,
    sidebar_section_spacing: String,
    margin_top: String,
    margin_bottom: String,
    margin_left: String,
    margin_right: String,
    sidebar_width: String,
}

impl Metrics {
    fn new(style: &StyleSettings) -> Self {
        Self {
            line_height: fmt_num(style.line_height),
            section_spacing: px(style.section_spacing),
            sidebar_section_spacing: px(style.sidebar_section_spacing),
            margin_top: px(style.margin_top),
            margin_bottom: px(style.margin_bottom),
            margin_left: px(style.margin_left),
            margin_right: px(style.margin_right),
            sidebar_width: format!("{}%", fmt_num(style.sidebar_width)),
        }
    }
}

#[derive(Debug, Serialize)]
struct ContactEntry {
    kind: &'static str,
    label: &'static str,
    value: String,
    href: Option<String>,
}

fn contact_entries(data: &ResumeData) -> Vec<ContactEntry> {
    let c = &data.contact;
    let fields: [(&'static str, &'static str, &Option<String>, Option<&str>); 6] = [
        ("email", "Email", &c.email, Some("mailto:")),
        ("phone", "Phone", &c.phone, Some("tel:")),
        ("location", "Location", &c.location, None),
        ("website", "Website", &c.website, Some("")),
        ("linkedin", "LinkedIn", &c.linkedin, Some("")),
        ("github", "GitHub", &c.github, Some("")),
    ];

    fields
        .into_iter()
        .filter_map(|(kind, label, value, scheme)| {
            let value = value.as_deref()?.trim();
            if value.is_empty() {
                return None;
            }
            Some(ContactEntry {
                kind,
                label,
                value: value.to_string(),
                href: scheme
                    .map(|s| format!("{s}{}", value.replace(' ', "")))
                    .filter(|href| is_safe_href(href)),
            })
        })
        .collect()
}

/// Only web, mail and phone links reach the markup
fn is_safe_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    ["http://", "https://", "mailto:", "tel:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

#[derive(Debug, Serialize)]
struct SectionView {
    slug: &'static str,
    heading: &'static str,
}

#[derive(Debug, Serialize)]
struct RegionView {
    name: &'static str,
    sections: Vec<SectionView>,
}

fn region(name: &'static str, kinds: &[SectionKind]) -> RegionView {
    RegionView {
        name,
        sections: kinds
            .iter()
            .map(|k| SectionView {
                slug: k.slug(),
                heading: k.heading(),
            })
            .collect(),
    }
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Everything the templates see
#[derive(Debug, Serialize)]
struct PageView<'a> {
    template_id: &'a str,
    layout_classes: String,
    two_column: bool,
    header_style: &'static str,
    header_in_main: bool,
    timeline: bool,
    sidebar_photo: Option<&'static str>,
    initials: String,
    fonts: FontSizes,
    colors: Palette,
    metrics: Metrics,
    resume: &'a ResumeData,
    contact: Vec<ContactEntry>,
    regions: Vec<RegionView>,
}

impl<'a> PageView<'a> {
    fn new(
        data: &'a ResumeData,
        style: &StyleSettings,
        template: &'a Template,
        plan: &SectionPlan,
    ) -> Self {
        let layout = &template.layout;
        let two_column = layout.is_two_column();

        let header_style = match layout.header {
            HeaderStyle::Plain => "plain",
            HeaderStyle::Banner => "banner",
            HeaderStyle::PhotoInline => "photo-inline",
        };
        let sidebar_photo = match layout.sidebar {
            SidebarDecoration::Plain => None,
            SidebarDecoration::Photo => Some("photo"),
            SidebarDecoration::RoundedPhoto => Some("rounded-photo"),
        };

        let mut regions = Vec::with_capacity(2);
        if two_column {
            regions.push(region("sidebar", &plan.sidebar));
        }
        regions.push(region("main", &plan.main));

        Self {
            template_id: &template.id,
            layout_classes: layout.css_classes(),
            two_column,
            header_style,
            header_in_main: two_column && layout.header == HeaderStyle::Plain,
            timeline: layout.experience == ExperienceStyle::Timeline,
            sidebar_photo: sidebar_photo.filter(|_| two_column),
            initials: initials(&data.name),
            fonts: FontSizes::new(style),
            colors: Palette::new(style),
            metrics: Metrics::new(style),
            resume: data,
            contact: contact_entries(data),
            regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LayoutMode, ResumeData};
    use pretty_assertions::assert_eq;

    fn renderer() -> ResumeRenderer {
        ResumeRenderer::new(&AssetLoader::new(None, None)).unwrap()
    }

    fn template(layout: LayoutMode) -> Template {
        Template {
            id: "1".into(),
            name: "Test".into(),
            description: String::new(),
            layout,
            default_style: StyleSettings::default(),
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(10.8), "10.8");
        assert_eq!(fmt_num(13.2), "13.2");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
        assert_eq!(fmt_num(12.0 * 0.85), "10.2");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn test_font_scaling() {
        let fonts = FontSizes::new(&StyleSettings::default());
        assert_eq!(fonts.name, "27pt");
        assert_eq!(fonts.title, "14.4pt");
        assert_eq!(fonts.section_heading, "18pt");
        assert_eq!(fonts.body, "12pt");
        assert_eq!(fonts.sidebar_heading, "14.4pt");
        assert_eq!(fonts.position, "13.2pt");
        assert_eq!(fonts.company, "11.4pt");
        assert_eq!(fonts.detail, "10.8pt");
        assert_eq!(fonts.meta, "10.2pt");
    }

    #[test]
    fn test_palette_rejects_non_colors() {
        let mut style = StyleSettings::default();
        style.colors.primary = "red; } body { display: none".into();
        style.colors.accent = "".into();
        let palette = Palette::new(&style);
        assert_eq!(palette.primary, "#3b82f6");
        assert_eq!(palette.accent, "#06b6d4");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Jane Doe"), "JD");
        assert_eq!(initials("jane"), "J");
        assert_eq!(initials("Mary Ann Smith"), "MA");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_contact_entries_skip_blank() {
        let mut data = ResumeData::sample();
        data.contact.phone = Some("  ".into());
        let entries = contact_entries(&data);
        let kinds: Vec<&str> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["email", "location", "website", "linkedin", "github"]);
        assert_eq!(
            entries[0].href.as_deref(),
            Some("mailto:jane.doe@example.com")
        );
        assert_eq!(entries[1].href, None);
    }

    #[test]
    fn test_contact_links_drop_script_schemes() {
        let mut data = ResumeData::sample();
        data.contact.website = Some("javascript:alert(document.domain)".into());
        data.contact.linkedin = Some("https://linkedin.com/in/jane".into());
        let entries = contact_entries(&data);
        let website = entries.iter().find(|e| e.kind == "website").unwrap();
        assert_eq!(website.href, None);
        let linkedin = entries.iter().find(|e| e.kind == "linkedin").unwrap();
        assert_eq!(linkedin.href.as_deref(), Some("https://linkedin.com/in/jane"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let r = renderer();
        let data = ResumeData::sample();
        let style = StyleSettings::default();
        let t = template(LayoutMode::default());

        let a = r.render(&data, &style, &t).unwrap();
        let b = r.render(&data, &style, &t).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.template_id, "1");
    }

    #[test]
    fn test_render_contains_print_rules() {
        let doc = renderer()
            .render(
                &ResumeData::sample(),
                &StyleSettings::default(),
                &template(LayoutMode::default()),
            )
            .unwrap();
        let html = doc.as_str();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("size: A4"));
        assert!(html.contains("print-color-adjust: exact"));
        assert!(html.contains("width: 40%"));
        assert!(html.contains("font-size: 27pt"));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let mut data = ResumeData::sample();
        data.name = "<script>alert(1)</script>".into();
        let doc = renderer()
            .render(
                &data,
                &StyleSettings::default(),
                &template(LayoutMode::default()),
            )
            .unwrap();
        assert!(!doc.as_str().contains("<script>"));
        assert!(doc.as_str().contains("&lt;script&gt;"));
    }
}
