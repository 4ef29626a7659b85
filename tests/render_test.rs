//! Markup tests across the whole template catalog.

mod common;

use common::{fixtures, TestApp};
use pretty_assertions::assert_eq;
use resume_style::{Placement, StyleSettings};
use resumeforge::models::{validate_resume_data, ResumeData};
use resumeforge::server::AppState;
use resumeforge::services::{ExportRequest, MarkupDocument};
use scraper::{Html, Selector};
use serde_json::json;

fn markup(
    state: &AppState,
    data: &ResumeData,
    style: &StyleSettings,
    template_id: &str,
) -> MarkupDocument {
    let request = ExportRequest {
        data: data.clone(),
        style: style.clone(),
        template_id: template_id.to_string(),
    };
    state.exporter.markup(&request).expect("render failed")
}

fn render(state: &AppState, data: &ResumeData, style: &StyleSettings, template_id: &str) -> Html {
    Html::parse_document(markup(state, data, style, template_id).as_str())
}

fn count(doc: &Html, selector: &str) -> usize {
    doc.select(&Selector::parse(selector).unwrap()).count()
}

fn texts(doc: &Html, selector: &str) -> Vec<String> {
    doc.select(&Selector::parse(selector).unwrap())
        .map(|e| e.text().collect::<String>().trim().to_string())
        .collect()
}

fn full() -> ResumeData {
    validate_resume_data(&fixtures::full_resume()).unwrap()
}

fn is_two_column(state: &AppState, template_id: &str) -> bool {
    state
        .catalog
        .get(template_id)
        .unwrap()
        .layout
        .is_two_column()
}

#[test]
fn test_empty_skills_omit_section_everywhere() {
    let state = TestApp::create_state();
    let mut data = full();
    data.skills.clear();

    for id in fixtures::templates::ALL {
        let doc = render(&state, &data, &StyleSettings::default(), id);
        assert_eq!(count(&doc, "section.section-skills"), 0, "template {id}");
        assert_eq!(count(&doc, "section.section-experience"), 1, "template {id}");
    }
}

#[test]
fn test_skills_render_once_in_order() {
    let state = TestApp::create_state();
    let data = full();

    for id in fixtures::templates::ALL {
        let doc = render(&state, &data, &StyleSettings::default(), id);
        assert_eq!(count(&doc, "section.section-skills"), 1, "template {id}");
        assert_eq!(
            texts(&doc, "section.section-skills li.skill"),
            vec!["Rust", "SQL", "Kubernetes"],
            "template {id}"
        );
    }
}

#[test]
fn test_every_section_appears_exactly_once() {
    let state = TestApp::create_state();
    let data = full();
    let slugs = [
        "contact",
        "about-me",
        "experience",
        "education",
        "skills",
        "languages",
        "certifications",
        "awards",
        "interests",
        "references",
    ];

    for id in fixtures::templates::ALL {
        let doc = render(&state, &data, &StyleSettings::default(), id);
        for slug in slugs {
            assert_eq!(
                count(&doc, &format!("section[data-section=\"{slug}\"]")),
                1,
                "template {id}, section {slug}"
            );
        }
    }
}

#[test]
fn test_reference_placement_moves_section() {
    let state = TestApp::create_state();
    let data = full();
    let mut main = StyleSettings::default();
    main.reference_placement = Placement::Main;

    for id in fixtures::templates::ALL {
        if !is_two_column(&state, id) {
            continue;
        }

        let doc = render(&state, &data, &StyleSettings::default(), id);
        assert_eq!(count(&doc, "aside.sidebar section.section-references"), 1, "template {id}");
        assert_eq!(count(&doc, "main.main section.section-references"), 0, "template {id}");

        let doc = render(&state, &data, &main, id);
        assert_eq!(count(&doc, "aside.sidebar section.section-references"), 0, "template {id}");
        assert_eq!(count(&doc, "main.main section.section-references"), 1, "template {id}");
    }
}

#[test]
fn test_about_me_placement_moves_section() {
    let state = TestApp::create_state();
    let data = full();
    let mut main = StyleSettings::default();
    main.about_me_placement = Placement::Main;

    let doc = render(&state, &data, &StyleSettings::default(), "1");
    assert_eq!(count(&doc, "aside.sidebar section.section-about-me"), 1);

    let doc = render(&state, &data, &main, "1");
    assert_eq!(count(&doc, "aside.sidebar section.section-about-me"), 0);
    assert_eq!(count(&doc, "main.main section.section-about-me"), 1);
}

#[test]
fn test_single_column_has_no_sidebar() {
    let state = TestApp::create_state();
    let data = full();

    let doc = render(
        &state,
        &data,
        &StyleSettings::default(),
        fixtures::templates::SINGLE_COLUMN,
    );
    assert_eq!(count(&doc, "aside"), 0);
    assert_eq!(count(&doc, "main.main section.section-references"), 1);
    assert_eq!(count(&doc, "main.main section.section-skills"), 1);
}

#[test]
fn test_timeline_layout() {
    let state = TestApp::create_state();
    let data = full();

    let doc = render(&state, &data, &StyleSettings::default(), fixtures::templates::TIMELINE);
    assert_eq!(count(&doc, "div.page.experience-timeline"), 1);
    assert_eq!(count(&doc, "section.section-experience div.entries.timeline"), 1);
    assert_eq!(
        texts(&doc, "section.section-experience h3.position"),
        vec!["Senior Engineer", "Engineer"]
    );
}

#[test]
fn test_unknown_template_falls_back_to_default() {
    let state = TestApp::create_state();
    let data = full();

    let doc = render(&state, &data, &StyleSettings::default(), "does-not-exist");
    assert_eq!(count(&doc, "div.page[data-template=\"1\"]"), 1);
}

#[test]
fn test_rendering_is_deterministic() {
    let state = TestApp::create_state();
    let data = full();
    let style = StyleSettings::default();

    for id in fixtures::templates::ALL {
        let first = markup(&state, &data, &style, id);
        let second = markup(&state, &data, &style, id);
        assert_eq!(first, second, "template {id}");
    }
}

#[test]
fn test_user_text_is_escaped() {
    let state = TestApp::create_state();
    let raw = json!({
        "name": "<script>alert(1)</script>",
        "experience": [],
        "education": [],
        "skills": ["<b>bold</b>"]
    });
    let data = validate_resume_data(&raw).unwrap();

    let markup = markup(&state, &data, &StyleSettings::default(), "1");
    assert!(!markup.as_str().contains("<script>alert(1)</script>"));
    assert!(!markup.as_str().contains("<b>bold</b>"));

    let doc = Html::parse_document(markup.as_str());
    assert_eq!(texts(&doc, "li.skill"), vec!["<b>bold</b>"]);
}
