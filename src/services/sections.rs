//! Which sections appear, and where
//!
//! Every template shares this module: a section is either present in exactly
//! one region or absent, regardless of layout.

use resume_style::{Placement, StyleSettings};

use crate::models::{LayoutMode, ResumeData};

/// Résumé sections in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Contact,
    AboutMe,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Awards,
    Interests,
    References,
}

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        SectionKind::Contact,
        SectionKind::AboutMe,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Languages,
        SectionKind::Certifications,
        SectionKind::Awards,
        SectionKind::Interests,
        SectionKind::References,
    ];

    /// Identifier used in markup (`data-section` attribute, template dispatch)
    pub fn slug(self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::AboutMe => "about-me",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Languages => "languages",
            SectionKind::Certifications => "certifications",
            SectionKind::Awards => "awards",
            SectionKind::Interests => "interests",
            SectionKind::References => "references",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Contact => "Contact",
            SectionKind::AboutMe => "About Me",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Languages => "Languages",
            SectionKind::Certifications => "Certifications",
            SectionKind::Awards => "Awards",
            SectionKind::Interests => "Interests",
            SectionKind::References => "References",
        }
    }

    /// Whether the section has anything to show.
    ///
    /// Lists are omitted when empty, text when blank.
    pub fn is_present(self, data: &ResumeData) -> bool {
        match self {
            SectionKind::Contact => !data.contact.is_empty(),
            SectionKind::AboutMe => !data.summary.trim().is_empty(),
            SectionKind::Experience => !data.experience.is_empty(),
            SectionKind::Education => !data.education.is_empty(),
            SectionKind::Skills => !data.skills.is_empty(),
            SectionKind::Languages => !data.languages.is_empty(),
            SectionKind::Certifications => !data.certifications.is_empty(),
            SectionKind::Awards => !data.awards.is_empty(),
            SectionKind::Interests => !data.interests.is_empty(),
            SectionKind::References => !data.references.is_empty(),
        }
    }

    /// Region the section renders in for a two-column layout
    pub fn home(self, style: &StyleSettings) -> Placement {
        match self {
            SectionKind::AboutMe => style.about_me_placement,
            SectionKind::References => style.reference_placement,
            SectionKind::Contact
            | SectionKind::Skills
            | SectionKind::Languages
            | SectionKind::Certifications
            | SectionKind::Interests => Placement::Sidebar,
            SectionKind::Experience | SectionKind::Education | SectionKind::Awards => {
                Placement::Main
            }
        }
    }
}

/// Sections per region, each in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionPlan {
    pub sidebar: Vec<SectionKind>,
    pub main: Vec<SectionKind>,
}

impl SectionPlan {
    pub fn build(data: &ResumeData, style: &StyleSettings, layout: &LayoutMode) -> Self {
        let mut plan = Self::default();
        for kind in SectionKind::ALL {
            if !kind.is_present(data) {
                continue;
            }
            let region = if layout.is_two_column() {
                kind.home(style)
            } else {
                Placement::Main
            };
            match region {
                Placement::Sidebar => plan.sidebar.push(kind),
                Placement::Main => plan.main.push(kind),
            }
        }
        plan
    }
}
