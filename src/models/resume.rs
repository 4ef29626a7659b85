//! Résumé document types
//!
//! These are the validated shapes. Untrusted JSON goes through
//! [`validate_resume_data`](super::validation::validate_resume_data) first.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contact details. Every field is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
            && self.website.is_none()
            && self.location.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: String,
    pub position: String,
    /// Free-text date label, e.g. "Jan 2020"
    pub from: String,
    pub to: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub subject: String,
    pub mark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificationItem {
    pub title: String,
    pub issuer: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardItem {
    pub title: String,
    pub awarder: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A spoken language. `level` is free text (Beginner … Native).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageItem {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub name: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The complete résumé document.
///
/// Optional lists that were absent on input are empty here, so consumers
/// never distinguish "missing" from "empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub contact: ContactInfo,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageItem>,
    #[serde(default)]
    pub certifications: Vec<CertificationItem>,
    #[serde(default)]
    pub awards: Vec<AwardItem>,
    #[serde(default)]
    pub interests: Vec<InterestItem>,
    #[serde(default)]
    pub references: Vec<ReferenceItem>,
}

impl ResumeData {
    /// The profile used when a résumé is created without any data.
    pub fn sample() -> Self {
        Self {
            name: "Jane Doe".into(),
            title: "Full Stack Developer".into(),
            summary: "Experienced software developer with a strong background in building \
                      scalable web applications and APIs."
                .into(),
            contact: ContactInfo {
                email: Some("jane.doe@example.com".into()),
                phone: Some("+1 (555) 123-4567".into()),
                linkedin: Some("https://www.linkedin.com/in/janedoe".into()),
                github: Some("https://github.com/janedoe".into()),
                website: Some("https://janedoe.dev".into()),
                location: Some("New York, NY".into()),
            },
            experience: vec![
                ExperienceItem {
                    company: "TechCorp Inc.".into(),
                    position: "Senior Software Engineer".into(),
                    from: "Jan 2020".into(),
                    to: "Present".into(),
                    description: "Led the development of a microservices architecture \
                                  serving 1M+ monthly users."
                        .into(),
                    highlights: vec![],
                },
                ExperienceItem {
                    company: "StartupX".into(),
                    position: "Frontend Developer".into(),
                    from: "Jun 2017".into(),
                    to: "Dec 2019".into(),
                    description: "Built and maintained a React-based SPA.".into(),
                    highlights: vec![
                        "Improved app performance by 30%".into(),
                        "Led UI/UX redesign project".into(),
                        "Mentored 2 junior developers".into(),
                    ],
                },
            ],
            education: vec![EducationItem {
                institution: "State University".into(),
                degree: "B.Sc. in Computer Science".into(),
                area: None,
                from: "2013".into(),
                to: "2017".into(),
                gpa: Some("3.8".into()),
                description: Some(
                    "Graduated with honors, specializing in software engineering.".into(),
                ),
                courses: vec![
                    Course {
                        subject: "Mathematics".into(),
                        mark: "A".into(),
                    },
                    Course {
                        subject: "Science".into(),
                        mark: "B+".into(),
                    },
                ],
            }],
            skills: [
                "JavaScript",
                "TypeScript",
                "Node.js",
                "React",
                "Express",
                "SQL",
                "Docker",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            languages: vec![
                LanguageItem {
                    name: "English".into(),
                    level: "Native".into(),
                },
                LanguageItem {
                    name: "Spanish".into(),
                    level: "Intermediate".into(),
                },
                LanguageItem {
                    name: "French".into(),
                    level: "Beginner".into(),
                },
            ],
            certifications: vec![CertificationItem {
                title: "AWS Certified Solutions Architect".into(),
                issuer: "Amazon Web Services".into(),
                date: "2023".into(),
                description: Some(
                    "Professional level certification for cloud architecture".into(),
                ),
            }],
            awards: vec![],
            interests: vec![],
            references: vec![ReferenceItem {
                name: "John Smith".into(),
                position: "Senior Engineering Manager".into(),
                company: Some("TechCorp Inc.".into()),
                phone: Some("+1 (555) 987-6543".into()),
                email: Some("john.smith@techcorp.com".into()),
            }],
        }
    }
}
