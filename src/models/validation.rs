//! Validation of untrusted résumé JSON
//!
//! The walker visits the whole document and records every problem it finds
//! together with its path, so a client gets the full list in one round trip.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::resume::{
    AwardItem, CertificationItem, ContactInfo, Course, EducationItem, ExperienceItem,
    InterestItem, LanguageItem, ReferenceItem, ResumeData,
};
use resume_style::StyleError;

/// A single offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldIssue {
    /// Dotted path with list indices, e.g. `experience[0].company`
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Input rejected at a trust boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue::new(path, message)],
        }
    }

    /// Re-root every path under `prefix`, e.g. `name` becomes `resumeData.name`.
    pub fn prefixed(mut self, prefix: &str) -> Self {
        for issue in &mut self.issues {
            issue.path = join(prefix, &issue.path);
        }
        self
    }

    /// Convert a strict style failure, rooting its fields under `prefix`.
    pub fn from_style(err: StyleError, prefix: &str) -> Self {
        Self {
            issues: err
                .issues
                .into_iter()
                .map(|issue| FieldIssue::new(join(prefix, &issue.field), issue.kind.to_string()))
                .collect(),
        }
    }

    /// Merge two failures, keeping the order of both.
    pub fn merge(mut self, other: ValidationError) -> Self {
        self.issues.extend(other.issues);
        self
    }

    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

fn join(prefix: &str, path: &str) -> String {
    match (prefix.is_empty(), path.is_empty()) {
        (true, _) => path.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) if path.starts_with('[') => format!("{prefix}{path}"),
        (false, false) => format!("{prefix}.{path}"),
    }
}

/// Validate a raw résumé document.
///
/// `name`, `experience`, `education` and `skills` are required. `title`,
/// `summary` and `contact` default to empty, optional lists to empty lists.
/// Unknown fields are ignored.
pub fn validate_resume_data(raw: &Value) -> Result<ResumeData, ValidationError> {
    let mut w = Walker::default();
    let data = w.resume(raw);
    if w.issues.is_empty() {
        Ok(data)
    } else {
        Err(ValidationError { issues: w.issues })
    }
}

#[derive(Default)]
struct Walker {
    issues: Vec<FieldIssue>,
}

impl Walker {
    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(path, message));
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        match value.as_object() {
            Some(obj) => Some(obj),
            None => {
                self.issue(path, format!("expected an object, got {}", kind(value)));
                None
            }
        }
    }

    fn required_str(&mut self, obj: &Map<String, Value>, key: &str, base: &str) -> String {
        let path = join(base, key);
        match obj.get(key) {
            None | Some(Value::Null) => {
                self.issue(&path, "is required");
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                self.issue(&path, format!("expected a string, got {}", kind(other)));
                String::new()
            }
        }
    }

    /// Missing, null and blank all map to `None`.
    fn optional_str(&mut self, obj: &Map<String, Value>, key: &str, base: &str) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                let path = join(base, key);
                self.issue(&path, format!("expected a string, got {}", kind(other)));
                None
            }
        }
    }

    fn defaulted_str(&mut self, obj: &Map<String, Value>, key: &str, base: &str) -> String {
        match obj.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                let path = join(base, key);
                self.issue(&path, format!("expected a string, got {}", kind(other)));
                String::new()
            }
        }
    }

    fn email(&mut self, obj: &Map<String, Value>, key: &str, base: &str) -> Option<String> {
        let value = self.optional_str(obj, key, base)?;
        if is_email(value.trim()) {
            Some(value)
        } else {
            self.issue(&join(base, key), "must be a valid email address");
            None
        }
    }

    fn url(&mut self, obj: &Map<String, Value>, key: &str, base: &str) -> Option<String> {
        let value = self.optional_str(obj, key, base)?;
        match url::Url::parse(value.trim()) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(value),
            Ok(parsed) => {
                self.issue(
                    &join(base, key),
                    format!("must be an http or https URL (got \"{}:\")", parsed.scheme()),
                );
                None
            }
            Err(e) => {
                self.issue(&join(base, key), format!("must be a valid URL ({e})"));
                None
            }
        }
    }

    /// Walk a list field, calling `item` for every element.
    fn list<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        base: &str,
        required: bool,
        mut item: impl FnMut(&mut Self, &Value, &str) -> Option<T>,
    ) -> Vec<T> {
        let path = join(base, key);
        let values = match obj.get(key) {
            None | Some(Value::Null) => {
                if required {
                    self.issue(&path, "is required");
                }
                return Vec::new();
            }
            Some(Value::Array(values)) => values,
            Some(other) => {
                self.issue(&path, format!("expected an array, got {}", kind(other)));
                return Vec::new();
            }
        };

        values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| item(self, value, &format!("{path}[{i}]")))
            .collect()
    }

    fn string_list(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        base: &str,
        required: bool,
    ) -> Vec<String> {
        self.list(obj, key, base, required, |w, value, path| match value {
            Value::String(s) => Some(s.clone()),
            other => {
                w.issue(path, format!("expected a string, got {}", kind(other)));
                None
            }
        })
    }

    fn resume(&mut self, raw: &Value) -> ResumeData {
        let Some(obj) = self.object(raw, "") else {
            return ResumeData::default();
        };

        let contact = match obj.get("contact") {
            None | Some(Value::Null) => ContactInfo::default(),
            Some(value) => self.contact(value),
        };

        ResumeData {
            name: self.required_str(obj, "name", ""),
            title: self.defaulted_str(obj, "title", ""),
            summary: self.defaulted_str(obj, "summary", ""),
            contact,
            experience: self.list(obj, "experience", "", true, Self::experience),
            education: self.list(obj, "education", "", true, Self::education),
            skills: self.string_list(obj, "skills", "", true),
            languages: self.list(obj, "languages", "", false, Self::language),
            certifications: self.list(obj, "certifications", "", false, Self::certification),
            awards: self.list(obj, "awards", "", false, Self::award),
            interests: self.list(obj, "interests", "", false, Self::interest),
            references: self.list(obj, "references", "", false, Self::reference),
        }
    }

    fn contact(&mut self, value: &Value) -> ContactInfo {
        let Some(obj) = self.object(value, "contact") else {
            return ContactInfo::default();
        };
        let base = "contact";
        ContactInfo {
            email: self.email(obj, "email", base),
            phone: self.optional_str(obj, "phone", base),
            linkedin: self.url(obj, "linkedin", base),
            github: self.url(obj, "github", base),
            website: self.url(obj, "website", base),
            location: self.optional_str(obj, "location", base),
        }
    }

    fn experience(&mut self, value: &Value, base: &str) -> Option<ExperienceItem> {
        let obj = self.object(value, base)?;
        Some(ExperienceItem {
            company: self.required_str(obj, "company", base),
            position: self.required_str(obj, "position", base),
            from: self.required_str(obj, "from", base),
            to: self.required_str(obj, "to", base),
            description: self.required_str(obj, "description", base),
            highlights: self.string_list(obj, "highlights", base, false),
        })
    }

    fn education(&mut self, value: &Value, base: &str) -> Option<EducationItem> {
        let obj = self.object(value, base)?;
        Some(EducationItem {
            institution: self.required_str(obj, "institution", base),
            degree: self.required_str(obj, "degree", base),
            area: self.optional_str(obj, "area", base),
            from: self.required_str(obj, "from", base),
            to: self.required_str(obj, "to", base),
            gpa: self.optional_str(obj, "gpa", base),
            description: self.optional_str(obj, "description", base),
            courses: self.list(obj, "courses", base, false, |w, value, path| {
                let obj = w.object(value, path)?;
                Some(Course {
                    subject: w.required_str(obj, "subject", path),
                    mark: w.required_str(obj, "mark", path),
                })
            }),
        })
    }

    fn certification(&mut self, value: &Value, base: &str) -> Option<CertificationItem> {
        let obj = self.object(value, base)?;
        Some(CertificationItem {
            title: self.required_str(obj, "title", base),
            issuer: self.required_str(obj, "issuer", base),
            date: self.required_str(obj, "date", base),
            description: self.optional_str(obj, "description", base),
        })
    }

    fn award(&mut self, value: &Value, base: &str) -> Option<AwardItem> {
        let obj = self.object(value, base)?;
        Some(AwardItem {
            title: self.required_str(obj, "title", base),
            awarder: self.required_str(obj, "awarder", base),
            date: self.required_str(obj, "date", base),
            summary: self.optional_str(obj, "summary", base),
        })
    }

    fn language(&mut self, value: &Value, base: &str) -> Option<LanguageItem> {
        let obj = self.object(value, base)?;
        Some(LanguageItem {
            name: self.required_str(obj, "name", base),
            level: self.required_str(obj, "level", base),
        })
    }

    fn interest(&mut self, value: &Value, base: &str) -> Option<InterestItem> {
        let obj = self.object(value, base)?;
        Some(InterestItem {
            name: self.required_str(obj, "name", base),
            keywords: self.string_list(obj, "keywords", base, false),
        })
    }

    fn reference(&mut self, value: &Value, base: &str) -> Option<ReferenceItem> {
        let obj = self.object(value, base)?;
        Some(ReferenceItem {
            name: self.required_str(obj, "name", base),
            position: self.required_str(obj, "position", base),
            company: self.optional_str(obj, "company", base),
            phone: self.optional_str(obj, "phone", base),
            email: self.email(obj, "email", base),
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_email(value: &str) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}
