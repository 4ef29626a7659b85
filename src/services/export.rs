//! PDF export and HTML preview
//!
//! Both take the same request body: `{resumeData, styleSettings, templateId}`.
//! Export validates everything strictly. Preview validates the résumé strictly
//! but styles leniently, so a half-edited style form still shows something.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use regex::Regex;
use resume_style::{resolve_style, validate_style, StyleSettings, Validation};
use serde_json::Value;

use super::catalog::TemplateCatalog;
use super::pdf_engine::{BrowserPool, PdfEngine};
use super::renderer::{MarkupDocument, ResumeRenderer};
use crate::error::{ExportError, RenderError, TemplateError};
use crate::models::{validate_resume_data, ResumeData, ValidationError};

/// A parsed export request
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub data: ResumeData,
    pub style: StyleSettings,
    pub template_id: String,
}

impl ExportRequest {
    /// Parse a raw request body, collecting every problem before failing.
    ///
    /// `styleSettings` may also be spelled `style`; when absent, all style
    /// values take their defaults.
    pub fn parse(raw: &Value, mode: Validation) -> Result<Self, ValidationError> {
        let Some(obj) = raw.as_object() else {
            return Err(ValidationError::single("", "request body must be a JSON object"));
        };

        let mut errors: Option<ValidationError> = None;
        let mut fail = |err: ValidationError| {
            errors = Some(match errors.take() {
                Some(prev) => prev.merge(err),
                None => err,
            });
        };

        let data = match obj.get("resumeData") {
            None | Some(Value::Null) => {
                fail(ValidationError::single("resumeData", "is required"));
                None
            }
            Some(raw_data) => match validate_resume_data(raw_data) {
                Ok(data) => Some(data),
                Err(e) => {
                    fail(e.prefixed("resumeData"));
                    None
                }
            },
        };

        let raw_style = obj
            .get("styleSettings")
            .or_else(|| obj.get("style"))
            .unwrap_or(&Value::Null);
        let style = match mode {
            Validation::Strict => match validate_style(raw_style, Validation::Strict) {
                Ok(style) => Some(style),
                Err(e) => {
                    fail(ValidationError::from_style(e, "styleSettings"));
                    None
                }
            },
            Validation::Lenient => {
                let (style, issues) = resolve_style(raw_style);
                for issue in &issues {
                    tracing::debug!(issue = %issue, "Style value replaced by default");
                }
                Some(style)
            }
        };

        let template_id = match obj.get("templateId") {
            None | Some(Value::Null) => {
                fail(ValidationError::single("templateId", "is required"));
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                fail(ValidationError::single("templateId", "must not be empty"));
                None
            }
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => {
                fail(ValidationError::single("templateId", "must be a string"));
                None
            }
        };

        match (data, style, template_id, errors) {
            (Some(data), Some(style), Some(template_id), None) => Ok(Self {
                data,
                style,
                template_id,
            }),
            (_, _, _, Some(errors)) => Err(errors),
            // Every `None` above records an error
            _ => Err(ValidationError::single("", "invalid request")),
        }
    }
}

/// A finished PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl PdfDocument {
    /// `Content-Disposition` header value
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Download name for a résumé owner, e.g. `resume-jane-doe.pdf`
pub fn pdf_filename(name: &str) -> String {
    static NON_ALNUM: OnceLock<Option<Regex>> = OnceLock::new();

    let lower = name.to_lowercase();
    let slug = match NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").ok()) {
        Some(re) => re.replace_all(&lower, "-").trim_matches('-').to_string(),
        None => String::new(),
    };

    if slug.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("resume-{slug}.pdf")
    }
}

/// Renders requests to markup and prints them through the browser pool
pub struct PdfExporter {
    renderer: Arc<ResumeRenderer>,
    catalog: Arc<TemplateCatalog>,
    pool: BrowserPool,
    engine: Arc<dyn PdfEngine>,
}

impl PdfExporter {
    pub fn new(
        renderer: Arc<ResumeRenderer>,
        catalog: Arc<TemplateCatalog>,
        pool: BrowserPool,
        engine: Arc<dyn PdfEngine>,
    ) -> Self {
        Self {
            renderer,
            catalog,
            pool,
            engine,
        }
    }

    pub fn pool(&self) -> &BrowserPool {
        &self.pool
    }

    pub fn engine(&self) -> &dyn PdfEngine {
        self.engine.as_ref()
    }

    /// Validate `raw` strictly and print it
    pub async fn export(&self, raw: &Value) -> Result<PdfDocument, ExportError> {
        let request = ExportRequest::parse(raw, Validation::Strict)?;
        self.export_request(&request).await
    }

    /// Print an already validated request
    pub async fn export_request(&self, request: &ExportRequest) -> Result<PdfDocument, ExportError> {
        let markup = self.markup(request)?;
        let bytes = self.print(&markup).await?;
        Ok(PdfDocument {
            bytes,
            filename: pdf_filename(&request.data.name),
        })
    }

    /// Render `raw` to HTML with lenient style handling
    pub fn preview(&self, raw: &Value) -> Result<MarkupDocument, ExportError> {
        let request = ExportRequest::parse(raw, Validation::Lenient)?;
        Ok(self.markup(&request)?)
    }

    /// Render a request with its template, or the default one when unknown
    pub fn markup(&self, request: &ExportRequest) -> Result<MarkupDocument, TemplateError> {
        let template = self.catalog.resolve(&request.template_id);
        self.renderer.render(&request.data, &request.style, template)
    }

    /// Print finished markup in a pool slot
    pub async fn print(&self, markup: &MarkupDocument) -> Result<Vec<u8>, RenderError> {
        let slot = self.pool.checkout().await?;
        let started = Instant::now();

        let result = self.engine.print_pdf(markup.as_str(), slot.path()).await;

        match &result {
            Ok(bytes) => tracing::info!(
                engine = self.engine.name(),
                template_id = %markup.template_id,
                bytes = bytes.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "PDF generated"
            ),
            Err(e) => tracing::error!(
                engine = self.engine.name(),
                template_id = %markup.template_id,
                error = %e,
                "PDF generation failed"
            ),
        }

        result
    }
}
