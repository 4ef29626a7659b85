pub mod config;
pub mod preset;
pub mod record;
pub mod resume;
pub mod template;
pub mod validation;

pub use config::{AppConfig, PdfConfig, TemplateConfig};
pub use preset::{Preset, PresetCategory};
pub use record::{
    NewResume, ResumeId, ResumePatch, ResumeRecord, ResumeStyle, DEFAULT_RESUME_NAME,
    DEFAULT_TEMPLATE_ID, DEFAULT_USER_ID,
};
pub use resume::{
    AwardItem, CertificationItem, ContactInfo, Course, EducationItem, ExperienceItem,
    InterestItem, LanguageItem, ReferenceItem, ResumeData,
};
pub use template::{Columns, ExperienceStyle, HeaderStyle, LayoutMode, SidebarDecoration, Template};
pub use validation::{validate_resume_data, FieldIssue, ValidationError};
