pub mod catalog;
pub mod export;
pub mod pdf_engine;
pub mod renderer;
pub mod resume_store;
pub mod sections;

pub use catalog::{PresetCatalog, TemplateCatalog};
pub use export::{pdf_filename, ExportRequest, PdfDocument, PdfExporter};
pub use pdf_engine::{
    ensure_pdf, find_browser, BrowserPool, BrowserSlot, ChromeEngine, PdfEngine,
    BROWSER_CANDIDATES,
};
pub use renderer::{MarkupDocument, ResumeRenderer};
pub use resume_store::{InMemoryStore, ResumeStore};
pub use sections::{SectionKind, SectionPlan};
