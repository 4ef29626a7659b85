//! ResumeForge - résumé builder backend
//!
//! Stores résumés, renders them to HTML with a catalog of templates and
//! prints them to A4 PDF through headless Chrome.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
