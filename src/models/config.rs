use crate::assets::AssetLoader;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::preset::Preset;
use super::template::LayoutMode;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Template used when a request names an unknown one
    #[serde(default = "default_template")]
    pub default_template: String,

    /// PDF export settings
    #[serde(default)]
    pub pdf: PdfConfig,

    /// Template catalog
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,

    /// Color presets
    #[serde(default)]
    pub presets: Vec<Preset>,
}

fn default_template() -> String {
    "1".to_string()
}

/// Headless browser settings for PDF export
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PdfConfig {
    /// Browser binary. Discovered on PATH when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    /// Maximum number of concurrent browser processes
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Hard limit for a single render, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long a request waits for a free browser slot, in seconds
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Virtual time the page gets to settle before printing, in milliseconds
    #[serde(default = "default_virtual_time_budget_ms")]
    pub virtual_time_budget_ms: u64,

    /// Extra browser flags, e.g. `--lang=de` or proxy settings
    #[serde(default)]
    pub chrome_args: Vec<String>,
}

fn default_pool_size() -> usize {
    2
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_virtual_time_budget_ms() -> u64 {
    2000
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            pool_size: default_pool_size(),
            timeout_secs: default_timeout_secs(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            virtual_time_budget_ms: default_virtual_time_budget_ms(),
            chrome_args: Vec::new(),
        }
    }
}

impl PdfConfig {
    /// Hard limit for a single render, never below one second
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Wait for a free browser slot, never below one second
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs.max(1))
    }

    fn warn_on_zero_limits(&self) {
        if self.timeout_secs == 0 {
            tracing::warn!("pdf.timeout_secs is 0, using 1 second");
        }
        if self.acquire_timeout_secs == 0 {
            tracing::warn!("pdf.acquire_timeout_secs is 0, using 1 second");
        }
        if self.pool_size == 0 {
            tracing::warn!("pdf.pool_size is 0, using 1 slot");
        }
    }
}

/// Catalog entry as written in config.yaml
///
/// `default_style` is kept raw; the catalog resolves it leniently so a typo
/// in one knob does not discard the whole entry.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layout: LayoutMode,
    #[serde(default)]
    pub default_style: serde_yaml::Value,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    config.pdf.warn_on_zero_limits();
                    tracing::info!(
                        templates = config.templates.len(),
                        presets = config.presets.len(),
                        default_template = %config.default_template,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_template: default_template(),
            pdf: PdfConfig::default(),
            templates: vec![TemplateConfig {
                id: default_template(),
                name: "Professional Dark".to_string(),
                description: "Clean design with dark sidebar".to_string(),
                layout: LayoutMode::default(),
                default_style: serde_yaml::Value::Null,
            }],
            presets: Vec::new(),
        }
    }
}
