//! Headless browser PDF engine
//!
//! Chrome's `--print-to-pdf` mode is one-shot: every export starts a fresh
//! browser process. [`BrowserPool`] bounds how many of those run at once and
//! hands each one an isolated scratch directory with its own profile.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

use crate::error::RenderError;
use crate::models::PdfConfig;

/// Binary names tried on `PATH`, in order
pub const BROWSER_CANDIDATES: [&str; 4] = [
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

const PDF_MAGIC: &[u8] = b"%PDF-";
const PAGE_FILE: &str = "page.html";
const OUTPUT_FILE: &str = "resume.pdf";
const PROFILE_DIR: &str = "profile";
const STDERR_TAIL: usize = 2048;

/// Turns a self-contained HTML document into PDF bytes
#[async_trait]
pub trait PdfEngine: Send + Sync {
    /// Print `html` using `workdir` as scratch space.
    ///
    /// `workdir` exists and is private to this call.
    async fn print_pdf(&self, html: &str, workdir: &Path) -> Result<Vec<u8>, RenderError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Check that `bytes` look like a PDF document
pub fn ensure_pdf(bytes: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(bytes)
    } else {
        Err(RenderError::InvalidOutput(bytes.len()))
    }
}

/// Locate a browser binary.
///
/// An explicit override (the `CHROME_PATH` env var) wins over the configured
/// path, which wins over a `PATH` search.
pub fn find_browser(env_override: Option<PathBuf>, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path);
    }
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }
    BROWSER_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// PDF engine driving a headless Chrome/Chromium binary
#[derive(Debug, Clone)]
pub struct ChromeEngine {
    binary: Option<PathBuf>,
    timeout: Duration,
    virtual_time_budget: Duration,
    extra_args: Vec<String>,
}

impl ChromeEngine {
    /// Create an engine for `binary`. With `None`, every render fails with
    /// [`RenderError::BrowserNotFound`].
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self {
            binary,
            timeout: Duration::from_secs(30),
            virtual_time_budget: Duration::from_millis(2000),
            extra_args: Vec::new(),
        }
    }

    /// Build from config, honoring `CHROME_PATH`
    pub fn from_config(config: &PdfConfig) -> Self {
        let env_override = std::env::var_os("CHROME_PATH").map(PathBuf::from);
        let binary = find_browser(env_override, config.chrome_path.as_deref());

        match &binary {
            Some(path) => tracing::info!(browser = %path.display(), "PDF engine using browser"),
            None => tracing::warn!(
                "No Chrome/Chromium binary found; PDF export will fail until CHROME_PATH is set"
            ),
        }

        Self::new(binary)
            .with_timeout(config.render_timeout())
            .with_virtual_time_budget(Duration::from_millis(config.virtual_time_budget_ms))
            .with_extra_args(config.chrome_args.clone())
    }

    /// Hard limit for one render; the browser is killed when it expires
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_virtual_time_budget(mut self, budget: Duration) -> Self {
        self.virtual_time_budget = budget;
        self
    }

    /// Extra browser flags, appended before the page URL
    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    fn build_args(&self, page: &Url, output: &Path, profile: &Path) -> Vec<String> {
        let mut args: Vec<String> = [
            "--headless=new",
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--no-first-run",
            "--no-default-browser-check",
            "--hide-scrollbars",
            "--no-pdf-header-footer",
            "--run-all-compositor-stages-before-draw",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        args.push(format!(
            "--virtual-time-budget={}",
            self.virtual_time_budget.as_millis()
        ));
        args.push(format!("--user-data-dir={}", profile.display()));
        args.push(format!("--print-to-pdf={}", output.display()));
        args.extend(self.extra_args.iter().cloned());
        args.push(page.to_string());
        args
    }
}

#[async_trait]
impl PdfEngine for ChromeEngine {
    async fn print_pdf(&self, html: &str, workdir: &Path) -> Result<Vec<u8>, RenderError> {
        let binary = self.binary.as_ref().ok_or(RenderError::BrowserNotFound)?;

        let page = workdir.join(PAGE_FILE);
        let output = workdir.join(OUTPUT_FILE);
        let profile = workdir.join(PROFILE_DIR);
        tokio::fs::write(&page, html).await?;
        tokio::fs::create_dir_all(&profile).await?;

        let page_url = Url::from_file_path(&page).map_err(|_| {
            RenderError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not an absolute path: {}", page.display()),
            ))
        })?;

        let args = self.build_args(&page_url, &output, &profile);
        tracing::debug!(browser = %binary.display(), ?args, "Starting browser");

        let started = Instant::now();
        let child = Command::new(binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(RenderError::Spawn)?;

        // On timeout the wait future is dropped, and with it the child
        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!(timeout = ?self.timeout, "Browser timed out, killing it");
                RenderError::Timeout(self.timeout)
            })??;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let start = stderr.len().saturating_sub(STDERR_TAIL);
            let start = (start..stderr.len())
                .find(|i| stderr.is_char_boundary(*i))
                .unwrap_or(stderr.len());
            return Err(RenderError::BrowserFailed {
                status: result.status.to_string(),
                stderr: stderr[start..].trim().to_string(),
            });
        }

        let bytes = match tokio::fs::read(&output).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::InvalidOutput(0))
            }
            Err(e) => return Err(e.into()),
        };

        let bytes = ensure_pdf(bytes)?;
        tracing::debug!(
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Browser printed PDF"
        );
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "chrome"
    }
}

/// Bounds concurrent browser processes
#[derive(Debug, Clone)]
pub struct BrowserPool {
    permits: Arc<Semaphore>,
    size: usize,
    acquire_timeout: Duration,
}

impl BrowserPool {
    pub fn new(size: usize, acquire_timeout: Duration) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
            acquire_timeout,
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new(config.pool_size, config.acquire_timeout())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Slots not currently checked out
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a free slot, up to the acquire timeout.
    ///
    /// The slot's scratch directory is removed and its permit returned when
    /// the slot is dropped.
    pub async fn checkout(&self) -> Result<BrowserSlot, RenderError> {
        let permit = tokio::time::timeout(
            self.acquire_timeout,
            Arc::clone(&self.permits).acquire_owned(),
        )
        .await
        .map_err(|_| RenderError::PoolExhausted(self.acquire_timeout))?
        .map_err(|_| RenderError::PoolExhausted(self.acquire_timeout))?;

        let dir = tempfile::Builder::new()
            .prefix("resumeforge-")
            .tempdir()?;

        tracing::trace!(slot = %dir.path().display(), available = self.available(), "Browser slot checked out");

        Ok(BrowserSlot {
            dir,
            _permit: permit,
        })
    }
}

/// A checked-out pool slot
///
/// Field order matters: the directory is removed before the permit is released.
#[derive(Debug)]
pub struct BrowserSlot {
    dir: TempDir,
    _permit: OwnedSemaphorePermit,
}

impl BrowserSlot {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
