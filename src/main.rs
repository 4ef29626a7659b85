use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use resumeforge::api;
use resumeforge::assets::{AssetCategory, AssetLoader};
use resumeforge::models::{self, AppConfig};
use resumeforge::server;
use resumeforge::services::{
    find_browser, BrowserPool, ChromeEngine, ExportRequest, PdfExporter, ResumeRenderer,
    TemplateCatalog,
};

#[derive(Parser)]
#[command(name = "resumeforge")]
#[command(about = "ResumeForge - résumé builder backend with HTML preview and PDF export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a résumé to HTML or PDF without a server
    Render {
        /// Résumé data as JSON (default: the built-in sample profile)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Style settings as JSON (default: the template's default style)
        #[arg(short, long)]
        style: Option<PathBuf>,

        /// Template id (default: the configured default template)
        #[arg(short, long)]
        template: Option<String>,

        /// Output file; `.pdf` goes through the PDF engine, anything else is HTML
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract the Tera markup templates
        #[arg(long)]
        templates: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ResumeForge API",
        description = "Résumé builder backend: résumé records, templates, styles and PDF export",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_list_resumes,
        api::handle_get_resume,
        api::handle_create_resume,
        api::handle_update_resume,
        api::handle_delete_resume,
        api::handle_get_style,
        api::handle_save_style,
        api::handle_delete_style,
        api::handle_list_templates,
        api::handle_get_template,
        api::handle_list_presets,
        api::handle_generate_pdf,
        api::handle_preview,
    ),
    components(schemas(
        models::ResumeRecord,
        models::ResumeStyle,
        models::ResumeData,
        models::ContactInfo,
        models::ExperienceItem,
        models::EducationItem,
        models::Course,
        models::CertificationItem,
        models::AwardItem,
        models::LanguageItem,
        models::InterestItem,
        models::ReferenceItem,
        models::Template,
        models::LayoutMode,
        models::Preset,
        models::PresetCategory,
        models::FieldIssue,
        resume_style::StyleSettings,
        resume_style::ColorSettings,
        resume_style::Placement,
    )),
    tags(
        (name = "Resumes", description = "Résumé records"),
        (name = "Styles", description = "Per-template style overrides"),
        (name = "Templates", description = "Template catalog and color presets"),
        (name = "Export", description = "HTML preview and PDF export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            data,
            style,
            template,
            output,
        }) => run_render_command(data.as_deref(), style.as_deref(), template, &output).await,
        Some(Commands::Init {
            templates,
            config,
            all,
            force,
            list,
        }) => run_init_command(templates, config, all, force, list),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {e}", path.display()))
}

/// Render a résumé directly to a file (no server needed)
async fn run_render_command(
    data: Option<&Path>,
    style: Option<&Path>,
    template: Option<String>,
    output: &Path,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resumeforge=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let asset_loader = AssetLoader::from_env();
    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed assets");
    }

    let config = AppConfig::load_from_assets(&asset_loader);
    let catalog = Arc::new(TemplateCatalog::from_config(&config));
    let template = catalog
        .resolve(template.as_deref().unwrap_or(&config.default_template))
        .clone();

    let data = match data {
        Some(path) => models::validate_resume_data(&read_json(path)?)?,
        None => models::ResumeData::sample(),
    };
    let style = match style {
        Some(path) => {
            resume_style::validate_style(&read_json(path)?, resume_style::Validation::Strict)?
        }
        None => template.default_style.clone(),
    };

    let request = ExportRequest {
        data,
        style,
        template_id: template.id.clone(),
    };

    let renderer = Arc::new(ResumeRenderer::new(&asset_loader)?);
    let exporter = PdfExporter::new(
        renderer,
        catalog,
        BrowserPool::from_config(&config.pdf),
        Arc::new(ChromeEngine::from_config(&config.pdf)),
    );

    let is_pdf = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let bytes = if is_pdf {
        exporter.export_request(&request).await?.bytes
    } else {
        exporter.markup(&request)?.into_string().into_bytes()
    };

    std::fs::write(output, &bytes)?;
    println!(
        "Rendered {} with template {} \"{}\" ({} bytes)",
        output.display(),
        template.id,
        template.name,
        bytes.len()
    );

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    templates: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    // Determine which categories to extract
    let mut categories = Vec::new();
    if all || templates {
        categories.push(AssetCategory::Templates);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --templates, or --config");
        eprintln!("\nRun 'resumeforge init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();
    let chrome_path = std::env::var("CHROME_PATH").ok();

    println!("ResumeForge v{VERSION}");
    println!("Résumé builder backend with HTML preview and PDF export\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR     = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CHROME_PATH   = {}",
        chrome_path.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let loader = AssetLoader::from_env();

    let config_source = match loader.config_file() {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:    {config_source}");

    let embedded_count = AssetLoader::list_embedded(AssetCategory::Templates).len();
    match loader.templates_dir() {
        Some(dir) if dir.exists() => println!(
            "  Templates: {} ({} files, {embedded_count} embedded)",
            dir.display(),
            loader.list_templates().len()
        ),
        _ => println!("  Templates: embedded ({embedded_count} files)"),
    }

    let config = AppConfig::load_from_assets(&loader);
    let browser = find_browser(
        chrome_path.map(PathBuf::from),
        config.pdf.chrome_path.as_deref(),
    );
    println!("\nPDF Engine:");
    match browser {
        Some(path) => println!("  Browser:   {}", path.display()),
        None => println!("  Browser:   not found (install chromium or set CHROME_PATH)"),
    }
    println!(
        "  Pool:      {} slots, {}s render timeout",
        config.pdf.pool_size.max(1),
        config.pdf.timeout_secs
    );
    println!("  Catalog:   {} templates", config.templates.len());

    println!("\nCommands:");
    println!("  resumeforge serve    Start the HTTP server");
    println!("  resumeforge render   Render a résumé to HTML or PDF");
    println!("  resumeforge init     Extract embedded assets");
    println!("\nRun 'resumeforge --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resumeforge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        templates = ?asset_loader.templates_dir().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?asset_loader.config_file().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    // Seed if configured paths are empty
    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                templates = report.templates_seeded.len(),
                config = report.config_seeded,
                "Seeded empty paths with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let state = server::create_app_state(asset_loader)?;

    // OpenAPI documentation is production only
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "ResumeForge server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
