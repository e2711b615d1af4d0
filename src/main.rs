use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use stitch_quant::{CodeFormat, Pattern};
use stitchgrid::api;
use stitchgrid::models::AppConfig;
use stitchgrid::rendering::{grid_csv, legend_csv, render_png, PreviewOptions};
use stitchgrid::server;
use stitchgrid::services::{ImageRequest, PatternService};

#[derive(Parser)]
#[command(name = "stitchgrid")]
#[command(about = "Stitchgrid - turn images into color-coded cross-stitch patterns")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a PNG into a pattern file
    Convert {
        /// Input PNG
        #[arg(short, long)]
        input: PathBuf,

        /// Output pattern JSON
        #[arg(short, long)]
        output: PathBuf,

        /// Grid width in stitches
        #[arg(short, long)]
        cols: Option<usize>,

        /// Grid height in stitches (follows the image aspect ratio if omitted)
        #[arg(short, long)]
        rows: Option<usize>,

        /// Upper bound on distinct colors
        #[arg(short, long)]
        max_colors: Option<usize>,

        /// Code spelling: "padded", "numeric" or "prefix:<text>"
        #[arg(long)]
        code_format: Option<CodeFormat>,

        /// Also write the grid as CSV
        #[arg(long)]
        grid_csv: Option<PathBuf>,

        /// Also write the color legend as CSV
        #[arg(long)]
        legend_csv: Option<PathBuf>,

        /// Also render a PNG preview
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Preview cell size in pixels
        #[arg(long)]
        cell_size: Option<u32>,
    },
    /// Print the legend of a saved pattern file
    Inspect {
        /// Pattern JSON written by `convert`
        pattern: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stitchgrid API",
        description = "Turn images into color-coded cross-stitch patterns",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_create_pattern,
        api::handle_create_from_image,
        api::handle_get_pattern,
        api::handle_grid_csv,
        api::handle_legend_csv,
        api::handle_preview,
    ),
    components(schemas(api::PixelPatternRequest, api::PatternResponse)),
    tags(
        (name = "Patterns", description = "Pattern creation and retrieval"),
        (name = "Export", description = "CSV and image exports")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Convert {
            input,
            output,
            cols,
            rows,
            max_colors,
            code_format,
            grid_csv,
            legend_csv,
            preview,
            cell_size,
        }) => {
            init_cli_logging();
            let request = ImageRequest {
                cols,
                rows,
                max_colors,
                code_format,
            };
            let exports = Exports {
                grid_csv,
                legend_csv,
                preview,
                cell_size,
            };
            run_convert_command(&input, &output, request, exports)
        }
        Some(Commands::Inspect { pattern }) => {
            init_cli_logging();
            run_inspect_command(&pattern)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stitchgrid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Optional side outputs of `convert`
struct Exports {
    grid_csv: Option<PathBuf>,
    legend_csv: Option<PathBuf>,
    preview: Option<PathBuf>,
    cell_size: Option<u32>,
}

/// Convert a PNG into a pattern file (no server needed)
fn run_convert_command(
    input: &Path,
    output: &Path,
    request: ImageRequest,
    exports: Exports,
) -> anyhow::Result<()> {
    let config = Arc::new(AppConfig::from_env());
    let service = PatternService::new(config.clone());

    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let pattern = service.from_png(&bytes, &request)?;

    let json = serde_json::to_vec_pretty(&pattern)?;
    std::fs::write(output, &json)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} ({}x{} stitches, {} colors)",
        output.display(),
        pattern.cols(),
        pattern.rows(),
        pattern.num_colors()
    );

    if let Some(path) = exports.grid_csv {
        std::fs::write(&path, grid_csv(&pattern))?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = exports.legend_csv {
        std::fs::write(&path, legend_csv(&pattern))?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = exports.preview {
        let options = PreviewOptions {
            cell_size: exports.cell_size.unwrap_or(config.render.cell_size),
            grid_lines: config.render.grid_lines,
        };
        let png_bytes = render_png(&pattern, &options, config.limits.max_render_pixels)?;
        std::fs::write(&path, &png_bytes)?;
        println!("Wrote {} ({} bytes)", path.display(), png_bytes.len());
    }

    Ok(())
}

/// Reload a saved pattern and print its legend
fn run_inspect_command(path: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let pattern: Pattern = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid pattern", path.display()))?;

    println!(
        "{}: {}x{} stitches, {} colors\n",
        path.display(),
        pattern.cols(),
        pattern.rows(),
        pattern.num_colors()
    );

    let width = pattern
        .colors()
        .iter()
        .map(|c| c.code.len())
        .max()
        .unwrap_or(0)
        .max("Code".len());
    println!("  {:<width$}  Color    Count", "Code");
    for entry in pattern.colors() {
        println!("  {:<width$}  {}  {}", entry.code, entry.color, entry.count);
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Stitchgrid v{VERSION}");
    println!("Color-coded cross-stitch patterns from images\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig:  {config_source}");

    println!("\nCommands:");
    println!("  stitchgrid serve     Start the HTTP server");
    println!("  stitchgrid convert   Convert a PNG into a pattern file");
    println!("  stitchgrid inspect   Print the legend of a pattern file");
    println!("\nRun 'stitchgrid --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stitchgrid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    tracing::info!(
        max_colors = config.defaults.max_colors,
        cols = config.defaults.cols,
        code_format = %config.defaults.code_format,
        store_capacity = config.store.capacity,
        "Configuration ready"
    );

    let state = server::create_app_state(config);

    // Router: shared API routes plus production-only documentation
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Stitchgrid server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
