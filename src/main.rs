use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use grid_resample::{resample, PixelSettings, Transform};
use pixelsmith::api;
use pixelsmith::models::AppConfig;
use pixelsmith::rendering::{decode_source, Presenter};
use pixelsmith::server;

#[derive(Parser)]
#[command(name = "pixelsmith")]
#[command(about = "Pixelsmith - turn photographs into pixel-art sprites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Pixelate an image file directly to a PNG file
    Render {
        /// Source image (PNG, JPEG or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path (defaults to pixel-art-NxN.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output cells per side (8-64)
        #[arg(short, long)]
        grid_size: Option<u32>,

        /// Contrast adjustment (-50 to 50)
        #[arg(long, allow_negative_numbers = true)]
        contrast: Option<i32>,

        /// Saturation adjustment (-50 to 50)
        #[arg(long, allow_negative_numbers = true)]
        saturation: Option<i32>,

        /// Zoom factor (0.1 to 20)
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,

        /// Horizontal pan offset in source pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pan_x: f64,

        /// Vertical pan offset in source pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pan_y: f64,

        /// Output pixels per cell
        #[arg(short, long)]
        multiplier: Option<u32>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixelsmith API",
        description = "Turn photographs into pixel-art sprites with pan/zoom cropping",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_upload_source,
        api::handle_get_transform,
        api::handle_transform_event,
        api::handle_get_settings,
        api::handle_update_settings,
        api::handle_preview,
        api::handle_export,
    ),
    components(schemas(
        api::SourceResponse,
        api::InputEvent,
        api::TransformResponse,
        api::SettingsPatch,
        api::SettingsResponse,
    )),
    tags(
        (name = "Source", description = "Source image upload"),
        (name = "Transform", description = "Pan and zoom of the crop viewport"),
        (name = "Settings", description = "Grid size and color adjustment"),
        (name = "Image", description = "Preview and export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            grid_size,
            contrast,
            saturation,
            zoom,
            pan_x,
            pan_y,
            multiplier,
        }) => run_render_command(RenderArgs {
            input,
            output,
            grid_size,
            contrast,
            saturation,
            transform: Transform::new(pan_x, pan_y, zoom),
            multiplier,
        }),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

struct RenderArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    grid_size: Option<u32>,
    contrast: Option<i32>,
    saturation: Option<i32>,
    transform: Transform,
    multiplier: Option<u32>,
}

fn config_path() -> Option<PathBuf> {
    std::env::var("CONFIG_FILE").ok().map(PathBuf::from)
}

/// Pixelate a file directly (no server needed)
fn run_render_command(args: RenderArgs) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelsmith=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(config_path().as_deref());
    let defaults = config.defaults.pixel_settings();
    let settings = PixelSettings {
        grid_size: args.grid_size.unwrap_or(defaults.grid_size),
        contrast: args.contrast.unwrap_or(defaults.contrast),
        saturation: args.saturation.unwrap_or(defaults.saturation),
        show_grid: false,
    }
    .clamped();
    let multiplier = args.multiplier.unwrap_or(config.defaults.export_multiplier);

    let bytes = std::fs::read(&args.input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", args.input.display()))?;
    let source = decode_source(&bytes)?;

    let buffer = resample(
        &source,
        &args.transform,
        settings.grid_size,
        &settings.color_adjust(),
    )?;
    let exported = Presenter::new(&config).export(&buffer, multiplier)?;

    let output = args
        .output
        .unwrap_or_else(|| Path::new(&exported.filename).to_path_buf());
    std::fs::write(&output, &exported.bytes)?;
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        output.display(),
        exported.width,
        exported.height,
        exported.bytes.len()
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Pixelsmith v{VERSION}");
    println!("Pixel-art sprites from photographs\n");

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
    println!("  pixelsmith serve    Start the HTTP server");
    println!("  pixelsmith render   Pixelate an image file to PNG");
    println!("\nRun 'pixelsmith --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelsmith=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = config_path();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = AppConfig::load(config_file.as_deref());

    let state = server::create_app_state(config);

    // OpenAPI documentation (production only)
    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Pixelsmith server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
