//! Hand cursor control application: landmark frames in, cursor motion out.

use anyhow::Result;
use clap::Parser;
use hand_cursor_control::{
    app::HandCursorApp,
    config::Config,
    cursor_control::{CursorController, LogSink, PointerSink},
    pipeline::GeometryMode,
};
use log::{info, warn};
use std::io::BufReader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Geometry mode (normal, topdown, front, down)
    #[arg(short, long, default_value = "front")]
    mode: GeometryMode,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Screen width override in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Screen height override in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Log pointer updates instead of moving the cursor
    #[arg(long)]
    dry_run: bool,

    /// Start with cursor delivery disabled
    #[arg(long)]
    disabled: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Cursor Control");

    // Load configuration if provided, otherwise use the mode defaults
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::for_mode(args.mode)
            }
        }
    } else {
        Config::for_mode(args.mode)
    };

    if args.disabled {
        config.cursor.enabled = false;
    }
    if args.dry_run {
        config.cursor.dry_run = true;
    }

    // Pick the sink: real X11 cursor control, or logging when dry-running
    // or no display is reachable
    let sink: Box<dyn PointerSink> = if config.cursor.dry_run {
        info!("Dry run: pointer updates will be logged only");
        Box::new(LogSink)
    } else {
        match CursorController::new() {
            Ok(controller) => {
                let (screen_width, screen_height) = controller.screen_size();
                if args.width.is_none() && args.height.is_none() {
                    config.screen.width = u32::from(screen_width);
                    config.screen.height = u32::from(screen_height);
                }
                Box::new(controller)
            }
            Err(e) => {
                warn!("Failed to initialize cursor control: {}. Logging instead.", e);
                Box::new(LogSink)
            }
        }
    };

    if let Some(width) = args.width {
        config.screen.width = width;
    }
    if let Some(height) = args.height {
        config.screen.height = height;
    }

    let mut app = HandCursorApp::new(&config, sink)?;
    app.run(BufReader::new(std::io::stdin().lock()))?;

    Ok(())
}
