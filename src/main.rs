use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::error;

use vision_verify_lib::commands::{self, CommandOutput};
use vision_verify_lib::services::config::ConfigManager;
use vision_verify_lib::utils::logging::init_logging;
use vision_verify_lib::{AppConfig, Pipeline};

/// OCR extraction and face verification client
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// OCR endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Bearer credential for the OCR endpoint
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// OCR request timeout (seconds)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Emit JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract text from an image
    Ocr {
        image: PathBuf,
        /// Optional instruction for the OCR service
        prompt: Vec<String>,
        /// Also send the explicit mimeType field
        #[arg(long, default_value_t = false)]
        send_mime_type: bool,
    },
    /// Compare the faces in two images (prints one JSON object)
    Verify { image_a: PathBuf, image_b: PathBuf },
    /// Extract text from several images, one after another
    Batch {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[arg(long)]
        prompt: Option<String>,
        /// Process images concurrently
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    Path,
    Init,
}

impl Args {
    /// Command-line flags take precedence over the file
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.ocr.endpoint = endpoint.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.ocr.api_key = Some(api_key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.ocr.timeout_secs = timeout;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

fn application(args: Args) -> Result<CommandOutput> {
    let manager = match &args.config {
        Some(path) => ConfigManager::at(path),
        None => ConfigManager::new().map_err(|e| anyhow!(e))?,
    };

    let mut config = manager.load().map_err(|e| anyhow!(e))?;
    args.apply_overrides(&mut config);
    config.validate().map_err(|e| anyhow!(e))?;

    init_logging(&config.logging).map_err(|e| anyhow!(e))?;

    let output = match &args.command {
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Path => Ok(commands::config::config_path(&manager)),
            ConfigAction::Init => commands::config::init_config(&manager),
        },
        Command::Ocr {
            image,
            prompt,
            send_mime_type,
        } => {
            let pipeline = Pipeline::from_config(&config)?.with_mime_type_hint(*send_mime_type);
            let prompt = (!prompt.is_empty()).then(|| prompt.join(" "));
            commands::ocr::ocr_image(&pipeline, image, prompt.as_deref(), args.json)
        }
        Command::Verify { image_a, image_b } => {
            let pipeline = Pipeline::from_config(&config)?;
            // the verification surface always speaks JSON
            commands::verify::verify_faces(&pipeline, image_a, image_b, true)
        }
        Command::Batch {
            images,
            prompt,
            parallel,
        } => {
            let pipeline = Pipeline::from_config(&config)?;
            commands::batch::ocr_batch(&pipeline, images, prompt.as_deref(), *parallel, args.json)
        }
    };

    output.map_err(|e| anyhow!(e))
}

fn main() {
    let args = Args::parse();

    match application(args) {
        Ok(output) => {
            println!("{}", output.stdout.trim_end());
            if !output.success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
