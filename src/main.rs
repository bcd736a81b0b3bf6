use clap::Parser;
use menuform::core::config::{self, DEFAULT_LOG_FILE};
use menuform::tui::{self, Mode};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "menuform", about = "Interactive terminal menu and form")]
struct Args {
    /// Config file (defaults to ~/.menuform/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Form title, overriding config and MENUFORM_TITLE
    #[arg(short, long)]
    title: Option<String>,

    /// Line mode: read commands as lines from stdin instead of raw keys
    #[arg(long)]
    plain: bool,

    /// Where to write the log
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The terminal belongs to the form, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let menu_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("menuform: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&menu_config, args.title.as_deref());
    let mode = if args.plain { Mode::Line } else { Mode::FullScreen };

    log::info!("menuform starting in {:?} mode", mode);

    match tui::run(&resolved, mode) {
        Ok(Some(export)) => match serde_json::to_string_pretty(&export) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("menuform: could not encode export: {e}");
                ExitCode::FAILURE
            }
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Session failed: {}", e);
            eprintln!("menuform: {e}");
            ExitCode::FAILURE
        }
    }
}
