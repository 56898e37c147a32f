use anyhow::Context;
use clap::Parser;
use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use toby_launcher::app::StartState;
use toby_launcher::commands::default_global_commands;
use toby_launcher::core::{
    load_catalog, load_text_rules, output::DEFAULT_WRAP_WIDTH, print_error, run as run_session,
    AppContext, Config, DataPaths, GameManager, StdConsole, TtsManager, UiContext,
};

/// How long shutdown waits for the last phrase to finish
const SPEECH_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "toby-launcher")]
#[command(about = "An accessible console launcher for GZDoom games")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Directory holding config.json, games.json and game files
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Wrap output at this many columns (0 disables wrapping)
    #[arg(long, default_value_t = DEFAULT_WRAP_WIDTH)]
    width: usize,

    /// Do not use any speech program
    #[arg(long)]
    no_speech: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = DataPaths::resolve(cli.data_dir).context("Failed to prepare the data directory")?;
    init_logging(cli.debug, &paths.log_file());
    log::info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let (mut config, config_warning) = Config::load(&paths.config_file());
    let mut tts = if cli.no_speech {
        TtsManager::silent()
    } else {
        TtsManager::detect()
    };
    let speech_warning = tts.apply_config(&mut config.tts).err();
    let (games, catalog_warning) = load_catalog(&paths.games_file());
    let (text_rules, rules_warning) = load_text_rules(&paths.text_rules_file());

    let games = GameManager::new(paths.clone(), games).with_text_rules(text_rules);
    let mut app = AppContext::new(config, games);

    // Ctrl-C ends the session like closed input
    let console = StdConsole::new();
    let interrupted = console.interrupt_flag();
    if let Err(e) = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst)) {
        log::warn!("Cannot handle Ctrl-C: {e}");
    }
    let mut ui = UiContext::new(Box::new(console), tts).with_wrap_width(cli.width);
    ui.registry.register_global_commands(default_global_commands());

    let gzdoom_warning = paths.gzdoom_path().err();
    for warning in [
        config_warning,
        speech_warning,
        catalog_warning,
        rules_warning,
        gzdoom_warning,
    ]
    .into_iter()
    .flatten()
    {
        log::warn!("{warning}");
        ui.display_error(&warning);
    }

    run_session(&mut app, &mut ui, Rc::new(StartState));

    if let Err(e) = app.games.stop_game() {
        log::error!("{e}");
    }
    ui.tts.wait(SPEECH_DRAIN_TIMEOUT);
    ui.tts.release();
    app.config
        .save(&paths.config_file())
        .context("Failed to save the configuration")?;
    log::info!("Shut down cleanly");
    Ok(())
}

/// Route log records to the log file, or stderr when it cannot be opened
fn init_logging(debug: bool, log_file: &Path) {
    // Configure logging based on --debug flag
    if debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }

    let mut builder = env_logger::Builder::from_default_env();
    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Cannot open log file {}: {e}", log_file.display()),
    }
    builder.init();
}
