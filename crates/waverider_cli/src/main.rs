//! Command-line front end for `waverider_core`.
//!
//! # Responsibility
//! - Drive controller operations from the terminal, one per invocation.
//! - Render the resulting state as plain text.

use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;
use std::process::ExitCode;
use waverider_core::db::open_db;
use waverider_core::{
    default_log_level, init_logging, known_views, sample_conditions, spot_catalog, AppController,
    AppState, CoreConfig, LoadOutcome, RngRandomSource, SessionInput, SessionsView,
    SqliteKeyValueStore, SystemClock,
};

#[derive(Parser)]
#[command(name = "waverider")]
#[command(about = "WaveRider - surf session and wax tracker", long_about = None)]
struct Cli {
    /// SQLite file holding saved state (overrides WAVERIDER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show wax level and logged sessions
    Status,
    /// Log a surf session (wears down the wax)
    Log {
        #[arg(long)]
        spot: String,
        #[arg(long)]
        hours: f64,
        #[arg(long)]
        waves: f64,
    },
    /// Rewax the board back to 100%
    Rewax,
    /// Erase all saved data
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
    /// Show the state with a view selected; not saved on its own
    View { id: String },
    /// Show simulated surf conditions
    Conditions,
    /// List reference surf spots
    Spots,
    /// Print core linkage info
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| "log directory must be valid UTF-8".to_string())?;
        init_logging(level, log_dir)?;
    }

    match cli.command {
        Commands::Ping => {
            println!("waverider_core ping={}", waverider_core::ping());
            println!("waverider_core version={}", waverider_core::core_version());
            return Ok(());
        }
        Commands::Conditions => {
            let conditions = sample_conditions(&mut RngRandomSource::from_entropy());
            println!("Wave height: {}", conditions.wave_height_label());
            println!("Wind: {}", conditions.wind_label());
            println!("Tide: {}", conditions.tide);
            return Ok(());
        }
        Commands::Spots => {
            for spot in spot_catalog() {
                println!("{} - {}", spot.name, spot.description);
            }
            return Ok(());
        }
        _ => {}
    }

    let mut config = CoreConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }

    let conn =
        open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;
    let mut controller = AppController::from_config(
        SqliteKeyValueStore::new(&conn),
        &config,
        RngRandomSource::from_entropy(),
        SystemClock,
    )
    .map_err(|err| err.to_string())?;

    if let LoadOutcome::Malformed(err) = controller.initialize().map_err(|err| err.to_string())? {
        warn!("event=cli_init module=cli status=ok fallback=defaults");
        eprintln!("warning: saved data was unreadable and has been replaced by defaults ({err})");
    }

    let state = match cli.command {
        Commands::Status => controller.state(),
        Commands::Log { spot, hours, waves } => {
            let state = controller.log_session(&SessionInput::new(spot, hours, waves));
            if state.is_ok() {
                println!("Session logged!");
            }
            state
        }
        Commands::Rewax => controller.rewax(),
        Commands::Reset { yes } => {
            if !yes {
                println!("Reset skipped; pass --yes to erase all saved data.");
            }
            controller.reset(yes)
        }
        Commands::View { id } => {
            let state = controller.select_view(&id);
            if let Ok(state) = &state {
                if !state.current_view().is_known() {
                    println!("Note: known views are {}", known_views().join(", "));
                }
            }
            state
        }
        Commands::Ping | Commands::Conditions | Commands::Spots => controller.state(),
    }
    .map_err(|err| err.to_string())?;

    render(state);
    Ok(())
}

fn render(state: &AppState) {
    let reading = state.wax().reading();
    println!("{} ({:?})", reading.status_label(), reading.tier);
    if let Some(hint) = reading.hint() {
        println!("{hint}");
    }
    println!("View: {}", state.current_view());

    match state.sessions_for_display() {
        SessionsView::Empty => println!("No sessions yet. Start surfing!"),
        SessionsView::Entries(sessions) => {
            for session in sessions {
                println!(
                    "{} | Hours: {} | Waves: {}",
                    session.spot(),
                    session.hours(),
                    session.waves()
                );
            }
        }
    }
}
