use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "muhasabah", version, about = "Muhasabah: daily self-accountability tracker")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's progress and profile
    Status,
    /// Physical exercises
    Exercise {
        #[command(subcommand)]
        action: commands::exercise::ExerciseAction,
    },
    /// The five daily prayers
    Salah {
        #[command(subcommand)]
        action: commands::salah::SalahAction,
    },
    /// Knowledge quests
    Knowledge {
        #[command(subcommand)]
        action: commands::knowledge::KnowledgeAction,
    },
    /// Study minutes
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Custom tasks
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Record a reflection
    Reflect {
        /// Reflection text
        note: String,
        /// Free-form category
        #[arg(long, default_value = "general")]
        category: String,
    },
    /// Recovery privilege
    Recovery {
        #[command(subcommand)]
        action: commands::recovery::RecoveryAction,
    },
    /// Color theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Sound cues
    Sound {
        #[command(subcommand)]
        action: commands::sound::SoundAction,
    },
    /// Weekly history report
    History,
    /// Settle the previous day if the date has changed
    Check,
    /// Keep running and settle at each day change
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MUHASABAH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;
    let result = match cli.command {
        Commands::Status => commands::status::run(json),
        Commands::Exercise { action } => commands::exercise::run(action, json),
        Commands::Salah { action } => commands::salah::run(action, json),
        Commands::Knowledge { action } => commands::knowledge::run(action, json),
        Commands::Study { action } => commands::study::run(action, json),
        Commands::Task { action } => commands::task::run(action, json),
        Commands::Reflect { note, category } => commands::reflect::run(&note, &category, json),
        Commands::Recovery { action } => commands::recovery::run(action, json),
        Commands::Theme { action } => commands::theme::run(action, json),
        Commands::Sound { action } => commands::sound::run(action, json),
        Commands::History => commands::history::run(json),
        Commands::Check => commands::check::run(json),
        Commands::Watch => commands::watch::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
