mod cmd;
mod completions;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::engine::ArgValueCompleter;
use clap_complete::env::CompleteEnv;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "exo", version, about = "Zettel and periodic notes in plain text")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    /// Log debug events to stderr
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "quiet"])]
    debug: bool,

    /// Log info events to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open (or create) the daily note
    Day(PeriodArgs),

    /// Open (or create) the weekly note
    Week(PeriodArgs),

    /// Create a zettel note and link it from today's daily note
    Zet(ZetArgs),

    /// Create a note in an arbitrary subdirectory
    New(NewArgs),

    /// List available templates
    Templates,

    /// Create the data directories and install default templates
    Init(InitArgs),

    /// Validate configuration and print resolved paths
    Doctor,

    /// List settings, or get and set a single one
    Config(ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Day(_) => "day",
            Commands::Week(_) => "week",
            Commands::Zet(_) => "zet",
            Commands::New(_) => "new",
            Commands::Templates => "templates",
            Commands::Init(_) => "init",
            Commands::Doctor => "doctor",
            Commands::Config(_) => "config",
        }
    }
}

#[derive(Debug, Args)]
pub struct PeriodArgs {
    /// today, yesterday, tomorrow or YYYY-MM-DD
    #[arg(value_parser = cmd::parse_date_arg, default_value = "today")]
    pub date: chrono::NaiveDate,

    /// Create or load the note without opening the editor
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Debug, Args)]
pub struct ZetArgs {
    pub title: String,

    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Debug, Args)]
pub struct NewArgs {
    pub title: String,

    /// Directory under data_home to place the note in
    #[arg(long)]
    pub subdir: String,

    /// Defaults to the slugged title plus `.md`
    #[arg(long)]
    pub file_name: Option<String>,

    /// Logical template name (e.g. "zet" or "blog/post")
    #[arg(long, add = ArgValueCompleter::new(completions::complete_templates))]
    pub template: Option<String>,

    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite existing templates without asking (old files are backed up)
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective value of one setting
    Get { key: String },

    /// Change one setting in the config file
    Set { key: String, value: String },
}

fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    let name = cli.command.name();
    let rc = cmd::load_config(cli.config.as_deref(), cli.profile.as_deref(), name);
    logging::init(&rc, logging::level_override(cli.debug, cli.verbose, cli.quiet));

    match cli.command {
        Commands::Day(args) => cmd::day::run(rc, &args),
        Commands::Week(args) => cmd::week::run(rc, &args),
        Commands::Zet(args) => cmd::zet::run(rc, &args),
        Commands::New(args) => cmd::new::run(rc, &args),
        Commands::Templates => cmd::templates::run(&rc),
        Commands::Init(args) => cmd::init::run(&rc, &args),
        Commands::Doctor => cmd::doctor::run(&rc, cli.config.as_deref()),
        Commands::Config(args) => cmd::config::run(&rc, cli.config.as_deref(), &args),
    }

    logging::flush();
}
