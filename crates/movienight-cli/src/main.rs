use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{config as config_cmd, home, search, status, users, watchlog};
use movienight_config::PathManager;
use movienight_models::SearchMode;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movienight")]
#[command(about = "Movie Night - take turns picking what the household watches")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Backend base URL (overrides MOVIENIGHT_BACKEND_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Title,
    Actor,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Title => SearchMode::Title,
            ModeArg::Actor => SearchMode::Actor,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show whose turn it is and the latest watch events
    Home,
    /// Confirm the current turn without choosing a title yet
    #[command(long_about = "Confirm that the person whose turn it is has picked. The rotation advances and a placeholder event is added to the watch log; attach the real title later with 'movienight watchlog edit <id> --attach <query>'.")]
    Confirm {
        /// Watch date (YYYY-MM-DD), defaults to now on the server
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Search titles and optionally record one as watched
    #[command(long_about = "Search movies and series by title or by actor. With --pick N the N-th result is recorded as watched, picked by whoever is next unless --picker is given.")]
    Search {
        /// Text to search for
        #[arg(required_unless_present = "interactive")]
        query: Option<String>,

        /// Search by title or by actor (default from config)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Record the N-th result (1-based) as watched
        #[arg(long, value_name = "N", conflicts_with = "interactive")]
        pick: Option<usize>,

        /// User id of the picker (defaults to whoever is next)
        #[arg(long, value_name = "ID", requires = "pick")]
        picker: Option<i64>,

        /// Watch date (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "DATE", requires = "pick")]
        date: Option<NaiveDate>,

        /// Read queries line by line from stdin and search as you type
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "query")]
        interactive: bool,
    },
    /// Manage the rotation roster
    Users {
        #[command(subcommand)]
        cmd: UsersCommands,
    },
    /// Browse and amend the watch history
    Watchlog {
        #[command(subcommand)]
        cmd: WatchlogCommands,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Check that the backend is reachable
    Status,
}

#[derive(Subcommand)]
pub enum UsersCommands {
    /// List users in rotation order
    List,
    /// Add a user at the end of the rotation
    Add {
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Change a user's name, email or avatar URL
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Remove a user from the rotation
    Remove {
        id: i64,
        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Move the user at position FROM to position TO (1-based, as listed)
    Move { from: usize, to: usize },
    /// Replace the whole order with the given user ids
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },
    /// Upload an image (png, jpg, webp, gif) as the user's avatar
    Avatar { id: i64, path: PathBuf },
}

#[derive(Subcommand)]
pub enum WatchlogCommands {
    /// List the latest watch events, newest first
    List {
        /// Number of events: 10, 25, 50 or 100
        #[arg(long, value_parser = commands::parse_page_size)]
        limit: Option<u32>,
    },
    /// Change the date, picker or title of an event
    #[command(long_about = "Amend a watch event. Use --date, --picker and --title for a plain edit, or --attach <query> to replace the title with a search result (the usual way to resolve a placeholder).")]
    Edit {
        id: i64,
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        #[arg(long, value_name = "ID")]
        picker: Option<i64>,
        #[arg(long, conflicts_with = "attach")]
        title: Option<String>,
        /// Search for the title to attach
        #[arg(long, value_name = "QUERY")]
        attach: Option<String>,
        /// Which search result to attach (1-based); asks when omitted
        #[arg(long, value_name = "N", requires = "attach")]
        pick: Option<usize>,
        #[arg(long, value_enum, requires = "attach")]
        mode: Option<ModeArg>,
        /// How far back to look for the event (10, 25, 50 or 100)
        #[arg(long, value_parser = commands::parse_page_size)]
        limit: Option<u32>,
    },
    /// Delete an event
    Delete {
        id: i64,
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
        #[arg(long, value_parser = commands::parse_page_size)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();
    let config = commands::load_config(&paths, cli.backend_url.as_deref())?;

    logging::init_logging_with_file(cli.verbose, cli.quiet, config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize logging: {}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Home => home::run_home(&config, &output).await,
        Commands::Confirm { date } => home::run_confirm(&config, date, &output).await,
        Commands::Search {
            query,
            mode,
            pick,
            picker,
            date,
            interactive,
        } => {
            let mode = mode.map(SearchMode::from);
            if interactive {
                search::run_interactive(&config, mode, &output).await
            } else {
                let query = query.unwrap_or_default();
                search::run_search(&config, &query, mode, pick, picker, date, &output).await
            }
        }
        Commands::Users { cmd } => users::run_users(&config, cmd, &output).await,
        Commands::Watchlog { cmd } => watchlog::run_watchlog(&config, cmd, &output).await,
        Commands::Config { cmd } => {
            config_cmd::run_config(cmd.unwrap_or(ConfigCommands::Show), &config, &paths, &output)
        }
        Commands::Status => status::run_status(&config, &output).await,
    }
}
