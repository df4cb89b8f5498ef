use clap::{ArgAction, Parser, Subcommand};
use commands::{config, discover, genres, search};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelfinder")]
#[command(about = "ReelFinder - Search movies, find trailers, and see where to watch")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search movies by free-text query. Each result is enriched with its trailer, external links (IMDB, official site, watch links), and streaming providers for your configured region.")]
    Search {
        /// The search query
        query: String,

        /// Result page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Metadata language (defaults to the configured language)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Browse popular movies, optionally filtered by genre
    #[command(long_about = "Browse movies sorted by popularity. Genres are given by display name (see the genres command); unknown names are ignored. Results are enriched the same way as search results.")]
    Discover {
        /// Genre display name filter, comma-separated (e.g. --genres Action,Comedy)
        #[arg(long, value_name = "NAMES", value_delimiter = ',')]
        genres: Vec<String>,

        /// Restrict to movies originally made in this language (e.g. 'ko')
        #[arg(long)]
        original_language: Option<String>,

        /// Result page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Metadata language (defaults to the configured language)
        #[arg(long)]
        lang: Option<String>,
    },
    /// List the known movie genres
    Genres {
        /// Metadata language (defaults to the configured language)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Configure credentials and settings
    #[command(long_about = "Manage configuration and credentials. Use subcommands to view settings or store API keys. Keys can also be supplied via the TMDB_API_KEY and SERPAPI_API_KEY environment variables, which take precedence over the stored ones.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks credentials)
    Show {
        /// Show full configuration including unmasked credentials
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store an API key in the credentials file
    SetKey {
        /// Which service the key belongs to
        #[arg(value_enum)]
        service: config::KeyService,

        /// The key value
        value: String,
    },

    /// Remove a stored API key
    ClearKey {
        /// Which service the key belongs to
        #[arg(value_enum)]
        service: config::KeyService,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search {
            query,
            page,
            page_size,
            lang,
        } => search::run_search(&query, page, page_size, lang.as_deref(), &output).await,
        Commands::Discover {
            genres,
            original_language,
            page,
            page_size,
            lang,
        } => {
            discover::run_discover(
                &genres,
                original_language.as_deref(),
                page,
                page_size,
                lang.as_deref(),
                &output,
            )
            .await
        }
        Commands::Genres { lang } => genres::run_genres(lang.as_deref(), &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
    }
}
