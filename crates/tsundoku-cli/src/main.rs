use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use tsundoku_api::MalClient;
use tsundoku_core::config::AppConfig;
use tsundoku_core::timeline::group_timeline;
use tsundoku_core::view::{self, GridView, StatusFilter, TypeFilter};
use tsundoku_core::CollectionKind;

mod logging;
mod render;

#[derive(Parser)]
#[command(name = "tsundoku")]
#[command(about = "Browse a MyAnimeList collection as a grid or timeline")]
#[command(version)]
struct Cli {
    /// Enable verbose output (repeat for more: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the configured MAL client id
    #[arg(long, global = true, value_name = "ID")]
    client_id: Option<String>,

    /// Override the configured MAL username
    #[arg(long, global = true, value_name = "NAME")]
    username: Option<String>,

    /// Override the fetch-all pagination guard
    #[arg(long, global = true, value_name = "PAGES")]
    page_cap: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the collection as a filtered, paginated grid
    Grid {
        #[arg(long, value_enum, default_value = "anime")]
        kind: KindArg,

        /// Type filter
        #[arg(long = "type", value_enum, default_value = "all")]
        type_filter: TypeArg,

        /// Status filter
        #[arg(long, value_enum, default_value = "all")]
        status: StatusArg,

        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Follow pagination and fetch the complete list
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Page size requested from the API
        #[arg(long)]
        limit: Option<u32>,

        /// Print the filtered items as JSON instead of the grid
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Render the collection as a chronological timeline
    Timeline {
        #[arg(long, value_enum, default_value = "anime")]
        kind: KindArg,

        /// Page size requested from the API
        #[arg(long)]
        limit: Option<u32>,

        /// Print the dated items as JSON instead of the timeline
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (credential masked)
    Show,
    /// Print the config file location
    Path,
    /// Write the built-in defaults to the config path
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Anime,
    Manga,
}

impl From<KindArg> for CollectionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Anime => Self::Anime,
            KindArg::Manga => Self::Manga,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TypeArg {
    All,
    Tv,
    Movie,
    Manga,
}

impl From<TypeArg> for TypeFilter {
    fn from(filter: TypeArg) -> Self {
        match filter {
            TypeArg::All => Self::All,
            TypeArg::Tv => Self::Tv,
            TypeArg::Movie => Self::Movie,
            TypeArg::Manga => Self::Manga,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    All,
    Consuming,
    Completed,
    Plan,
}

impl From<StatusArg> for StatusFilter {
    fn from(filter: StatusArg) -> Self {
        match filter {
            StatusArg::All => Self::All,
            StatusArg::Consuming => Self::Consuming,
            StatusArg::Completed => Self::Completed,
            StatusArg::Plan => Self::Plan,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let mut config = AppConfig::load()?;
    if let Some(id) = cli.client_id {
        config.mal.client_id = Some(id);
    }
    if let Some(name) = cli.username {
        config.mal.username = Some(name);
    }
    if let Some(cap) = cli.page_cap {
        config.mal.page_cap = cap;
    }

    match cli.command {
        Commands::Grid {
            kind,
            type_filter,
            status,
            page,
            all,
            limit,
            json,
        } => run_grid(&config, kind, type_filter, status, page, all, limit, json).await,
        Commands::Timeline { kind, limit, json } => run_timeline(&config, kind, limit, json).await,
        Commands::Config { cmd } => run_config(&config, cmd),
    }
}

fn client_from(config: &AppConfig) -> MalClient {
    MalClient::new(
        config.mal.client_id.clone().unwrap_or_default(),
        config.mal.username.clone().unwrap_or_default(),
    )
    .with_page_cap(config.mal.page_cap)
}

#[allow(clippy::too_many_arguments)]
async fn run_grid(
    config: &AppConfig,
    kind: KindArg,
    type_filter: TypeArg,
    status: StatusArg,
    page: usize,
    all: bool,
    limit: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let client = client_from(config);
    let kind: CollectionKind = kind.into();
    let result = if all {
        client.fetch_list_all(kind, limit).await
    } else {
        client.fetch_list(kind, limit).await
    };

    let mut items = result.items;
    view::sort_for_grid(&mut items);

    let mut grid = GridView::new();
    if type_filter != TypeArg::All && !grid.set_type_filter(&items, type_filter.into()) {
        tracing::warn!(filter = ?type_filter, "type filter has no matching entries, showing all");
    }
    if status != StatusArg::All && !grid.set_status_filter(&items, status.into()) {
        tracing::warn!(filter = ?status, "status filter has no matching entries, showing all");
    }
    grid.set_page(&items, page);

    if json {
        println!("{}", serde_json::to_string_pretty(&grid.filtered(&items))?);
        return Ok(());
    }
    print!("{}", render::render_grid(&items, &grid, result.error.as_deref()));
    Ok(())
}

async fn run_timeline(
    config: &AppConfig,
    kind: KindArg,
    limit: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let client = client_from(config);
    let result = client.fetch_list_all(kind.into(), limit).await;

    let mut items = result.items;
    view::sort_for_timeline(&mut items);
    let groups = group_timeline(&items);

    if json {
        let dated: Vec<_> = groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.item))
            .collect();
        println!("{}", serde_json::to_string_pretty(&dated)?);
        return Ok(());
    }
    print!("{}", render::render_timeline(&groups, result.error.as_deref()));
    Ok(())
}

fn run_config(config: &AppConfig, cmd: ConfigCommands) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => print!("{}", render::render_config(config)),
        ConfigCommands::Path => println!("{}", AppConfig::config_path().display()),
        ConfigCommands::Init => {
            let path = AppConfig::write_default()?;
            println!("created {}", path.display());
        }
    }
    Ok(())
}
