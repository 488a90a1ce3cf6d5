mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vaultquery_core::SearchField;

#[derive(Debug, Parser)]
#[command(name = "vq", version, about = "Search a markdown vault and query its link graph")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    /// Vault root to query instead of the profile's vault_root
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Case-insensitive substring search, in vault order
    Search(SearchArgs),

    /// Ranked fuzzy match on file names and content
    Fuzzy(FuzzyArgs),

    /// List documents with their links, optionally around a seed note
    Graph(GraphArgs),

    /// Check whether two notes are linked within a number of hops
    Connected(ConnectedArgs),

    /// Show outgoing links and backlinks of one note
    Links(LinksArgs),

    /// List notes with no resolved links in either direction
    Orphans(OutputArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Quiet,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Shorthand for --output quiet (paths only)
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,

    /// Field to match: content, filename, tag, link, frontmatter
    #[arg(long, short, default_value = "content", value_parser = parse_field)]
    pub field: SearchField,

    /// Maximum number of documents to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Lines of context around each matching line
    #[arg(long, short = 'C')]
    pub context: Option<usize>,

    /// Include each matching document's full text (JSON output)
    #[arg(long)]
    pub content: bool,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct FuzzyArgs {
    /// Approximate note name or text
    pub query: String,

    /// Maximum number of documents to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Only keep notes connected to this one
    #[arg(long)]
    pub seed: Option<String>,

    /// Maximum hops from the seed
    #[arg(long, short)]
    pub depth: Option<usize>,

    /// Keep notes without any resolved link
    #[arg(long)]
    pub orphans: bool,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ConnectedArgs {
    /// Note to start from
    pub from: String,

    /// Note to reach
    pub to: String,

    /// Maximum number of hops
    #[arg(long, short)]
    pub depth: Option<usize>,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Note path or name, resolved like a wiki-link
    pub note: String,

    #[command(flatten)]
    pub out: OutputArgs,
}

fn parse_field(s: &str) -> Result<SearchField, String> {
    SearchField::from_str(s).ok_or_else(|| {
        format!("unknown field '{s}' (expected content, filename, tag, link or frontmatter)")
    })
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();
    let vault = cli.vault.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Search(args) => cmd::search::run(config, profile, vault, args),
        Commands::Fuzzy(args) => cmd::fuzzy::run(config, profile, vault, args),
        Commands::Graph(args) => cmd::graph::run(config, profile, vault, args),
        Commands::Connected(args) => cmd::connected::run(config, profile, vault, args),
        Commands::Links(args) => cmd::links::run(config, profile, vault, args),
        Commands::Orphans(args) => cmd::orphans::run(config, profile, vault, args),
    }

    logging::shutdown();
    Ok(())
}
