use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod cli;

#[derive(Parser)]
#[command(
    name = "placard",
    about = "Placard — feed-driven legal notice engine",
    version,
    after_help = "Run 'placard <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, filter, and render disclaimers for one page URL
    Render {
        /// URL of the page being rendered
        #[arg(long)]
        page_url: String,
        /// Feed URL to fetch
        #[arg(long, conflicts_with = "feed_file")]
        feed_url: Option<String>,
        /// Local feed file (bypasses the fetch)
        #[arg(long)]
        feed_file: Option<String>,
        /// Host pattern the widget may run against; repeatable
        #[arg(long = "allowed-domain")]
        allowed_domains: Vec<String>,
        /// Comma-separated division allow-list
        #[arg(long, default_value = "ALL")]
        division: String,
        /// Target container id
        #[arg(long, default_value = placard::config::DEFAULT_CONTAINER_ID)]
        container_id: String,
        /// Number records sequentially instead of by ordering hint
        #[arg(long)]
        ignore_ordering_hint: bool,
        /// Reference-date override ("YYYY-MM-DD HH:MM:SS"); only honored
        /// when the page host is in a --staging-host entry
        #[arg(long)]
        at: Option<String>,
        /// Host on which --at is honored; repeatable
        #[arg(long = "staging-host")]
        staging_hosts: Vec<String>,
        /// Feed fetch timeout in milliseconds
        #[arg(long, default_value_t = placard::config::DEFAULT_FETCH_TIMEOUT_MS)]
        timeout: u64,
    },
    /// Load a feed and report which records pass validation
    Validate {
        /// Feed URL to fetch
        #[arg(long, conflicts_with = "feed_file")]
        feed_url: Option<String>,
        /// Local feed file (bypasses the fetch)
        #[arg(long)]
        feed_file: Option<String>,
        /// Host pattern feed URLs must match; repeatable
        #[arg(long = "allowed-domain")]
        allowed_domains: Vec<String>,
        /// Feed fetch timeout in milliseconds
        #[arg(long, default_value_t = placard::config::DEFAULT_FETCH_TIMEOUT_MS)]
        timeout: u64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "placard=debug" } else { "placard=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().expect("valid filter directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render {
            page_url,
            feed_url,
            feed_file,
            allowed_domains,
            division,
            container_id,
            ignore_ordering_hint,
            at,
            staging_hosts,
            timeout,
        } => {
            let options = cli::options_from_flags(
                feed_url.as_deref(),
                feed_file.as_deref(),
                &allowed_domains,
                &division,
                &container_id,
                ignore_ordering_hint,
                at.as_deref(),
                &staging_hosts,
                timeout,
            )?;
            cli::render_cmd::run(options, &page_url, cli.json).await
        }
        Commands::Validate {
            feed_url,
            feed_file,
            allowed_domains,
            timeout,
        } => {
            let options = cli::options_from_flags(
                feed_url.as_deref(),
                feed_file.as_deref(),
                &allowed_domains,
                "ALL",
                placard::config::DEFAULT_CONTAINER_ID,
                false,
                None,
                &[],
                timeout,
            )?;
            cli::validate_cmd::run(options, cli.json).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "placard", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }
    result
}
