//! treemark - Generate Markdown pages and a site sidebar from topic records

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use treemark::{
    collect_topics, update_sidebar_file, write_pages, DirectorySink, HttpFeed, JsonFileFeed,
    LevelPattern, RenderOptions, TopicFeed, TopicService,
};

#[derive(Parser, Debug)]
#[command(name = "treemark")]
#[command(version, about = "Render topic document trees to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    treemark -i topics.json                    Write pages to . and patch ./config.mts
    treemark -i topics.json -o docs --no-sidebar
    treemark --api-url https://host/api        Fetch topics, token from SQL_API_KEY")]
struct Cli {
    /// JSON file holding an array of topic records
    #[arg(
        short,
        long,
        env = "TREEMARK_INPUT",
        value_name = "FILE",
        required_unless_present = "api_url",
        conflicts_with = "api_url"
    )]
    input: Option<PathBuf>,

    /// Topic API endpoint (count on GET, record on POST {"index": i})
    #[arg(long, env = "TREEMARK_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Token sent in the X-Auth-Token header
    #[arg(long, env = "SQL_API_KEY", hide_env_values = true)]
    token: Option<String>,

    /// Directory the Markdown pages are written to
    #[arg(short, long, env = "TREEMARK_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Site configuration file holding the `sidebar: [...]` array
    #[arg(short, long, env = "TREEMARK_CONFIG", default_value = "./config.mts")]
    config: PathBuf,

    /// Indentation unit for nested list items
    #[arg(long, default_value = "\t")]
    indent: String,

    /// Never read numbers from `level-N` tags; only tree depth marks deep items
    #[arg(long)]
    legacy_levels: bool,

    /// Do not touch the site configuration
    #[arg(long)]
    no_sidebar: bool,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent_unit: self.indent.clone(),
            level_pattern: if self.legacy_levels {
                LevelPattern::Legacy
            } else {
                LevelPattern::Digits
            },
            ..Default::default()
        }
    }

    fn open_feed(&self) -> anyhow::Result<(String, Box<dyn TopicFeed>)> {
        match (&self.input, &self.api_url) {
            (Some(path), _) => {
                let feed: Box<dyn TopicFeed> = Box::new(
                    JsonFileFeed::open(path)
                        .with_context(|| format!("loading topics from {}", path.display()))?,
                );
                Ok((path.display().to_string(), feed))
            }
            (None, Some(url)) => {
                if self.token.is_none() {
                    tracing::warn!(
                        "no API token set, requests are sent without {}",
                        treemark::AUTH_HEADER
                    );
                }
                let feed: Box<dyn TopicFeed> =
                    Box::new(HttpFeed::new(url.as_str(), self.token.clone())?);
                Ok((url.clone(), feed))
            }
            (None, None) => anyhow::bail!("either --input or --api-url is required"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("treemark=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (source, feed) = cli.open_feed()?;
    let topics = collect_topics(feed.as_ref())?;
    tracing::info!("++ Loaded {} topics from {}", topics.len(), source);

    let service = TopicService::with_options(cli.render_options());
    let pages = service.render_all(&topics);

    let sink = DirectorySink::new(&cli.out_dir);
    let entries = write_pages(&sink, &pages)?;
    tracing::info!("++ Wrote {} pages to {}", pages.len(), cli.out_dir.display());

    if cli.no_sidebar {
        return Ok(());
    }

    if update_sidebar_file(&cli.config, &entries)? {
        tracing::info!("++ Sidebar updated in {}", cli.config.display());
    }

    Ok(())
}
