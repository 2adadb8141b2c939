use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use nb_analysis::prelude::*;
use nb_analysis::{cluster_articles, dedupe_articles, filter_with_auto_relax};
use nb_core::config::{
    DEFAULT_CLUSTER_THRESHOLD, DEFAULT_MAX_ARTICLES, DEFAULT_SUMMARIZER_STRATEGY,
    DEFAULT_TITLE_THRESHOLD, DEFAULT_TREND_DAYS, DEFAULT_TREND_TOP_N,
};
use nb_core::RawArticle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "News article dedupe, clustering and trends", long_about = None)]
struct Cli {
    /// Raw records beyond this count are ignored
    #[arg(long, global = true, env = "NB_MAX_ARTICLES", default_value_t = DEFAULT_MAX_ARTICLES)]
    max_articles: usize,
    #[arg(long, global = true, env = "NB_SUMMARIZER_STRATEGY", default_value = DEFAULT_SUMMARIZER_STRATEGY)]
    summarizer: String,
    /// Minimum title similarity for two articles to be duplicates
    #[arg(long, global = true, env = "NB_TITLE_THRESHOLD", default_value_t = DEFAULT_TITLE_THRESHOLD)]
    title_threshold: f64,
    /// Minimum cosine similarity for two articles to share a cluster
    #[arg(long, global = true, env = "NB_CLUSTER_THRESHOLD", default_value_t = DEFAULT_CLUSTER_THRESHOLD)]
    cluster_threshold: f64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize raw records and print the full feed
    Process {
        #[arg(long)]
        input: PathBuf,
    },
    /// Filter articles, widening the time window when nothing matches
    Filter {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = TopicFilter::ALL_LABEL)]
        topic: TopicFilter,
        /// One of 24h, 7d, 30d, all
        #[arg(long, default_value = "24h")]
        period: Period,
        #[arg(long, default_value = "")]
        keyword: String,
    },
    /// Keyword, source and topic statistics over recent articles
    Trends {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TREND_DAYS)]
        days: u32,
        #[arg(long, default_value_t = DEFAULT_TREND_TOP_N)]
        top_n: usize,
    },
    /// Dedupe and cluster articles
    Cluster {
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct ClusterOutput {
    items: Vec<Article>,
    clusters: Vec<Cluster>,
}

impl Cli {
    fn config(&self) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig {
            title_threshold: self.title_threshold,
            cluster_threshold: self.cluster_threshold,
            max_articles: self.max_articles,
            summarizer_strategy: self.summarizer.clone(),
            ..AnalysisConfig::default()
        };
        if let Commands::Trends { days, top_n, .. } = &self.command {
            config.trend_days = *days;
            config.trend_top_n = *top_n;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json<T: Serialize, W: Write>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    write_json(io::stdout().lock(), value)
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries JSON only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    match cli.command {
        Commands::Process { input } => {
            let raw: Vec<RawArticle> = load_json(&input)?;
            info!("📥 Loaded {} raw records from {}", raw.len(), input.display());
            let summarizer = nb_inference::create_summarizer(&config.summarizer_strategy)?;
            let articles = nb_inference::ingest(raw, summarizer.as_ref(), &config).await?;
            let feed = Pipeline::new(config)?.run(articles)?;
            print_json(&feed)?;
        }
        Commands::Filter {
            input,
            topic,
            period,
            keyword,
        } => {
            let articles: Vec<Article> = load_json(&input)?;
            let query = ArticleQuery {
                topic,
                period,
                keyword,
            };
            let outcome = filter_with_auto_relax(&articles, &query)?;
            print_json(&outcome)?;
        }
        Commands::Trends { input, .. } => {
            let articles: Vec<Article> = load_json(&input)?;
            let trends =
                nb_analysis::build_trends(&articles, config.trend_days, config.trend_top_n)?;
            print_json(&trends)?;
        }
        Commands::Cluster { input } => {
            let articles: Vec<Article> = load_json(&input)?;
            let deduped = dedupe_articles(articles, config.title_threshold);
            let (items, clusters) = cluster_articles(deduped, config.cluster_threshold);
            print_json(&ClusterOutput { items, clusters })?;
        }
    }

    Ok(())
}
