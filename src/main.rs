use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use wikisearch::api::create_router;
use wikisearch::config::Config;
use wikisearch::snippet;
use wikisearch::wiki::{Article, WikiClient};

#[derive(Parser)]
#[command(name = "wikisearch", version, about = "Search Wikipedia articles")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the search UI and JSON API
    Serve {
        #[arg(long)]
        bind: Option<SocketAddr>,
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Run a single search and print the results
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Print the articles as JSON
        #[arg(long)]
        json: bool,
        /// Override the number of results requested
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    match cli.command {
        Command::Serve { bind, static_dir } => {
            let client = WikiClient::new(config.client_config())
                .context("Failed to create Wikipedia client")?;
            let bind = bind.unwrap_or(config.bind_addr);
            let static_dir = static_dir.unwrap_or(config.static_dir);
            serve(client, bind, static_dir).await
        }
        Command::Search { query, json, limit } => {
            let mut client_config = config.client_config();
            if let Some(limit) = limit {
                client_config.limit = limit;
            }
            let client =
                WikiClient::new(client_config).context("Failed to create Wikipedia client")?;
            search(client, &query.join(" "), json).await
        }
    }
}

async fn serve(client: WikiClient, bind: SocketAddr, static_dir: PathBuf) -> anyhow::Result<()> {
    tracing::info!(
        api = %client.base_url(),
        static_dir = %static_dir.display(),
        "starting server on http://{bind}"
    );
    let router = create_router(Arc::new(client), static_dir);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await
        .context("Server error")?;
    Ok(())
}

async fn search(client: WikiClient, query: &str, json: bool) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let articles = client.search_with_cancel(query, &cancel).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
    } else {
        print_articles(&articles);
    }
    Ok(())
}

fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles found.");
        return;
    }
    for (i, article) in articles.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, article.title, article.pageid);
        println!(
            "   {}",
            article.fullurl.as_deref().unwrap_or("(no url)")
        );
        let text = snippet::to_plain_text(&article.snippet);
        if !text.is_empty() {
            println!("   {text}");
        }
    }
}
