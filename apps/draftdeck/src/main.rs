//! # DraftDeck
//!
//! Headless entry point: wires the store to the content service and runs a
//! single command against it.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use draftdeck_core::domain::{PostFilters, PostStatus, PostType, SourceQuery};
use draftdeck_core::editor::EditorTab;

mod config;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[derive(Parser)]
#[command(version, about = "DraftDeck - content drafts from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts (the default)
    List {
        /// draft, published, scheduled, archived, rejected or deleted
        #[arg(long)]
        status: Option<PostStatus>,

        #[arg(long)]
        search: Option<String>,

        /// Keep paging until the backend runs out
        #[arg(long)]
        all: bool,
    },
    /// Write a post's blog content to a markdown file
    Export {
        post_id: String,

        /// Output directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print a post's platform variant, loading it from its thread if missing
    Variant {
        post_id: String,

        #[arg(value_enum)]
        platform: Platform,
    },
    /// Show the link preview for a URL
    Preview { url: String },
    /// List ingested sources
    Sources {
        #[arg(long = "type")]
        source_type: Option<String>,

        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Generate posts from a tweet or a web page
    Generate {
        /// Numeric tweet id, or an http(s) URL
        source: String,

        #[arg(long = "type", value_enum, required = true)]
        types: Vec<Platform>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Platform {
    Blog,
    Twitter,
    Linkedin,
}

impl Platform {
    fn post_type(self) -> PostType {
        match self {
            Platform::Blog => PostType::Blog,
            Platform::Twitter => PostType::Twitter,
            Platform::Linkedin => PostType::Linkedin,
        }
    }

    fn tab(self) -> EditorTab {
        match self {
            Platform::Blog => EditorTab::Blog,
            Platform::Twitter => EditorTab::Twitter,
            Platform::Linkedin => EditorTab::Linkedin,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(base_url = %config.api.base_url, "Starting DraftDeck");

    let state = AppState::new(&config)?;

    match cli.command.unwrap_or(Commands::List {
        status: None,
        search: None,
        all: false,
    }) {
        Commands::List {
            status,
            search,
            all,
        } => list(&state, status, search, all).await,
        Commands::Export { post_id, dir } => export(&state, &post_id, &dir).await,
        Commands::Variant { post_id, platform } => variant(&state, &post_id, platform).await,
        Commands::Preview { url } => {
            let preview = state.previews.preview(&url).await?;
            println!("{}", preview.title.as_deref().unwrap_or("(untitled)"));
            if let Some(description) = preview.description {
                println!("{description}");
            }
            Ok(())
        }
        Commands::Sources { source_type, skip } => {
            let page = state
                .importer
                .list_sources(&SourceQuery {
                    source_type,
                    skip,
                    ..Default::default()
                })
                .await?;
            for item in &page.items {
                println!(
                    "{}\t{}\t{}",
                    item.id,
                    item.source_type,
                    item.title.as_deref().unwrap_or("")
                );
            }
            println!("{} of {}", page.items.len(), page.total);
            Ok(())
        }
        Commands::Generate { source, types } => {
            let types: Vec<PostType> = types.into_iter().map(Platform::post_type).collect();
            if source.contains("://") {
                state.importer.generate_from_url(&source, &types).await?;
            } else {
                state.importer.generate_from_tweet(&source, &types).await?;
            }
            println!("Generation requested; {} posts loaded", state.store.posts().await.len());
            Ok(())
        }
    }
}

async fn list(
    state: &AppState,
    status: Option<PostStatus>,
    search: Option<String>,
    all: bool,
) -> Result<()> {
    let store = &state.store;
    let mut filters = PostFilters {
        search,
        ..Default::default()
    };
    if let Some(status) = status {
        filters = filters.with_status(status);
    }

    store
        .fetch_posts(filters, 0, store.config().page_size)
        .await;
    while all && store.error().await.is_none() && store.load_more().await {}

    if let Some(error) = store.error().await {
        bail!(error);
    }

    let posts = store.posts().await;
    for post in &posts {
        println!("{}\t{}\t{}", post.id, post.status, post.title);
    }

    let pagination = store.pagination().await;
    tracing::info!(
        count = posts.len(),
        reached_end = pagination.has_reached_end,
        "Listed posts"
    );
    Ok(())
}

/// Load posts until `post_id` shows up, then make it current.
async fn open_post(state: &AppState, post_id: &str) -> Result<()> {
    let store = &state.store;
    store
        .fetch_posts(PostFilters::default(), 0, store.config().page_size)
        .await;

    loop {
        if let Some(error) = store.error().await {
            bail!(error);
        }
        if let Some(post) = store.posts().await.into_iter().find(|p| p.id == post_id) {
            store.set_current_post(Some(post)).await;
            return Ok(());
        }
        if !store.load_more().await {
            bail!("Post {post_id} not found");
        }
    }
}

async fn export(state: &AppState, post_id: &str, dir: &std::path::Path) -> Result<()> {
    open_post(state, post_id).await?;

    let export = state
        .store
        .download_markdown()
        .await
        .context("No post selected")?;
    let path = draftdeck_infra::write_markdown(dir, &export).await?;
    println!("{}", path.display());
    Ok(())
}

async fn variant(state: &AppState, post_id: &str, platform: Platform) -> Result<()> {
    open_post(state, post_id).await?;

    let mut editor = state.editor();
    if let Some(fetch) = editor.select_tab(platform.tab()).await {
        fetch.run().await;
    }
    println!("{}", editor.text().await);
    Ok(())
}
