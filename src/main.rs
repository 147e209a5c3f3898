use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use marquee::api::MediaApi;
use marquee::config::Config;
use marquee::effects::Effects;
use marquee::registry::{self, CategoryEntry, ContentType};
use marquee::store::{Selectors, Store};
use marquee::view;

/// Output width for rendered rows.
const WIDTH: usize = 80;

/// Get the config directory path (~/.config/marquee/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("marquee"))
}

#[derive(Parser, Debug)]
#[command(name = "marquee", about = "Browse movie and series rows from the terminal")]
struct Args {
    /// Config file (defaults to ~/.config/marquee/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Content type to browse: movies, series or popular
    #[arg(long, value_name = "TYPE", default_value = "movies")]
    browse: String,

    /// Fetch a single row by genre key (see --list-categories)
    #[arg(long, value_name = "KEY")]
    category: Option<String>,

    /// Pages to load for --category
    #[arg(long, value_name = "N", default_value_t = 1)]
    pages: u32,

    /// Search movies, series and people
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Print the registered rows and exit
    #[arg(long)]
    list_categories: bool,
}

fn print_rows(store: &Store, selectors: &mut Selectors, entries: &[&'static CategoryEntry]) {
    let mut rng = rand::thread_rng();
    for entry in entries {
        let state = store.state();
        let (Some(items), Some(meta)) = (
            selectors.category_data(state, &entry.key),
            selectors.category_meta(state, &entry.key),
        ) else {
            continue;
        };
        if let Some(error) = &meta.error {
            tracing::debug!(slice = %entry.key, error = %error, "Row failed");
        }
        println!("{}", view::render_row(entry, &items, &meta, WIDTH, &mut rng));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered rows
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_categories {
        print!("{}", view::render_category_list());
        return Ok(());
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let content = ContentType::from_route(&args.browse)
        .with_context(|| format!("Unknown content type '{}'", args.browse))?;

    let api = MediaApi::from_config(&config).context("Failed to create media API client")?;
    let mut store = Store::new();
    let effects = Effects::new(api, &store);
    let mut selectors = Selectors::new(config.selector_cache_capacity);

    if let Some(query) = &args.search {
        let handles = effects.search(&mut store, query).into_iter().collect();
        store.run_until_settled(handles).await;
        print!("{}", view::render_search(&store.state().search, WIDTH));
        return Ok(());
    }

    if let Some(genre) = &args.category {
        let entry = registry::find(content, genre).with_context(|| {
            format!(
                "Unknown category '{}' for {} (try --list-categories)",
                genre, content
            )
        })?;

        let handle = effects.fetch_category(&mut store, entry);
        store.run_until_settled(vec![handle]).await;

        for _ in 1..args.pages {
            match effects.load_more(&mut store, entry) {
                Some(handle) => store.run_until_settled(vec![handle]).await,
                None => break,
            }
        }

        print_rows(&store, &mut selectors, &[entry]);
        return Ok(());
    }

    let handles = effects.fetch_rows(&mut store, content);
    store.run_until_settled(handles).await;

    let entries: Vec<&'static CategoryEntry> = content.entries().iter().collect();
    print_rows(&store, &mut selectors, &entries);

    Ok(())
}
