//! Browse a catalog file from the command line
//!
//! ```text
//! cargo run --example browse -- demos/data/tools.json --category seo --rating 4 --sort name
//! ```

use anyhow::{Context, Result, bail};
use catalog::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "browse")]
#[command(about = "Search, filter and page through a tool catalog")]
struct Cli {
    /// Catalog document (.json, .yaml or .yml)
    catalog: PathBuf,
    /// Case-insensitive search over name, description, category and tags
    #[arg(long)]
    search: Option<String>,
    /// Category slug or "all"
    #[arg(long)]
    category: Option<String>,
    /// Price tier (free, paid, freemium) or "all"
    #[arg(long)]
    price: Option<String>,
    /// Minimum rating 0-5 or "all"
    #[arg(long)]
    rating: Option<String>,
    /// popular, rating, name or newest
    #[arg(long)]
    sort: Option<String>,
    /// Number of pages to reveal
    #[arg(long, default_value_t = 1)]
    pages: usize,
    /// Items per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    /// Show the detail view of one item id instead of the grid
    #[arg(long)]
    detail: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let source = FileSource::new(&cli.catalog)?;
    let mut session = BrowseSession::open(Box::new(source), cli.page_size).await;

    let browser = match session.browser_mut() {
        Ok(browser) => browser,
        Err(err) => bail!("catalog unavailable ({}): {}", err.error_code(), err),
    };

    if let Some(id) = cli.detail {
        let item = browser
            .item(ItemId(id))
            .with_context(|| format!("no item with id {}", id))?;
        println!("{}", serde_json::to_string_pretty(&ItemDetail::from(item))?);
        return Ok(());
    }

    let params = QueryParams {
        search: cli.search,
        category: cli.category,
        price: cli.price,
        rating: cli.rating,
        sort: cli.sort,
    };
    browser.set_query(params.into_update()?);
    for _ in 1..cli.pages {
        if !browser.load_more() {
            break;
        }
    }

    let view = browser.view();
    match view.state {
        ViewState::NoMatches => {
            println!("No tools found. Try adjusting your search terms or filters.");
            if view.filters_active {
                println!("(clear the filters to see all {} tools)", view.catalog_size);
            }
        }
        _ => {
            for item in &view.items {
                println!(
                    "{:>4}  {:<20} {:<18} {:<8} {:>3.1} ({})",
                    item.id.0,
                    item.name,
                    item.category.display_name(),
                    item.price.label(),
                    item.rating.value(),
                    item.review_count
                );
            }
            println!(
                "\nShowing {} of {} matches ({} in catalog){}",
                view.visible_count,
                view.total_match_count,
                view.catalog_size,
                if view.has_more { ", more available" } else { "" }
            );
        }
    }

    Ok(())
}
