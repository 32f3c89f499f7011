use anyhow::Context;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

use condotel_search::features::search::{
    ListingFetcher, NavigationContext, PagerItem, SearchApi, pager_items, resolve,
};
use condotel_search::utilities::config::Config;

/// Resolve and fetch one listing page for a URL given on the command line,
/// then print what the page would render.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::init().await?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.tracing_level.to_string())),
        )
        .init();

    let raw_url = std::env::args()
        .nth(1)
        .context("usage: condotel-search <listing-page-url>")?;
    let url = Url::parse(&raw_url).context("listing-page url is not a valid URL")?;

    let ctx = NavigationContext::from_url(&url);
    let query = resolve(&ctx);
    debug!(?query, "resolved from {raw_url}");

    let fetcher = ListingFetcher::new(SearchApi::from_config(&config));
    let Some(view) = fetcher.fetch_view(&query).await else {
        return Ok(());
    };

    if let Some(message) = &view.error {
        println!("{message}");
        return Ok(());
    }

    for listing in &view.listings {
        let price = listing
            .price_per_night
            .map(|p| format!("{p}/night"))
            .unwrap_or_else(|| "price on request".to_string());
        println!("#{} {} — {}", listing.id, listing.name, price);
    }

    match &view.pagination {
        Some(pagination) => {
            println!("Total: {}", pagination.total_count);
            if pagination.total_pages > 1 {
                let row: Vec<String> = pager_items(pagination.page_number, pagination.total_pages)
                    .into_iter()
                    .map(|item| match item {
                        PagerItem::Page(n) if n == pagination.page_number => format!("[{n}]"),
                        PagerItem::Page(n) => n.to_string(),
                        PagerItem::Ellipsis => "…".to_string(),
                    })
                    .collect();
                println!("{}", row.join(" "));
            }
        }
        None => println!("Total: {}", view.listings.len()),
    }

    Ok(())
}
