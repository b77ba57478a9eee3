//! Searches advertiser product feeds for a keyword.
//!
//! ```sh
//! LINKSHARE_CLIENT_ID=... LINKSHARE_CLIENT_SECRET=... \
//! LINKSHARE_USERNAME=... LINKSHARE_PASSWORD=... LINKSHARE_SID=... \
//! cargo run --example product_search -- "red shoes"
//! ```

use std::env;

use linkshare_client::product_search::{ProductSearchQuery, SortColumn, SortOrder};
use linkshare_client::{ClientConfig, LinkshareClient};

fn env_var(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

#[tokio::main]
async fn main() -> linkshare_client::Result<()> {
    let keyword = env::args().nth(1).expect("usage: product_search <keyword>");

    let config = ClientConfig::new(
        env_var("LINKSHARE_CLIENT_ID"),
        env_var("LINKSHARE_CLIENT_SECRET"),
    )
    .with_credentials(env_var("LINKSHARE_USERNAME"), env_var("LINKSHARE_PASSWORD"))
    .with_scope(env_var("LINKSHARE_SID"));

    let mut client = LinkshareClient::new(config)?;

    let query = ProductSearchQuery::new()
        .keyword(keyword)
        .max_results(20)
        .sort(SortColumn::RetailPrice, SortOrder::Asc);
    let result = client.product_search(&query).await?;

    if let Some(error) = result.error() {
        eprintln!("{error}");
        return Ok(());
    }

    println!(
        "{} matches, page {} of {}\n",
        result.total_matches().unwrap_or_default(),
        result.page_number().unwrap_or_default(),
        result.total_pages().unwrap_or_default(),
    );
    for item in result.items() {
        println!("{item}");
    }

    Ok(())
}
