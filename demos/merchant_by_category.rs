//! Lists the advertisers in one category, with their commission terms.
//!
//! ```sh
//! LINKSHARE_CLIENT_ID=... LINKSHARE_CLIENT_SECRET=... \
//! LINKSHARE_USERNAME=... LINKSHARE_PASSWORD=... LINKSHARE_SID=... \
//! cargo run --example merchant_by_category -- 11
//! ```

use std::env;

use linkshare_client::link_locator::LinkLocatorRequest;
use linkshare_client::{ClientConfig, LinkshareClient};

fn env_var(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

#[tokio::main]
async fn main() -> linkshare_client::Result<()> {
    let category: u64 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .expect("usage: merchant_by_category <category-id>");

    let config = ClientConfig::new(
        env_var("LINKSHARE_CLIENT_ID"),
        env_var("LINKSHARE_CLIENT_SECRET"),
    )
    .with_credentials(env_var("LINKSHARE_USERNAME"), env_var("LINKSHARE_PASSWORD"))
    .with_scope(env_var("LINKSHARE_SID"));

    let mut client = LinkshareClient::new(config)?;
    let result = client.link_locator(&LinkLocatorRequest::MerchantByCategory(category)).await?;

    if let Some(fault) = result.fault() {
        eprintln!("{fault}");
        return Ok(());
    }

    println!("{} advertisers in category {category}\n", result.merchants().len());
    for merchant in result.merchants() {
        println!("{merchant}");
    }

    Ok(())
}
