//! Look up a drug product by DIN with the async client.
//!
//! Run with: `cargo run --example drug_product`

use dpd_client::client::DpdClient;
use dpd_client::params::DrugProductParams;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = DpdClient::builder()
        .cache_ttl(std::time::Duration::from_secs(300))
        .build()?;

    let products = client
        .drug_product(DrugProductParams::new().with_din("00326925"))
        .await?;

    for product in &products {
        println!(
            "{} — {}",
            product.drug_identification_number.as_deref().unwrap_or("?"),
            product.brand_name.as_deref().unwrap_or("?"),
        );
    }
    Ok(())
}
