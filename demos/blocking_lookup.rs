//! Look up a drug product by DIN with the blocking client.
//!
//! Run with: `cargo run --example blocking_lookup`

use dpd_client::blocking::DpdClient;
use dpd_client::params::DrugProductParams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = DpdClient::new()?;

    let products = client.drug_product(DrugProductParams::new().with_din("00326925"))?;
    for product in &products {
        println!(
            "{} — {}",
            product.drug_identification_number.as_deref().unwrap_or("?"),
            product.brand_name.as_deref().unwrap_or("?"),
        );
    }
    Ok(())
}
