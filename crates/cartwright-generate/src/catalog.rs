use std::collections::HashSet;

use chrono::Duration;
use fake::Fake;
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::faker::lorem::en::Paragraph;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cartwright_core::{round_cents, Category, GeneratorConfig, Product};

use crate::errors::GenerateError;

const PRODUCT_TIERS: [&str; 5] = ["Pro", "Premium", "Deluxe", "Standard", "Basic"];
const DESCRIPTION_MAX_CHARS: usize = 200;
const MAX_UNIQUE_ATTEMPTS: u32 = 100;

/// Synthesize `config.products` catalog rows with dense ids from 1 and
/// collision-free SKUs.
pub fn synthesize_products(
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Product>, GenerateError> {
    let mut products = Vec::with_capacity(config.products);
    let mut seen_skus: HashSet<String> = HashSet::new();
    let (ratio_min, ratio_max) = config.cost_ratio_range;

    for product_id in 1..=config.products as i64 {
        let name: String = CatchPhrase().fake_with_rng(rng);
        let tier = pick(&PRODUCT_TIERS, rng);
        let category = pick(&Category::ALL, rng);
        // Lorem text is ASCII, so a byte-index truncate is safe.
        let mut description: String = Paragraph(2..4).fake_with_rng(rng);
        description.truncate(DESCRIPTION_MAX_CHARS);
        let price = round_cents(rng.random_range(config.price_range.0..=config.price_range.1));
        let cost = round_cents(price * rng.random_range(ratio_min..=ratio_max));
        let days_back = rng.random_range(0..=config.catalog_window_days);

        products.push(Product {
            product_id,
            product_name: format!("{name} {tier}"),
            category,
            description,
            price,
            cost,
            stock_quantity: rng.random_range(0..=config.max_stock),
            sku: unique_sku(&mut seen_skus, rng)?,
            brand: CompanyName().fake_with_rng(rng),
            created_date: config.reference_date.date() - Duration::days(days_back),
            is_active: rng.random_bool(config.active_rate),
        });
    }
    Ok(products)
}

/// Draw a `SKU-####-AAA` code not seen before, regenerating on collision.
fn unique_sku(
    seen: &mut HashSet<String>,
    rng: &mut ChaCha8Rng,
) -> Result<String, GenerateError> {
    for _ in 0..MAX_UNIQUE_ATTEMPTS {
        let digits: u32 = rng.random_range(0..10_000);
        let letters: String = (0..3)
            .map(|_| char::from(b'A' + rng.random_range(0..26u8)))
            .collect();
        let candidate = format!("SKU-{digits:04}-{letters}");
        if seen.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }
    Err(GenerateError::UniqueExhausted("sku"))
}

fn pick<T: Copy>(values: &[T], rng: &mut ChaCha8Rng) -> T {
    values[rng.random_range(0..values.len())]
}
