use std::collections::HashSet;

use chrono::Duration;
use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cartwright_core::{
    round_cents, GeneratorConfig, Order, OrderItem, OrderStatus, Payment, PaymentMethod,
    PaymentStatus, Product,
};

use crate::errors::GenerateError;
use crate::people::mailing_address;
use crate::totals::DraftOrder;

const SECONDS_PER_DAY: i64 = 86_400;
const MAX_UNIQUE_ATTEMPTS: u32 = 100;

/// Synthesize order headers without their derived totals. Timestamps land
/// inside the configured window before the reference instant, at second
/// resolution.
pub fn draft_orders(config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> Vec<DraftOrder> {
    let mut drafts = Vec::with_capacity(config.orders);
    for order_id in 1..=config.orders as i64 {
        let customer_id = rng.random_range(1..=config.customers as i64);
        let seconds_back = rng.random_range(0..=config.order_window_days * SECONDS_PER_DAY);
        let shipping = mailing_address(rng);
        drafts.push(DraftOrder {
            order_id,
            customer_id,
            order_date: config.reference_date - Duration::seconds(seconds_back),
            status: pick(&OrderStatus::ALL, rng),
            shipping_address: shipping.street,
            shipping_city: shipping.city,
            shipping_state: shipping.state,
            shipping_zip: shipping.zip,
            shipping_country: shipping.country,
            shipping_cost: round_cents(rng.random_range(0.0..=config.max_shipping)),
            tax_amount: round_cents(rng.random_range(0.0..=config.max_tax)),
        });
    }
    drafts
}

/// Synthesize line items for every draft order: 1 to `max_items_per_order`
/// distinct products, each with a quantity and a discount drawn from the
/// configured wheel. Item ids are dense across all orders.
pub fn synthesize_items(
    config: &GeneratorConfig,
    drafts: &[DraftOrder],
    products: &[Product],
    rng: &mut ChaCha8Rng,
) -> Vec<OrderItem> {
    let mut items = Vec::new();
    let mut item_id = 1_i64;
    for draft in drafts {
        let want = rng.random_range(1..=config.max_items_per_order);
        let count = want.min(products.len());
        for product_index in index::sample(rng, products.len(), count) {
            let product = &products[product_index];
            let quantity = rng.random_range(1..=config.max_quantity);
            let discount = pick(&config.discount_choices, rng);
            let unit_price = round_cents(product.price * (1.0 - discount));
            items.push(OrderItem {
                item_id,
                order_id: draft.order_id,
                product_id: product.product_id,
                quantity,
                unit_price,
                // Stored as a percentage, matching the artifact contract.
                discount: round_cents(discount * 100.0),
                subtotal: round_cents(unit_price * quantity as f64),
            });
            item_id += 1;
        }
    }
    items
}

/// Synthesize payments for finalized orders. Most orders settle with one
/// payment equal to the total; the rest split into a first leg near
/// `split_first_fraction` of the total and a second leg covering exactly
/// the remainder, both Completed and strictly ordered in time.
pub fn synthesize_payments(
    config: &GeneratorConfig,
    orders: &[Order],
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Payment>, GenerateError> {
    let mut payments = Vec::new();
    let mut seen_codes: HashSet<String> = HashSet::new();
    let mut payment_id = 1_i64;
    let window = config.payment_window_days * SECONDS_PER_DAY;
    let first_window = (config.split_first_window_days * SECONDS_PER_DAY).min(window - 1);

    for order in orders {
        if rng.random_bool(config.single_payment_rate) {
            let offset = rng.random_range(1..=window);
            payments.push(Payment {
                payment_id,
                order_id: order.order_id,
                payment_date: order.order_date + Duration::seconds(offset),
                payment_method: pick(&PaymentMethod::ALL, rng),
                amount: round_cents(order.total_amount),
                status: pick(&PaymentStatus::ALL, rng),
                transaction_id: unique_transaction_id(&mut seen_codes, rng)?,
            });
            payment_id += 1;
        } else {
            let first_amount = round_cents(order.total_amount * config.split_first_fraction);
            let second_amount = round_cents(order.total_amount - first_amount);
            let first_offset = rng.random_range(1..=first_window);
            let second_offset = first_offset + rng.random_range(1..=window - first_offset);

            payments.push(Payment {
                payment_id,
                order_id: order.order_id,
                payment_date: order.order_date + Duration::seconds(first_offset),
                payment_method: pick(&PaymentMethod::ALL, rng),
                amount: first_amount,
                status: PaymentStatus::Completed,
                transaction_id: unique_transaction_id(&mut seen_codes, rng)?,
            });
            payment_id += 1;

            payments.push(Payment {
                payment_id,
                order_id: order.order_id,
                payment_date: order.order_date + Duration::seconds(second_offset),
                payment_method: pick(&PaymentMethod::ALL, rng),
                amount: second_amount,
                status: PaymentStatus::Completed,
                transaction_id: unique_transaction_id(&mut seen_codes, rng)?,
            });
            payment_id += 1;
        }
    }
    Ok(payments)
}

/// Draw a `TXN-` + 10 digit code not seen before, regenerating on collision.
fn unique_transaction_id(
    seen: &mut HashSet<String>,
    rng: &mut ChaCha8Rng,
) -> Result<String, GenerateError> {
    for _ in 0..MAX_UNIQUE_ATTEMPTS {
        let digits: u64 = rng.random_range(0..10_000_000_000);
        let candidate = format!("TXN-{digits:010}");
        if seen.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }
    Err(GenerateError::UniqueExhausted("transaction id"))
}

fn pick<T: Copy>(values: &[T], rng: &mut ChaCha8Rng) -> T {
    values[rng.random_range(0..values.len())]
}
