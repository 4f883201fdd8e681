use std::collections::{HashMap, HashSet};

use chrono::Duration;

use cartwright_core::{
    cents_eq, check_dataset, round_cents, Dataset, GeneratorConfig, Payment, PaymentStatus,
};
use cartwright_generate::Generator;

fn config() -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.seed = 11;
    config.customers = 40;
    config.products = 30;
    config.orders = 60;
    config
}

fn dataset() -> Dataset {
    Generator::new(config())
        .generate()
        .expect("generate dataset")
}

#[test]
fn generates_the_requested_row_counts() {
    let dataset = dataset();

    assert_eq!(dataset.customers.len(), 40);
    assert_eq!(dataset.products.len(), 30);
    assert_eq!(dataset.orders.len(), 60);
    assert!(!dataset.order_items.is_empty());
    assert!(!dataset.payments.is_empty());
}

#[test]
fn dataset_passes_the_integrity_check() {
    let report = check_dataset(&dataset());
    assert!(report.is_clean(), "violations: {:?}", report.violations);
}

#[test]
fn ids_are_dense_from_one() {
    let dataset = dataset();

    for (index, customer) in dataset.customers.iter().enumerate() {
        assert_eq!(customer.customer_id, index as i64 + 1);
    }
    for (index, product) in dataset.products.iter().enumerate() {
        assert_eq!(product.product_id, index as i64 + 1);
    }
    for (index, order) in dataset.orders.iter().enumerate() {
        assert_eq!(order.order_id, index as i64 + 1);
    }
    for (index, item) in dataset.order_items.iter().enumerate() {
        assert_eq!(item.item_id, index as i64 + 1);
    }
    for (index, payment) in dataset.payments.iter().enumerate() {
        assert_eq!(payment.payment_id, index as i64 + 1);
    }
}

#[test]
fn every_order_has_one_to_five_distinct_items() {
    let dataset = dataset();

    let mut per_order: HashMap<i64, Vec<i64>> = HashMap::new();
    for item in &dataset.order_items {
        per_order
            .entry(item.order_id)
            .or_default()
            .push(item.product_id);
    }

    for order in &dataset.orders {
        let products = per_order.get(&order.order_id).expect("order has items");
        assert!(
            (1..=5).contains(&products.len()),
            "order {} has {} items",
            order.order_id,
            products.len()
        );
        let distinct: HashSet<_> = products.iter().collect();
        assert_eq!(
            distinct.len(),
            products.len(),
            "order {} repeats a product",
            order.order_id
        );
    }
}

#[test]
fn discounts_come_from_the_wheel() {
    let allowed = [0.0, 10.0, 15.0, 20.0, 25.0];

    for item in dataset().order_items {
        assert!(
            allowed.iter().any(|value| cents_eq(item.discount, *value)),
            "unexpected discount {}",
            item.discount
        );
        assert!(item.unit_price > 0.0);
        assert!(item.subtotal > 0.0);
    }
}

#[test]
fn payments_cover_each_order_within_the_window() {
    let dataset = dataset();

    let mut per_order: HashMap<i64, Vec<&Payment>> = HashMap::new();
    for payment in &dataset.payments {
        per_order
            .entry(payment.order_id)
            .or_default()
            .push(payment);
    }

    let mut split_orders = 0;

    for order in &dataset.orders {
        let legs = per_order.get(&order.order_id).expect("order has payments");
        assert!(
            legs.len() == 1 || legs.len() == 2,
            "order {} has {} payments",
            order.order_id,
            legs.len()
        );

        let paid: f64 = legs.iter().map(|payment| payment.amount).sum();
        assert!(
            cents_eq(paid, order.total_amount),
            "order {} paid {} of {}",
            order.order_id,
            paid,
            order.total_amount
        );

        for payment in legs {
            assert!(payment.payment_date > order.order_date);
            assert!(payment.payment_date <= order.order_date + Duration::days(7));
        }

        if legs.len() == 2 {
            split_orders += 1;
            assert!(legs.iter().all(|leg| leg.status == PaymentStatus::Completed));
            assert!(legs[0].payment_date < legs[1].payment_date);

            let first = round_cents(order.total_amount * 0.6);
            assert_eq!(legs[0].amount, first, "order {} first leg", order.order_id);
            assert_eq!(
                legs[1].amount,
                round_cents(order.total_amount - first),
                "order {} second leg",
                order.order_id
            );
        }
    }

    assert!(split_orders > 0, "no orders were split");
}

#[test]
fn codes_have_the_expected_shape() {
    let dataset = dataset();

    for product in &dataset.products {
        let sku = &product.sku;
        assert_eq!(sku.len(), 12, "sku {sku}");
        assert!(sku.starts_with("SKU-"), "sku {sku}");
        assert!(sku[4..8].bytes().all(|byte| byte.is_ascii_digit()));
        assert_eq!(&sku[8..9], "-");
        assert!(sku[9..].bytes().all(|byte| byte.is_ascii_uppercase()));
    }

    for payment in &dataset.payments {
        let txn = &payment.transaction_id;
        assert_eq!(txn.len(), 14, "transaction {txn}");
        assert!(txn.starts_with("TXN-"), "transaction {txn}");
        assert!(txn[4..].bytes().all(|byte| byte.is_ascii_digit()));
    }
}

#[test]
fn dates_stay_inside_their_windows() {
    let config = config();
    let dataset = dataset();
    let reference = config.reference_date;

    for customer in &dataset.customers {
        assert!(customer.date_registered <= reference.date());
        assert!(customer.date_registered >= reference.date() - Duration::days(730));
    }
    for product in &dataset.products {
        assert!(product.created_date <= reference.date());
        assert!(product.created_date >= reference.date() - Duration::days(365));
    }
    for order in &dataset.orders {
        assert!(order.order_date <= reference);
        assert!(order.order_date >= reference - Duration::days(365));
    }
}
