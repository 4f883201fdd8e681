use chrono::Duration;
use fake::Fake;
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, StateName, StreetName, StreetSuffix, ZipCode,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cartwright_core::{Customer, GeneratorConfig};

/// A full mailing address block, shared between customer records and order
/// shipping fields.
pub(crate) struct MailingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

pub(crate) fn mailing_address(rng: &mut ChaCha8Rng) -> MailingAddress {
    let building: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let suffix: String = StreetSuffix().fake_with_rng(rng);
    MailingAddress {
        street: format!("{building} {street} {suffix}"),
        city: CityName().fake_with_rng(rng),
        state: StateName().fake_with_rng(rng),
        zip: ZipCode().fake_with_rng(rng),
        country: CountryName().fake_with_rng(rng),
    }
}

/// Synthesize `config.customers` customer rows with dense ids from 1.
pub fn synthesize_customers(config: &GeneratorConfig, rng: &mut ChaCha8Rng) -> Vec<Customer> {
    let mut customers = Vec::with_capacity(config.customers);
    for customer_id in 1..=config.customers as i64 {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let email: String = SafeEmail().fake_with_rng(rng);
        let phone: String = PhoneNumber().fake_with_rng(rng);
        let mailing = mailing_address(rng);
        let days_back = rng.random_range(0..=config.registration_window_days);
        customers.push(Customer {
            customer_id,
            first_name,
            last_name,
            email,
            phone,
            address: mailing.street,
            city: mailing.city,
            state: mailing.state,
            zip_code: mailing.zip,
            country: mailing.country,
            date_registered: config.reference_date.date() - Duration::days(days_back),
            is_active: rng.random_bool(config.active_rate),
        });
    }
    customers
}
