//! Per-field classification.
//!
//! Keys are compared lower-cased. Values are classified on their string
//! coercion (see [`crate::record::coerce`]).

use crate::patterns::{self, keys};
use crate::types::Category;

/// First standalone category the field matches, tried in
/// phone → national id → passport → payment handle order.
pub fn standalone_category(key: &str, value: &str) -> Option<Category> {
    Category::STANDALONE.into_iter().find(|category| match category {
        Category::Phone => is_phone_value(key, value),
        Category::NationalId => patterns::NATIONAL_ID.is_match(value),
        Category::Passport => patterns::PASSPORT.is_match(value),
        Category::PaymentHandle => patterns::PAYMENT_HANDLE.is_match(value),
        _ => false,
    })
}

/// Phone detection gated by key: deny-listed numeric ids never match, and
/// unlabeled values must carry exactly ten digits.
pub fn is_phone_value(key: &str, value: &str) -> bool {
    if keys::NUMERIC_ID_DENY.contains(&key) {
        return false;
    }
    if !patterns::PHONE.is_match(value) {
        return false;
    }
    keys::PHONE_LIKE.contains(&key) || value.chars().filter(char::is_ascii_digit).count() == 10
}

/// Combinatorial signals carried by the field, in masking priority order.
pub fn combinatorial_signals(key: &str, value: &str) -> Vec<Category> {
    let mut signals = Vec::new();
    if is_name_field(key, value) {
        signals.push(Category::HumanName);
    }
    if patterns::EMAIL.is_match(value) {
        signals.push(Category::Email);
    }
    if keys::ADDRESS.contains(&key) && patterns::is_postal_address(value) {
        signals.push(Category::PostalAddress);
    }
    if key == keys::IP && patterns::contains_ipv4(value) {
        signals.push(Category::IpAddress);
    }
    if key == keys::DEVICE && value.trim().chars().count() >= 6 {
        signals.push(Category::DeviceId);
    }
    signals
}

fn is_name_field(key: &str, value: &str) -> bool {
    (keys::NAME.contains(&key) && patterns::is_full_name(value))
        || (keys::SPLIT_NAME.contains(&key) && value.trim().chars().count() >= 2)
}
