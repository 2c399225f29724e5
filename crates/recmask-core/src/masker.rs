//! Per-category masking transforms.
//!
//! Span categories rewrite every validated occurrence in place and leave the
//! surrounding text untouched. Whole-value categories replace the value.
//! Masked output never matches its source pattern again, so every transform
//! is idempotent.

use crate::detector::{self, Detection};
use crate::types::Category;
use std::borrow::Cow;

const DIGIT_MASK: &str = "XXXXXX";
const NATIONAL_ID_MASK: &str = "XXXX-XXXX-XXXX";
const NAME_MASK: &str = "XXX";
const MASK_CHAR: char = '*';
const IP_WILDCARD: &str = "*.*";

/// Mask every occurrence of `category` in `text`.
pub fn mask(category: Category, text: &str) -> Cow<'_, str> {
    match category {
        Category::HumanName => Cow::Owned(mask_name(text)),
        Category::PostalAddress | Category::DeviceId => {
            Cow::Borrowed(category.placeholder().unwrap_or_default())
        }
        _ => mask_spans(category, text),
    }
}

/// Standalone sweep: phone, national id, passport, payment handle, email,
/// then IP address, each over the output of the previous one.
pub fn sweep(text: &str) -> Cow<'_, str> {
    Category::SWEEP
        .iter()
        .fold(Cow::Borrowed(text), |acc, &category| match acc {
            Cow::Borrowed(s) => mask_spans(category, s),
            Cow::Owned(s) => Cow::Owned(mask_spans(category, &s).into_owned()),
        })
}

fn mask_spans(category: Category, text: &str) -> Cow<'_, str> {
    if text.is_empty() {
        return Cow::Borrowed(text);
    }
    let detections = detector::detect(category, text);
    if detections.is_empty() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(apply_masks(text, &detections))
}

fn apply_masks(text: &str, detections: &[Detection]) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_idx = 0;

    for detection in detections {
        result.push_str(&text[last_idx..detection.start]);
        result.push_str(&mask_match(detection.category, &detection.original));
        last_idx = detection.end;
    }
    result.push_str(&text[last_idx..]);
    result
}

fn mask_match(category: Category, original: &str) -> String {
    match category {
        Category::Phone => mask_phone(original),
        Category::NationalId => NATIONAL_ID_MASK.to_string(),
        Category::Passport => mask_passport(original),
        Category::PaymentHandle => mask_handle(original),
        Category::Email => mask_email(original),
        Category::IpAddress => mask_ip(original),
        Category::HumanName | Category::PostalAddress | Category::DeviceId => {
            mask(category, original).into_owned()
        }
    }
}

// The subscriber number is the trailing 10 ASCII digits of the match; the
// country prefix is dropped with the rest of the span.
fn mask_phone(phone: &str) -> String {
    let number = &phone[phone.len().saturating_sub(10)..];
    format!("{}{DIGIT_MASK}{}", &number[..2], &number[8..])
}

fn mask_passport(passport: &str) -> String {
    let mut chars = passport.chars();
    let letter = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
    let last = chars.next_back().unwrap_or_default();
    format!("{letter}{DIGIT_MASK}{last}")
}

fn mask_handle(handle_at_provider: &str) -> String {
    let Some((handle, provider)) = handle_at_provider.split_once('@') else {
        return handle_at_provider.to_string();
    };
    let stars = MASK_CHAR.to_string().repeat(handle.len().saturating_sub(3).max(1));
    format!("{}{stars}{}@{provider}", &handle[..2], &handle[handle.len() - 1..])
}

fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    let stars = MASK_CHAR.to_string().repeat(local.len().saturating_sub(2).max(1));
    format!("{}{stars}@{domain}", &local[..2])
}

fn mask_ip(ip: &str) -> String {
    let mut octets = ip.split('.');
    match (octets.next(), octets.next()) {
        (Some(a), Some(b)) => format!("{a}.{b}.{IP_WILDCARD}"),
        _ => ip.to_string(),
    }
}

fn mask_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|token| token.chars().next())
        .map(|first| format!("{}{NAME_MASK}", first.to_uppercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
