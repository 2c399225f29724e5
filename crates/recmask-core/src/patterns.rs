//! Static pattern registry.
//!
//! The `regex` crate has no look-around, so digit/identifier boundaries are
//! checked on the characters just outside each candidate span. A rejected
//! candidate resumes the scan one character after its start, which keeps the
//! leftmost admissible match reachable.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Constraint on the characters adjacent to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Anything may touch the match.
    Open,
    /// No ASCII digit directly before or after.
    Digit,
    /// No ASCII letter or digit directly before or after.
    Alphanumeric,
}

impl Boundary {
    fn rejects(&self, c: char) -> bool {
        match self {
            Self::Open => false,
            Self::Digit => c.is_ascii_digit(),
            Self::Alphanumeric => c.is_ascii_alphanumeric(),
        }
    }

    fn admits(&self, text: &str, span: &Range<usize>) -> bool {
        let before = text[..span.start].chars().next_back();
        let after = text[span.end..].chars().next();
        !before.is_some_and(|c| self.rejects(c)) && !after.is_some_and(|c| self.rejects(c))
    }
}

/// A compiled pattern plus its boundary constraint.
#[derive(Debug)]
pub struct Rule {
    regex: Regex,
    boundary: Boundary,
}

impl Rule {
    fn new(pattern: &str, boundary: Boundary) -> Self {
        Self {
            // Patterns are compile-time literals covered by the tests below.
            regex: Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern}: {e}")),
            boundary,
        }
    }

    /// All admitted match spans, left to right, non-overlapping.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(m) = self.regex.find_at(text, pos) else {
                break;
            };
            let span = m.range();
            if self.boundary.admits(text, &span) {
                pos = if span.is_empty() { next_char(text, span.end) } else { span.end };
                spans.push(span);
            } else {
                pos = next_char(text, span.start);
            }
        }
        spans
    }

    pub fn is_match(&self, text: &str) -> bool {
        !self.spans(text).is_empty()
    }
}

fn next_char(text: &str, idx: usize) -> usize {
    idx + text[idx..].chars().next().map_or(1, char::len_utf8)
}

pub static PHONE: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"(?:\+?91[-\s]?)?[6-9][0-9]{9}", Boundary::Digit));

pub static NATIONAL_ID: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(r"[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}", Boundary::Digit)
});

pub static PASSPORT: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"[A-PR-WYa-pr-wy] ?[0-9]{7}", Boundary::Alphanumeric));

pub static PAYMENT_HANDLE: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"[a-zA-Z0-9._-]{2,}@[a-zA-Z]{2,}", Boundary::Open));

pub static EMAIL: LazyLock<Rule> = LazyLock::new(|| {
    Rule::new(
        r"[a-zA-Z0-9._%+-]{2,}@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
        Boundary::Open,
    )
});

/// Dotted quads only; octet range is checked by [`valid_ipv4`].
pub static IPV4: LazyLock<Rule> =
    LazyLock::new(|| Rule::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b", Boundary::Open));

static POSTAL_CODE: LazyLock<Rule> = LazyLock::new(|| Rule::new(r"[0-9]{6}", Boundary::Digit));

static FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,}[\s,]+[A-Za-z]{2,}$")
        .unwrap_or_else(|e| panic!("invalid name pattern: {e}"))
});

const STREET_KEYWORDS: &[&str] = &[
    "street", "st.", "road", "rd.", "lane", "block", "sector", "apt", "apartment", "floor", "phase",
];

/// Every octet of a dotted quad parses and lies in 0..=255.
pub fn valid_ipv4(candidate: &str) -> bool {
    let octets: Vec<&str> = candidate.split('.').collect();
    octets.len() == 4 && octets.iter().all(|o| o.parse::<u8>().is_ok())
}

/// Exactly two alphabetic tokens of at least two letters, whole value.
pub fn is_full_name(text: &str) -> bool {
    FULL_NAME.is_match(text.trim())
}

/// Postal code plus a street keyword plus a numeric token.
pub fn is_postal_address(text: &str) -> bool {
    if !POSTAL_CODE.is_match(text) {
        return false;
    }
    let lower = text.to_lowercase();
    STREET_KEYWORDS.iter().any(|k| lower.contains(k)) && text.chars().any(|c| c.is_ascii_digit())
}

/// True when the first dotted quad in the text is a valid IPv4 address.
pub fn contains_ipv4(text: &str) -> bool {
    IPV4
        .spans(text)
        .first()
        .is_some_and(|span| valid_ipv4(&text[span.clone()]))
}

/// Lower-cased key sets that bias field classification.
pub mod keys {
    pub const PHONE_LIKE: &[&str] = &["phone", "contact", "mobile", "alt_phone", "phone_number"];
    pub const ADDRESS: &[&str] = &["address", "shipping_address", "billing_address"];
    pub const NAME: &[&str] = &["name", "full_name"];
    pub const SPLIT_NAME: &[&str] = &["first_name", "last_name"];
    pub const DEVICE: &str = "device_id";
    pub const IP: &str = "ip_address";

    /// Numeric identifiers that are never phone numbers.
    pub const NUMERIC_ID_DENY: &[&str] = &[
        "order_id",
        "transaction_id",
        "product_id",
        "ticket_id",
        "warehouse_code",
        "customer_id",
        "gst_number",
        "state_code",
        "booking_reference",
    ];
}
