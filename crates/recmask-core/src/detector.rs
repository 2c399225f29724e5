use crate::patterns::{self, Rule};
use crate::types::Category;
use std::sync::LazyLock;
use zeroize::Zeroize;

/// Detection result with memory safety guarantees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub category: Category,
    pub start: usize,     // UTF-8 byte offset (NOT char index)
    pub end: usize,       // UTF-8 byte offset
    pub original: String, // Matched text – will be zeroized on drop
}

impl Zeroize for Detection {
    fn zeroize(&mut self) {
        self.original.zeroize();
    }
}

impl Drop for Detection {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Span detector for one category.
pub trait PiiDetector: Send + Sync {
    fn category(&self) -> Category;

    /// Candidate spans, sorted by `start` ascending and non-overlapping.
    fn detect(&self, text: &str) -> Vec<Detection>;

    /// Post-match check. Called by the masker before rewriting a candidate.
    fn validate(&self, _candidate: &str) -> bool {
        true
    }
}

/// Detector backed by a rule from the static pattern registry.
pub struct PatternDetector {
    category: Category,
    rule: &'static LazyLock<Rule>,
    validator: Option<fn(&str) -> bool>,
}

impl PiiDetector for PatternDetector {
    fn category(&self) -> Category {
        self.category
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        self.rule
            .spans(text)
            .into_iter()
            .map(|span| Detection {
                category: self.category,
                start: span.start,
                end: span.end,
                original: text[span].to_string(),
            })
            .collect()
    }

    fn validate(&self, candidate: &str) -> bool {
        self.validator.map_or(true, |check| check(candidate))
    }
}

static DETECTORS: [PatternDetector; 6] = [
    PatternDetector { category: Category::Phone, rule: &patterns::PHONE, validator: None },
    PatternDetector { category: Category::NationalId, rule: &patterns::NATIONAL_ID, validator: None },
    PatternDetector { category: Category::Passport, rule: &patterns::PASSPORT, validator: None },
    PatternDetector {
        category: Category::PaymentHandle,
        rule: &patterns::PAYMENT_HANDLE,
        validator: None,
    },
    PatternDetector { category: Category::Email, rule: &patterns::EMAIL, validator: None },
    PatternDetector {
        category: Category::IpAddress,
        rule: &patterns::IPV4,
        validator: Some(patterns::valid_ipv4),
    },
];

/// Span detector for `category`; `None` for whole-value categories
/// (names, postal addresses, device ids).
pub fn detector_for(category: Category) -> Option<&'static dyn PiiDetector> {
    DETECTORS
        .iter()
        .find(|d| d.category == category)
        .map(|d| d as &'static dyn PiiDetector)
}

/// Validated detections of `category` in `text`.
pub fn detect(category: Category, text: &str) -> Vec<Detection> {
    let Some(detector) = detector_for(category) else {
        return Vec::new();
    };
    detector
        .detect(text)
        .into_iter()
        .filter(|d| detector.validate(&d.original))
        .collect()
}
