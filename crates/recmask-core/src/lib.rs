//! Rule-based PII detection and redaction for schema-less records.
//!
//! A record is classified field by field: standalone categories (phone,
//! national id, passport, payment handle) decide on their own, weaker
//! combinatorial signals (name, email, address, IP, device id) only when they
//! co-occur. PII records come back with every sensitive span masked.
//!
//! ```
//! use recmask_core::{parse_payload, Redactor};
//!
//! let (record, _) = parse_payload(r#"{"name": "Ravi Kumar", "email": "ravi.kumar@example.com"}"#);
//! let verdict = Redactor::default().redact(&record);
//! assert!(verdict.is_pii);
//! assert_eq!(verdict.redacted["name"], "RXXX KXXX");
//! ```

pub mod classifier;
pub mod detector;
pub mod masker;
pub mod patterns;
pub mod record;
pub mod redactor;
pub mod scorer;
pub mod types;

pub use detector::{Detection, PiiDetector};
pub use record::{parse_payload, PayloadSource, Record};
pub use redactor::{FieldHit, Redactor, Verdict};
pub use scorer::{ScoringPolicy, SignalSet};
pub use types::Category;
