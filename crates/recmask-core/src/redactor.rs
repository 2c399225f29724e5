use crate::{
    classifier,
    masker,
    record::{coerce, Record},
    scorer::{ScoringPolicy, SignalSet},
    types::Category,
};
use serde::Serialize;
use serde_json::Value;

/// A field that matched a standalone category. Carries the field name only,
/// never the matched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldHit {
    pub field: String,
    pub category: Category,
}

/// Per-record outcome, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub is_pii: bool,
    pub redacted: Record,
    pub signals: SignalSet,
    pub standalone_hits: Vec<FieldHit>,
}

/// Core redaction engine – orchestrates classification, scoring and masking
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    policy: ScoringPolicy,
}

impl Redactor {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Classify and redact one record. The input is never modified.
    ///
    /// Pass 1 masks standalone hits while classifying. Once the verdict is
    /// PII, pass 2 masks combinatorial fields (only if any signal was seen)
    /// and pass 3 sweeps every string value with the standalone maskers.
    pub fn redact(&self, record: &Record) -> Verdict {
        let mut signals = SignalSet::new();
        let mut standalone_hits = Vec::new();

        let working: Record = record
            .iter()
            .map(|(key, value)| {
                let lower = key.to_lowercase();
                let text = coerce(value);
                signals.extend(classifier::combinatorial_signals(&lower, &text));
                match classifier::standalone_category(&lower, &text) {
                    Some(category) => {
                        standalone_hits.push(FieldHit { field: key.clone(), category });
                        let masked = masker::mask(category, &text).into_owned();
                        (key.clone(), Value::String(masked))
                    }
                    None => (key.clone(), value.clone()),
                }
            })
            .collect();

        let is_pii = self.policy.verdict(!standalone_hits.is_empty(), &signals);
        tracing::debug!(
            is_pii,
            fields = record.len(),
            standalone = standalone_hits.len(),
            combo_score = signals.len(),
            "record classified"
        );

        if !is_pii {
            return Verdict { is_pii, redacted: working, signals, standalone_hits };
        }

        let working = if signals.is_empty() {
            working
        } else {
            mask_combinatorial(record, working)
        };

        Verdict {
            is_pii,
            redacted: sweep_record(working),
            signals,
            standalone_hits,
        }
    }
}

// Re-derives each field's signal from the input value so the mask reflects the
// original content, overriding any standalone mask from pass 1.
fn mask_combinatorial(record: &Record, working: Record) -> Record {
    working
        .into_iter()
        .map(|(key, current)| {
            let Some(original) = record.get(&key) else {
                return (key, current);
            };
            let text = coerce(original);
            let first = classifier::combinatorial_signals(&key.to_lowercase(), &text)
                .into_iter()
                .next();
            match first {
                Some(category) => {
                    let masked = masker::mask(category, &text).into_owned();
                    (key, Value::String(masked))
                }
                None => (key, current),
            }
        })
        .collect()
}

/// Apply the standalone sweep to every string value of a record.
pub fn sweep_record(record: Record) -> Record {
    record
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => {
                let swept = masker::sweep(&s).into_owned();
                (key, Value::String(swept))
            }
            other => (key, other),
        })
        .collect()
}
