use crate::types::Category;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Distinct combinatorial categories observed across a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignalSet(BTreeSet<Category>);

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) {
        self.0.insert(category);
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    /// Combinatorial score: duplicates across fields count once.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}

impl Extend<Category> for SignalSet {
    fn extend<I: IntoIterator<Item = Category>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Category> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Scoring policy – decides when combinatorial evidence becomes PII
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    /// Distinct signals needed before combinatorial evidence counts
    min_combo_signals: usize,

    /// Signals too weak to escalate on their own (telemetry: device, IP).
    /// A qualifying set needs at least one signal outside this set.
    weak_signals: HashSet<Category>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            min_combo_signals: 2,
            weak_signals: HashSet::from([Category::DeviceId, Category::IpAddress]),
        }
    }
}

impl ScoringPolicy {
    /// Builder pattern for ergonomic configuration
    pub fn builder() -> ScoringPolicyBuilder {
        ScoringPolicyBuilder::default()
    }

    /// Every combination of at least `min_combo_signals` escalates,
    /// telemetry-only pairs included.
    pub fn strict() -> Self {
        ScoringPolicyBuilder::default()
            .strong(Category::DeviceId)
            .strong(Category::IpAddress)
            .build()
    }

    pub fn min_combo_signals(&self) -> usize {
        self.min_combo_signals
    }

    pub fn is_weak(&self, category: Category) -> bool {
        self.weak_signals.contains(&category)
    }

    /// Combinatorial evidence alone is enough to declare PII.
    pub fn combo_escalates(&self, signals: &SignalSet) -> bool {
        signals.len() >= self.min_combo_signals && signals.iter().any(|s| !self.is_weak(s))
    }

    /// Final verdict: any standalone hit is disqualifying; otherwise the
    /// combinatorial evidence must escalate.
    pub fn verdict(&self, standalone_found: bool, signals: &SignalSet) -> bool {
        standalone_found || self.combo_escalates(signals)
    }
}

/// Builder for ScoringPolicy – tunes the policy constants without touching
/// the scorer's control flow
#[derive(Default)]
pub struct ScoringPolicyBuilder {
    policy: ScoringPolicy,
}

impl ScoringPolicyBuilder {
    pub fn min_combo_signals(mut self, min: usize) -> Self {
        self.policy.min_combo_signals = min.max(1);
        self
    }

    pub fn strong(mut self, category: Category) -> Self {
        self.policy.weak_signals.remove(&category);
        self
    }

    pub fn build(self) -> ScoringPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(categories: &[Category]) -> SignalSet {
        categories.iter().copied().collect()
    }

    #[test]
    fn test_single_signal_falls_back_to_standalone() {
        let policy = ScoringPolicy::default();
        let email_only = signals(&[Category::Email]);
        assert!(!policy.verdict(false, &email_only));
        assert!(policy.verdict(true, &email_only));
    }

    #[test]
    fn test_identity_pair_escalates() {
        let policy = ScoringPolicy::default();
        assert!(policy.verdict(false, &signals(&[Category::HumanName, Category::Email])));
        assert!(policy.verdict(false, &signals(&[Category::PostalAddress, Category::IpAddress])));
    }

    #[test]
    fn test_telemetry_pair_does_not_escalate() {
        let policy = ScoringPolicy::default();
        let telemetry = signals(&[Category::DeviceId, Category::IpAddress]);
        assert!(!policy.combo_escalates(&telemetry));
        assert!(!policy.verdict(false, &telemetry));
        assert!(policy.verdict(true, &telemetry));
    }

    #[test]
    fn test_duplicates_count_once() {
        let mut set = SignalSet::new();
        set.extend([Category::Email, Category::Email]);
        assert_eq!(set.len(), 1);
        assert!(!ScoringPolicy::default().verdict(false, &set));
    }

    #[test]
    fn test_strict_profile_escalates_telemetry() {
        let policy = ScoringPolicy::strict();
        assert!(policy.verdict(false, &signals(&[Category::DeviceId, Category::IpAddress])));
    }

    #[test]
    fn test_builder_threshold() {
        let policy = ScoringPolicy::builder().min_combo_signals(3).build();
        assert_eq!(policy.min_combo_signals(), 3);
        assert!(!policy.verdict(false, &signals(&[Category::HumanName, Category::Email])));
        assert!(policy.verdict(
            false,
            &signals(&[Category::HumanName, Category::Email, Category::DeviceId])
        ));
    }

    #[test]
    fn test_signal_set_serializes_as_labels() {
        let json = serde_json::to_string(&signals(&[Category::Email, Category::HumanName])).unwrap();
        assert_eq!(json, r#"["human_name","email"]"#);
    }
}
