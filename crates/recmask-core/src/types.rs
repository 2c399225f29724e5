use serde::Serialize;

/// PII categories recognised by the record engine.
///
/// Design principles:
/// - Standalone categories are high-confidence on content alone
/// - Combinatorial categories only count when they co-occur
/// - No heap allocations in enum (all variants are `Copy`)
/// - Variant order is the masking priority inside a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Phone,
    NationalId, // Aadhar-style 12 digit identifier
    Passport,
    PaymentHandle, // UPI-style handle@provider
    HumanName,
    Email,
    PostalAddress,
    IpAddress,
    DeviceId,
}

impl Category {
    /// Categories whose content match alone forces a PII verdict,
    /// in the order field classification tries them.
    pub const STANDALONE: [Category; 4] = [
        Self::Phone,
        Self::NationalId,
        Self::Passport,
        Self::PaymentHandle,
    ];

    /// Categories applied by the final sweep over every string value.
    pub const SWEEP: [Category; 6] = [
        Self::Phone,
        Self::NationalId,
        Self::Passport,
        Self::PaymentHandle,
        Self::Email,
        Self::IpAddress,
    ];

    /// Stable label used in logs and API payloads.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::NationalId => "national_id",
            Self::Passport => "passport",
            Self::PaymentHandle => "payment_handle",
            Self::HumanName => "human_name",
            Self::Email => "email",
            Self::PostalAddress => "postal_address",
            Self::IpAddress => "ip_address",
            Self::DeviceId => "device_id",
        }
    }

    /// Whole-value replacement for categories that are never partially kept.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::PostalAddress => Some("[REDACTED_ADDRESS]"),
            Self::DeviceId => Some("[REDACTED_DEVICE_ID]"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
