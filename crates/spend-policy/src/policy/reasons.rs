use super::domain::{Reason, ReasonCode};

impl ReasonCode {
    /// Catalog title shown next to the code.
    pub fn title(&self) -> &'static str {
        match self {
            ReasonCode::Geo => "Location outside allowed area",
            ReasonCode::Time => "Outside allowed hours",
            ReasonCode::Vendor => "Vendor not approved",
            ReasonCode::Category => "Category not allowed",
            ReasonCode::Basket => "Amount exceeds hard cap",
            ReasonCode::Station => "Charging station not approved",
            ReasonCode::Threshold => "Approval threshold exceeded",
            ReasonCode::Cap => "Spend cap reached",
            ReasonCode::Program => "Program rule",
            ReasonCode::Ok => "Within policy",
        }
    }
}

impl Reason {
    /// Instantiates the catalog entry for `code` with a rule-specific detail.
    pub fn triggered(code: ReasonCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            title: code.title().to_string(),
            detail: detail.into(),
        }
    }

    pub fn within_policy() -> Self {
        Self::triggered(
            ReasonCode::Ok,
            "No policy rule was triggered for this transaction.",
        )
    }

    pub fn personal_payment() -> Self {
        Self {
            code: ReasonCode::Ok,
            title: "Personal payment selected".to_string(),
            detail: "Corporate policy rules do not apply to personally paid transactions."
                .to_string(),
        }
    }
}

pub(crate) fn has_code(reasons: &[Reason], code: ReasonCode) -> bool {
    reasons.iter().any(|reason| reason.code == code)
}

/// Thousands-separated amount for human-facing text.
pub(crate) fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
