use std::collections::HashSet;

use super::domain::{AltAction, Outcome, PaymentMethod, ScenarioPatch};

impl AltAction {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        expected_outcome: Outcome,
        patch: ScenarioPatch,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            expected_outcome,
            patch,
        }
    }
}

/// Escape hatch offered whenever the scenario is on the corporate instrument.
pub(crate) fn switch_to_personal() -> AltAction {
    AltAction::new(
        "pay-personal",
        "Pay personally",
        "Use a personal payment method; corporate policy rules will not apply.",
        Outcome::Allowed,
        ScenarioPatch::payment(PaymentMethod::Personal),
    )
}

pub(crate) fn switch_to_corporate() -> AltAction {
    AltAction::new(
        "pay-corporate",
        "Switch back to CorporatePay",
        "Charge the corporate instrument; the transaction is then checked against policy.",
        Outcome::ApprovalRequired,
        ScenarioPatch::payment(PaymentMethod::CorporatePay),
    )
}

/// Drops repeats of `(title, patch)`, keeping the first occurrence in place.
pub(crate) fn dedupe(alternatives: Vec<AltAction>) -> Vec<AltAction> {
    let mut seen = HashSet::new();
    alternatives
        .into_iter()
        .filter(|alt| {
            let patch_key = serde_json::to_string(&alt.patch).unwrap_or_default();
            seen.insert((alt.title.clone(), patch_key))
        })
        .collect()
}
