use super::RuleFindings;
use crate::policy::config::OtherPolicy;
use crate::policy::domain::{AltAction, Outcome, Reason, ReasonCode, Scenario, ScenarioPatch};
use crate::policy::reasons::format_amount;

pub(super) fn scan(scenario: &Scenario, policy: &OtherPolicy) -> RuleFindings {
    let mut findings = RuleFindings::default();

    if scenario.amount > policy.basket_cap {
        findings.flag(Reason::triggered(
            ReasonCode::Basket,
            format!(
                "Purchase {} exceeds the cap of {}.",
                format_amount(scenario.amount),
                format_amount(policy.basket_cap)
            ),
        ));
        findings.offer(AltAction::new(
            "other-rfq",
            "Use the RFQ flow",
            format!(
                "Raise an RFQ and source the purchase at {}.",
                format_amount(policy.rfq_amount)
            ),
            Outcome::ApprovalRequired,
            ScenarioPatch::amount(policy.rfq_amount),
        ));
    } else if scenario.amount > policy.threshold {
        findings.flag(Reason::triggered(
            ReasonCode::Threshold,
            format!(
                "Purchases above {} need approval.",
                format_amount(policy.threshold)
            ),
        ));
        findings.offer(AltAction::new(
            "other-lower",
            format!("Lower amount to {}", format_amount(policy.threshold_target)),
            "Keep the purchase under the approval threshold.",
            Outcome::Allowed,
            ScenarioPatch::amount(policy.threshold_target),
        ));
    }

    findings
}
