use super::RuleFindings;
use crate::policy::config::ECommercePolicy;
use crate::policy::domain::{AltAction, Outcome, Reason, ReasonCode, Scenario, ScenarioPatch};
use crate::policy::reasons::format_amount;

pub(super) fn scan(scenario: &Scenario, policy: &ECommercePolicy) -> RuleFindings {
    let mut findings = RuleFindings::default();

    if policy.blocked_categories.contains(&scenario.category) {
        findings.flag(Reason::triggered(
            ReasonCode::Category,
            format!(
                "{} purchases cannot be made on the corporate instrument.",
                scenario.category.label()
            ),
        ));
        findings.offer(AltAction::new(
            "ecommerce-category",
            format!("Buy {} instead", policy.fallback_category.label()),
            "Move the order to a permitted category.",
            Outcome::Allowed,
            ScenarioPatch::category(policy.fallback_category),
        ));
    }

    if !scenario.vendor_approved {
        if scenario.amount <= policy.unapproved_vendor_limit {
            findings.flag(Reason::triggered(
                ReasonCode::Vendor,
                format!(
                    "Vendor is not on the approved list; orders up to {} need approval.",
                    format_amount(policy.unapproved_vendor_limit)
                ),
            ));
            findings.offer(AltAction::new(
                "ecommerce-approved-vendor",
                "Use an approved vendor",
                "Pick a vendor from the approved list.",
                Outcome::Allowed,
                ScenarioPatch::vendor_approved(true),
            ));
        } else {
            findings.flag(Reason::triggered(
                ReasonCode::Vendor,
                format!(
                    "Unapproved vendors are blocked above {}.",
                    format_amount(policy.unapproved_vendor_limit)
                ),
            ));
            findings.offer(AltAction::new(
                "ecommerce-rfq",
                "Raise an RFQ",
                format!(
                    "Source the order through an RFQ with approved vendors at {}.",
                    format_amount(policy.rfq_amount)
                ),
                Outcome::ApprovalRequired,
                ScenarioPatch::amount(policy.rfq_amount).and_vendor_approved(true),
            ));
        }
    }

    if scenario.marketplace == policy.thresholded_marketplace
        && scenario.amount > policy.marketplace_threshold
    {
        findings.flag(Reason::triggered(
            ReasonCode::Threshold,
            format!(
                "{} baskets above {} need approval.",
                policy.thresholded_marketplace.label(),
                format_amount(policy.marketplace_threshold)
            ),
        ));
        findings.offer(AltAction::new(
            "ecommerce-reduce-basket",
            format!("Reduce basket to {}", format_amount(policy.marketplace_target)),
            "Trim the basket under the marketplace threshold.",
            Outcome::Allowed,
            ScenarioPatch::amount(policy.marketplace_target),
        ));
        findings.offer(AltAction::new(
            "ecommerce-switch-marketplace",
            format!("Switch to {}", policy.fallback_marketplace.label()),
            "Place the order on a marketplace without the basket threshold.",
            Outcome::Allowed,
            ScenarioPatch::marketplace(policy.fallback_marketplace),
        ));
    }

    if scenario.amount > policy.basket_cap {
        findings.flag(Reason::triggered(
            ReasonCode::Basket,
            format!(
                "Order {} exceeds the hard cap of {}.",
                format_amount(scenario.amount),
                format_amount(policy.basket_cap)
            ),
        ));
        findings.offer(AltAction::new(
            "ecommerce-split-order",
            format!("Split order to {}", format_amount(policy.split_target)),
            "Split the purchase so each order stays under the cap.",
            Outcome::ApprovalRequired,
            ScenarioPatch::amount(policy.split_target),
        ));
    }

    findings
}
