use super::config::PolicyConfig;
use super::domain::{Outcome, Reason, ReasonCode, Scenario, SpendModule};
use super::reasons::has_code;

/// Applies the owning module's precedence table to the collected reasons.
pub(crate) fn decide_outcome(
    scenario: &Scenario,
    config: &PolicyConfig,
    reasons: &[Reason],
) -> Outcome {
    let has = |code: ReasonCode| has_code(reasons, code);

    let blocked = match scenario.module {
        SpendModule::RidesAndLogistics => {
            has(ReasonCode::Time)
                || has(ReasonCode::Geo)
                || has(ReasonCode::Category)
                || has(ReasonCode::Basket)
        }
        SpendModule::ECommerce => {
            let policy = &config.ecommerce;
            has(ReasonCode::Category)
                || (has(ReasonCode::Vendor) && scenario.amount > policy.unapproved_vendor_limit)
                || (has(ReasonCode::Basket) && scenario.amount > policy.basket_cap)
        }
        SpendModule::EvCharging => {
            has(ReasonCode::Station)
                || (has(ReasonCode::Basket) && scenario.amount > config.charging.basket_cap)
        }
        SpendModule::Other => has(ReasonCode::Basket),
    };
    if blocked {
        return Outcome::Blocked;
    }

    let needs_approval = match scenario.module {
        SpendModule::ECommerce => has(ReasonCode::Threshold) || has(ReasonCode::Vendor),
        SpendModule::RidesAndLogistics | SpendModule::EvCharging | SpendModule::Other => {
            has(ReasonCode::Threshold)
        }
    };
    if needs_approval {
        return Outcome::ApprovalRequired;
    }

    Outcome::Allowed
}
