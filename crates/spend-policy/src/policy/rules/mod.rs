mod charging;
mod ecommerce;
mod other;
mod rides;

use super::config::PolicyConfig;
use super::domain::{AltAction, Reason, Scenario, SpendModule};

/// Reasons and corrective alternatives collected by one module scan, in rule-check order.
#[derive(Debug, Default)]
pub(crate) struct RuleFindings {
    pub reasons: Vec<Reason>,
    pub alternatives: Vec<AltAction>,
}

impl RuleFindings {
    pub(crate) fn flag(&mut self, reason: Reason) {
        self.reasons.push(reason);
    }

    pub(crate) fn offer(&mut self, alternative: AltAction) {
        self.alternatives.push(alternative);
    }
}

/// Runs the single evaluator selected by `scenario.module`.
pub(crate) fn scan_module(scenario: &Scenario, config: &PolicyConfig) -> RuleFindings {
    match scenario.module {
        SpendModule::RidesAndLogistics => rides::scan(scenario, &config.rides),
        SpendModule::ECommerce => ecommerce::scan(scenario, &config.ecommerce),
        SpendModule::EvCharging => charging::scan(scenario, &config.charging),
        SpendModule::Other => other::scan(scenario, &config.other),
    }
}
