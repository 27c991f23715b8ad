//! Corporate spend policy decision engine.
//!
//! A [`Scenario`] is routed to exactly one module evaluator (or the personal
//! payment bypass), which collects reasons and corrective alternatives in
//! rule-check order. The module's precedence table then turns those reasons
//! into an [`Outcome`]. Separately, [`PolicyEngine::diff`] classifies how two
//! attempts at the same purchase differ.
//!
//! Evaluation is pure: no I/O, no shared mutable state, so one engine can be
//! shared by reference across any number of concurrent requests.

mod alternatives;
mod coach;
pub mod config;
mod diff;
pub mod domain;
mod precedence;
mod reasons;
pub mod router;
mod rules;
pub mod validate;

#[cfg(test)]
mod tests;

pub use config::{
    ChargingPolicy, ECommercePolicy, OtherPolicy, PolicyConfig, PolicyError, RidesPolicy,
};
pub use domain::{
    AltAction, Change, ChargingStation, CoachTip, Decision, Impact, Location, Marketplace,
    Outcome, PaymentMethod, PurchaseCategory, Reason, ReasonCode, RideCategory, Scenario,
    ScenarioField, ScenarioPatch, SpendModule, TimeOfDay,
};
pub use router::policy_router;
pub use validate::{InvalidScenario, ScenarioPayload};

use tracing::debug;

/// Stateless evaluator that applies a [`PolicyConfig`] to scenarios.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn evaluate(&self, scenario: &Scenario) -> Decision {
        let coach = coach::tips_for(scenario, &self.config);

        if scenario.payment == PaymentMethod::Personal {
            debug!(module = scenario.module.label(), "personal payment bypass");
            return Decision {
                outcome: Outcome::Allowed,
                reasons: vec![Reason::personal_payment()],
                alternatives: vec![alternatives::switch_to_corporate()],
                coach,
            };
        }

        let rules::RuleFindings {
            mut reasons,
            alternatives: mut offers,
        } = rules::scan_module(scenario, &self.config);
        offers.push(alternatives::switch_to_personal());
        if reasons.is_empty() {
            reasons.push(Reason::within_policy());
        }

        let outcome = precedence::decide_outcome(scenario, &self.config, &reasons);
        let alternatives = alternatives::dedupe(offers);

        debug!(
            module = scenario.module.label(),
            outcome = outcome.label(),
            reasons = ?reasons.iter().map(|reason| reason.code.label()).collect::<Vec<_>>(),
            alternatives = alternatives.len(),
            "scenario evaluated"
        );

        Decision {
            outcome,
            reasons,
            alternatives,
            coach,
        }
    }

    pub fn diff(&self, previous: &Scenario, current: &Scenario) -> Vec<Change> {
        let changes = diff::diff_scenarios(previous, current, &self.config);
        debug!(changes = changes.len(), "scenarios compared");
        changes
    }
}
