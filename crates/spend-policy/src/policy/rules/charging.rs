use super::RuleFindings;
use crate::policy::config::ChargingPolicy;
use crate::policy::domain::{AltAction, Outcome, Reason, ReasonCode, Scenario, ScenarioPatch};
use crate::policy::reasons::format_amount;

pub(super) fn scan(scenario: &Scenario, policy: &ChargingPolicy) -> RuleFindings {
    let mut findings = RuleFindings::default();

    if !policy.approved_stations.contains(&scenario.station) {
        findings.flag(Reason::triggered(
            ReasonCode::Station,
            format!(
                "Station '{}' is not an approved charging partner.",
                scenario.station.label()
            ),
        ));
        findings.offer(AltAction::new(
            "charging-station",
            format!("Charge at {}", policy.fallback_station.label()),
            "Use an approved charging station.",
            Outcome::Allowed,
            ScenarioPatch::station(policy.fallback_station),
        ));
    }

    if scenario.amount > policy.basket_cap {
        findings.flag(Reason::triggered(
            ReasonCode::Basket,
            format!(
                "Session {} exceeds the charging cap of {}.",
                format_amount(scenario.amount),
                format_amount(policy.basket_cap)
            ),
        ));
        findings.offer(AltAction::new(
            "charging-lower",
            format!("Lower session to {}", format_amount(policy.threshold)),
            "Charge less in this session.",
            Outcome::Allowed,
            ScenarioPatch::amount(policy.threshold),
        ));
    } else if scenario.amount > policy.threshold {
        findings.flag(Reason::triggered(
            ReasonCode::Threshold,
            format!(
                "Sessions above {} need approval.",
                format_amount(policy.threshold)
            ),
        ));
        findings.offer(AltAction::new(
            "charging-cap",
            format!("Cap session at {}", format_amount(policy.threshold)),
            "Stop charging at the approval threshold.",
            Outcome::Allowed,
            ScenarioPatch::amount(policy.threshold),
        ));
    }

    findings
}
