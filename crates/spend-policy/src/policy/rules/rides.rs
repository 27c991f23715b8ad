use super::RuleFindings;
use crate::policy::config::RidesPolicy;
use crate::policy::domain::{
    AltAction, Outcome, Reason, ReasonCode, RideCategory, Scenario, ScenarioPatch,
};
use crate::policy::reasons::format_amount;

pub(super) fn scan(scenario: &Scenario, policy: &RidesPolicy) -> RuleFindings {
    let mut findings = RuleFindings::default();

    if !policy.within_hours(scenario.time_of_day) {
        findings.flag(Reason::triggered(
            ReasonCode::Time,
            format!(
                "Rides at {} fall outside the allowed window {}-{}.",
                scenario.time_of_day, policy.window_start, policy.window_end
            ),
        ));
        findings.offer(AltAction::new(
            "rides-reschedule",
            format!("Reschedule to {}", policy.suggested_time),
            "Book the ride inside business hours.",
            Outcome::Allowed,
            ScenarioPatch::time_of_day(policy.suggested_time),
        ));
    }

    if !policy.location_allowed(scenario.location) {
        let allowed: Vec<&str> = policy
            .allowed_locations
            .iter()
            .map(|location| location.label())
            .collect();
        findings.flag(Reason::triggered(
            ReasonCode::Geo,
            format!(
                "Pickup in {} is outside the allowed area ({}).",
                scenario.location.label(),
                allowed.join(", ")
            ),
        ));
        findings.offer(AltAction::new(
            "rides-relocate",
            format!("Pick up in {}", policy.fallback_location.label()),
            "Start the trip from an allowed location.",
            Outcome::Allowed,
            ScenarioPatch::location(policy.fallback_location),
        ));
    }

    if policy.blocked_categories.contains(&scenario.ride_category) {
        findings.flag(Reason::triggered(
            ReasonCode::Category,
            format!(
                "{} rides are not permitted on the corporate instrument.",
                scenario.ride_category.label()
            ),
        ));
        findings.offer(AltAction::new(
            "rides-standard",
            "Switch to Standard",
            "Standard rides are within policy.",
            Outcome::Allowed,
            ScenarioPatch::ride_category(RideCategory::Standard),
        ));
        findings.offer(AltAction::new(
            "rides-premium",
            "Switch to Premium",
            "Premium rides are permitted with manager approval.",
            Outcome::ApprovalRequired,
            ScenarioPatch::ride_category(RideCategory::Premium),
        ));
    }

    let over_cap = scenario.amount > policy.basket_cap;
    if over_cap {
        findings.flag(Reason::triggered(
            ReasonCode::Basket,
            format!(
                "Fare {} exceeds the ride cap of {}.",
                format_amount(scenario.amount),
                format_amount(policy.basket_cap)
            ),
        ));
        findings.offer(AltAction::new(
            "rides-standard-under-cap",
            format!(
                "Standard ride at {}",
                format_amount(policy.basket_target)
            ),
            "Book a Standard ride with a fare well under the cap.",
            Outcome::Allowed,
            ScenarioPatch::ride_category(RideCategory::Standard).and_amount(policy.basket_target),
        ));
    }

    if !over_cap
        && scenario.ride_category == RideCategory::Premium
        && scenario.amount > policy.premium_threshold
    {
        findings.flag(Reason::triggered(
            ReasonCode::Threshold,
            format!(
                "Premium fares above {} need approval.",
                format_amount(policy.premium_threshold)
            ),
        ));
        findings.offer(AltAction::new(
            "rides-standard",
            "Switch to Standard",
            "Standard rides are within policy.",
            Outcome::Allowed,
            ScenarioPatch::ride_category(RideCategory::Standard),
        ));
        findings.offer(AltAction::new(
            "rides-lower-fare",
            format!("Lower fare to {}", format_amount(policy.premium_target)),
            "Keep the Premium fare under the approval threshold.",
            Outcome::Allowed,
            ScenarioPatch::amount(policy.premium_target),
        ));
    }

    findings
}
