use spend_policy::policy::{
    Impact, Outcome, PolicyConfig, PolicyEngine, ReasonCode, ScenarioField, ScenarioPayload,
};

fn payload(value: serde_json::Value) -> ScenarioPayload {
    serde_json::from_value(value).expect("payload parses")
}

#[test]
fn requester_fixes_a_blocked_ride_one_alternative_at_a_time() {
    let engine = PolicyEngine::new(PolicyConfig::default());
    let first = payload(serde_json::json!({
        "module": "Rides",
        "payment": "CorporatePay",
        "amount": 450000,
        "timeOfDay": "23:15",
        "location": "Jinja",
        "rideCategory": "Luxury"
    }))
    .into_scenario()
    .expect("valid scenario");

    let decision = engine.evaluate(&first);
    assert_eq!(decision.outcome, Outcome::Blocked);
    let codes: Vec<ReasonCode> = decision.reasons.iter().map(|reason| reason.code).collect();
    assert_eq!(
        codes,
        vec![ReasonCode::Time, ReasonCode::Geo, ReasonCode::Category]
    );

    let mut current = first.clone();
    for id in ["rides-reschedule", "rides-relocate", "rides-premium"] {
        let decision = engine.evaluate(&current);
        let alternative = decision
            .alternative(id)
            .unwrap_or_else(|| panic!("{id} offered in {}", decision.summary()));
        current = current.apply(&alternative.patch);
    }

    let decision = engine.evaluate(&current);
    assert_eq!(decision.outcome, Outcome::ApprovalRequired);
    assert_eq!(decision.summary(), "ApprovalRequired (THRESHOLD)");

    let lower = decision
        .alternative("rides-lower-fare")
        .expect("lower fare offered");
    current = current.apply(&lower.patch);
    assert_eq!(engine.evaluate(&current).outcome, Outcome::Allowed);

    let changes = engine.diff(&first, &current);
    let fields: Vec<ScenarioField> = changes.iter().map(|change| change.field).collect();
    assert_eq!(
        fields,
        vec![
            ScenarioField::Amount,
            ScenarioField::Time,
            ScenarioField::Location,
            ScenarioField::RideCategory,
        ]
    );
    assert!(changes
        .iter()
        .all(|change| change.impact == Impact::Improved));
}

#[test]
fn decision_serializes_to_wire_shape() {
    let engine = PolicyEngine::default();
    let scenario = payload(serde_json::json!({
        "module": "EVs",
        "payment": "CorporatePay",
        "amount": 200000,
        "timeOfDay": "14:00",
        "location": "Entebbe",
        "station": "Entebbe"
    }))
    .into_scenario()
    .expect("valid scenario");

    let json = serde_json::to_value(engine.evaluate(&scenario)).expect("serializes");
    assert_eq!(json["outcome"], "ApprovalRequired");
    assert_eq!(json["reasons"][0]["code"], "THRESHOLD");
    assert_eq!(json["reasons"][0]["title"], "Approval threshold exceeded");
    assert_eq!(json["alternatives"][0]["id"], "charging-cap");
    assert_eq!(json["alternatives"][0]["patch"], serde_json::json!({ "amount": 150000 }));
    assert_eq!(json["alternatives"][1]["id"], "pay-personal");
    assert_eq!(json["coach"][1].get("patch"), None);
}
