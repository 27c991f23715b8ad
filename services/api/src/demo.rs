use clap::Args;
use serde_json::json;
use spend_policy::config::AppConfig;
use spend_policy::error::AppError;
use spend_policy::policy::{Change, Decision, PolicyEngine, Scenario, ScenarioPayload};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Scenario JSON file (same shape as the POST /policy/evaluate body)
    #[arg(long)]
    pub(crate) scenario: PathBuf,
    /// Print the raw JSON decision instead of the readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DiffArgs {
    /// Scenario JSON file for the previous attempt
    #[arg(long)]
    pub(crate) previous: PathBuf,
    /// Scenario JSON file for the current attempt
    #[arg(long)]
    pub(crate) current: PathBuf,
    /// Print the raw JSON changes instead of the readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let scenario = read_scenario(&args.scenario)?;
    let decision = engine.evaluate(&scenario);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        render_decision(&scenario, &decision);
    }
    Ok(())
}

pub(crate) fn run_diff(args: DiffArgs) -> Result<(), AppError> {
    let engine = configured_engine()?;
    let previous = read_scenario(&args.previous)?;
    let current = read_scenario(&args.current)?;
    let changes = engine.diff(&previous, &current);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "changes": changes }))?
        );
    } else {
        render_changes(&changes);
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let engine = configured_engine()?;

    println!("Spend policy demo");
    let ride = demo_ride()?;
    println!("\nScenario A: Standard ride in Kampala");
    render_decision(&ride, &engine.evaluate(&ride));

    let basket = demo_basket()?;
    println!("\nScenario B: MyLiveDealz basket from an unapproved vendor");
    let decision = engine.evaluate(&basket);
    render_decision(&basket, &decision);

    println!("\nScenario A -> B");
    render_changes(&engine.diff(&ride, &basket));

    let Some(rfq) = decision.alternative("ecommerce-rfq") else {
        return Ok(());
    };
    let revised = basket.apply(&rfq.patch);
    println!("\nApplying '{}'", rfq.title);
    render_decision(&revised, &engine.evaluate(&revised));

    println!("\nChange impact");
    render_changes(&engine.diff(&basket, &revised));
    Ok(())
}

fn configured_engine() -> Result<PolicyEngine, AppError> {
    let config = AppConfig::load()?;
    Ok(PolicyEngine::new(config.policy))
}

fn read_scenario(path: &Path) -> Result<Scenario, AppError> {
    let raw = fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(ScenarioPayload::from_json(&document)?.into_scenario()?)
}

fn demo_ride() -> Result<Scenario, AppError> {
    let payload: ScenarioPayload = serde_json::from_value(json!({
        "module": "Rides",
        "payment": "CorporatePay",
        "amount": 160000,
        "timeOfDay": "09:30",
        "location": "Kampala",
        "rideCategory": "Standard"
    }))?;
    Ok(payload.into_scenario()?)
}

fn demo_basket() -> Result<Scenario, AppError> {
    let payload: ScenarioPayload = serde_json::from_value(json!({
        "module": "ECommerce",
        "payment": "CorporatePay",
        "amount": 1250000,
        "timeOfDay": "11:00",
        "location": "Kampala",
        "marketplace": "MyLiveDealz",
        "vendorApproved": false,
        "category": "OfficeSupplies"
    }))?;
    Ok(payload.into_scenario()?)
}

pub(crate) fn render_decision(scenario: &Scenario, decision: &Decision) {
    println!(
        "Module {} | {} | amount {} | {} in {}",
        scenario.module.display_name(),
        scenario.payment.label(),
        scenario.amount,
        scenario.time_of_day,
        scenario.location.label()
    );
    println!("Outcome: {}", decision.outcome.label());

    println!("Reasons");
    for reason in &decision.reasons {
        println!("- [{}] {}: {}", reason.code.label(), reason.title, reason.detail);
    }

    if !decision.alternatives.is_empty() {
        println!("Alternatives");
        for alt in &decision.alternatives {
            println!(
                "- {} ({}) -> expected {}",
                alt.title,
                alt.id,
                alt.expected_outcome.label()
            );
        }
    }

    if !decision.coach.is_empty() {
        println!("Coaching");
        for tip in &decision.coach {
            println!("- {}: {}", tip.title, tip.description);
        }
    }
}

pub(crate) fn render_changes(changes: &[Change]) {
    if changes.is_empty() {
        println!("No changes");
        return;
    }
    for change in changes {
        println!(
            "- {:?}: {} -> {} ({:?})",
            change.field, change.from, change.to, change.impact
        );
    }
}
