use super::config::PolicyConfig;
use super::domain::{
    Change, Impact, Location, PaymentMethod, RideCategory, Scenario, ScenarioField, SpendModule,
};

/// Field-level comparison of two attempts, in fixed field-check order.
///
/// Only fields whose rendered value differs are reported. Module-specific
/// fields are tracked when either scenario belongs to that module.
pub(crate) fn diff_scenarios(
    previous: &Scenario,
    current: &Scenario,
    config: &PolicyConfig,
) -> Vec<Change> {
    let either = |module: SpendModule| previous.module == module || current.module == module;

    let mut tracked = vec![
        ScenarioField::Module,
        ScenarioField::Payment,
        ScenarioField::Amount,
        ScenarioField::Time,
        ScenarioField::Location,
    ];
    if either(SpendModule::RidesAndLogistics) {
        tracked.push(ScenarioField::RideCategory);
    }
    if either(SpendModule::ECommerce) {
        tracked.extend([
            ScenarioField::Marketplace,
            ScenarioField::VendorApproved,
            ScenarioField::Category,
        ]);
    }
    if either(SpendModule::EvCharging) {
        tracked.push(ScenarioField::Station);
    }

    tracked
        .into_iter()
        .filter_map(|field| {
            let from = render(previous, field);
            let to = render(current, field);
            if from == to {
                return None;
            }
            let impact = classify(field, previous, current, config);
            Some(Change {
                field,
                from,
                to,
                impact,
            })
        })
        .collect()
}

fn render(scenario: &Scenario, field: ScenarioField) -> String {
    match field {
        ScenarioField::Module => scenario.module.label().to_string(),
        ScenarioField::Payment => scenario.payment.label().to_string(),
        ScenarioField::Amount => scenario.amount.to_string(),
        ScenarioField::Time => scenario.time_of_day.to_string(),
        ScenarioField::Location => scenario.location.label().to_string(),
        ScenarioField::RideCategory => scenario.ride_category.label().to_string(),
        ScenarioField::Marketplace => scenario.marketplace.label().to_string(),
        ScenarioField::VendorApproved => scenario.vendor_approved.to_string(),
        ScenarioField::Category => scenario.category.label().to_string(),
        ScenarioField::Station => scenario.station.label().to_string(),
    }
}

fn classify(
    field: ScenarioField,
    previous: &Scenario,
    current: &Scenario,
    config: &PolicyConfig,
) -> Impact {
    match field {
        ScenarioField::VendorApproved => {
            directional(!previous.vendor_approved, current.vendor_approved)
        }
        ScenarioField::RideCategory => {
            let luxury = |category: RideCategory| category == RideCategory::Luxury;
            directional(luxury(previous.ride_category), !luxury(current.ride_category))
        }
        ScenarioField::Location => {
            let allowed = |location: Location| config.rides.location_allowed(location);
            directional(!allowed(previous.location), allowed(current.location))
        }
        ScenarioField::Payment => directional(
            previous.payment == PaymentMethod::CorporatePay,
            current.payment == PaymentMethod::Personal,
        ),
        ScenarioField::Amount => {
            if current.amount < previous.amount {
                Impact::Improved
            } else if current.amount > previous.amount {
                Impact::Worse
            } else {
                Impact::Neutral
            }
        }
        ScenarioField::Time => {
            let rides = &config.rides;
            if !rides.within_hours(previous.time_of_day) && rides.within_hours(current.time_of_day)
            {
                Impact::Improved
            } else {
                Impact::Neutral
            }
        }
        ScenarioField::Module
        | ScenarioField::Marketplace
        | ScenarioField::Category
        | ScenarioField::Station => Impact::Neutral,
    }
}

/// Two-sided heuristic: `was_bad -> now_good` improves, the mirror image worsens.
fn directional(was_bad: bool, now_good: bool) -> Impact {
    match (was_bad, now_good) {
        (true, true) => Impact::Improved,
        (false, false) => Impact::Worse,
        _ => Impact::Neutral,
    }
}
