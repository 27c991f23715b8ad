use super::config::PolicyConfig;
use super::domain::{
    CoachTip, PaymentMethod, RideCategory, Scenario, ScenarioPatch, SpendModule,
};
use super::reasons::format_amount;

impl CoachTip {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        patch: Option<ScenarioPatch>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            patch,
        }
    }
}

/// Proactive tips for the scenario's module, emitted whether or not a rule fired.
pub(crate) fn tips_for(scenario: &Scenario, config: &PolicyConfig) -> Vec<CoachTip> {
    if scenario.payment == PaymentMethod::Personal {
        return vec![CoachTip::new(
            "coach-prefer-corporate",
            "Prefer CorporatePay for business spend",
            "Legitimate business expenses belong on the corporate instrument so they are tracked and reimbursed correctly.",
            Some(ScenarioPatch::payment(PaymentMethod::CorporatePay)),
        )];
    }

    match scenario.module {
        SpendModule::RidesAndLogistics => vec![
            CoachTip::new(
                "coach-rides-standard",
                "Prefer Standard rides",
                format!(
                    "Standard rides never need approval; Premium rides above {} do.",
                    format_amount(config.rides.premium_threshold)
                ),
                Some(ScenarioPatch::ride_category(RideCategory::Standard)),
            ),
            CoachTip::new(
                "coach-rides-purpose",
                "Attach purpose and cost center",
                "Adding the trip purpose and cost center up front reduces approval rework.",
                None,
            ),
        ],
        SpendModule::ECommerce => vec![
            CoachTip::new(
                "coach-ecommerce-vendors",
                "Buy from approved vendors",
                "Approved vendors avoid vendor review entirely.",
                Some(ScenarioPatch::vendor_approved(true)),
            ),
            CoachTip::new(
                "coach-ecommerce-categories",
                "Avoid restricted categories",
                "Restricted categories are always blocked on the corporate instrument.",
                None,
            ),
            CoachTip::new(
                "coach-ecommerce-basket",
                format!(
                    "Keep {} baskets at or under {}",
                    config.ecommerce.thresholded_marketplace.label(),
                    format_amount(config.ecommerce.marketplace_threshold)
                ),
                "Larger baskets on this marketplace need approval; split them or use another marketplace.",
                None,
            ),
        ],
        SpendModule::EvCharging => vec![
            CoachTip::new(
                "coach-charging-stations",
                "Use approved charging stations",
                "Sessions at unapproved stations are blocked.",
                Some(ScenarioPatch::station(config.charging.fallback_station)),
            ),
            CoachTip::new(
                "coach-charging-threshold",
                format!(
                    "Stay at or under {} per session",
                    format_amount(config.charging.threshold)
                ),
                "Sessions above the threshold need approval.",
                None,
            ),
        ],
        SpendModule::Other => vec![CoachTip::new(
            "coach-other-rfq",
            "Use the RFQ flow for large purchases",
            format!(
                "One-off purchases above {} are blocked; an RFQ keeps them on track.",
                format_amount(config.other.basket_cap)
            ),
            None,
        )],
    }
}
