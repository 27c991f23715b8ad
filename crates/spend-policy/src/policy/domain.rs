use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Spend module a scenario is filed under; selects exactly one rule evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpendModule {
    #[serde(rename = "Rides")]
    RidesAndLogistics,
    #[serde(rename = "ECommerce")]
    ECommerce,
    #[serde(rename = "EVs")]
    EvCharging,
    Other,
}

impl SpendModule {
    pub fn label(&self) -> &'static str {
        match self {
            SpendModule::RidesAndLogistics => "Rides",
            SpendModule::ECommerce => "ECommerce",
            SpendModule::EvCharging => "EVs",
            SpendModule::Other => "Other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SpendModule::RidesAndLogistics => "Rides & Logistics",
            SpendModule::ECommerce => "E-Commerce",
            SpendModule::EvCharging => "EVs & Charging",
            SpendModule::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    CorporatePay,
    Personal,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CorporatePay => "CorporatePay",
            PaymentMethod::Personal => "Personal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Kampala,
    Entebbe,
    Jinja,
    Other,
}

impl Location {
    pub fn label(&self) -> &'static str {
        match self {
            Location::Kampala => "Kampala",
            Location::Entebbe => "Entebbe",
            Location::Jinja => "Jinja",
            Location::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RideCategory {
    Standard,
    Premium,
    Luxury,
}

impl RideCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RideCategory::Standard => "Standard",
            RideCategory::Premium => "Premium",
            RideCategory::Luxury => "Luxury",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    MyLiveDealz,
    #[serde(rename = "EVmart")]
    EvMart,
    ServiceMart,
    Other,
}

impl Marketplace {
    pub fn label(&self) -> &'static str {
        match self {
            Marketplace::MyLiveDealz => "MyLiveDealz",
            Marketplace::EvMart => "EVmart",
            Marketplace::ServiceMart => "ServiceMart",
            Marketplace::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseCategory {
    OfficeSupplies,
    Electronics,
    Vehicles,
    Catering,
    Medical,
    Restricted,
}

impl PurchaseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseCategory::OfficeSupplies => "OfficeSupplies",
            PurchaseCategory::Electronics => "Electronics",
            PurchaseCategory::Vehicles => "Vehicles",
            PurchaseCategory::Catering => "Catering",
            PurchaseCategory::Medical => "Medical",
            PurchaseCategory::Restricted => "Restricted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargingStation {
    #[serde(rename = "KampalaCBD")]
    KampalaCbd,
    Entebbe,
    Other,
}

impl ChargingStation {
    pub fn label(&self) -> &'static str {
        match self {
            ChargingStation::KampalaCbd => "KampalaCBD",
            ChargingStation::Entebbe => "Entebbe",
            ChargingStation::Other => "Other",
        }
    }
}

/// Wall-clock time of a transaction, minute precision, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// For literal clock values; out-of-range input falls back to midnight.
    pub(crate) fn at(hour: u32, minute: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default())
    }

    /// Exactly `HH:MM`; padding and single-digit hours are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != 5 {
            return None;
        }
        NaiveTime::parse_from_str(raw, "%H:%M").ok().map(Self)
    }

    /// Inclusive on both ends.
    pub fn within(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        *self >= start && *self <= end
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TimeOfDay::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as HH:MM"))
        })
    }
}

/// A proposed transaction submitted for a policy check.
///
/// Module-specific fields are always carried; evaluators for other modules
/// ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub module: SpendModule,
    pub payment: PaymentMethod,
    pub amount: u64,
    pub time_of_day: TimeOfDay,
    pub location: Location,
    pub ride_category: RideCategory,
    pub marketplace: Marketplace,
    pub vendor_approved: bool,
    pub category: PurchaseCategory,
    pub station: ChargingStation,
}

impl Scenario {
    pub fn with_module(&self, module: SpendModule) -> Self {
        Self {
            module,
            ..self.clone()
        }
    }

    pub fn with_payment(&self, payment: PaymentMethod) -> Self {
        Self {
            payment,
            ..self.clone()
        }
    }

    pub fn with_amount(&self, amount: u64) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    pub fn with_time_of_day(&self, time_of_day: TimeOfDay) -> Self {
        Self {
            time_of_day,
            ..self.clone()
        }
    }

    pub fn with_location(&self, location: Location) -> Self {
        Self {
            location,
            ..self.clone()
        }
    }

    pub fn with_ride_category(&self, ride_category: RideCategory) -> Self {
        Self {
            ride_category,
            ..self.clone()
        }
    }

    pub fn with_marketplace(&self, marketplace: Marketplace) -> Self {
        Self {
            marketplace,
            ..self.clone()
        }
    }

    pub fn with_vendor_approved(&self, vendor_approved: bool) -> Self {
        Self {
            vendor_approved,
            ..self.clone()
        }
    }

    pub fn with_category(&self, category: PurchaseCategory) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }

    pub fn with_station(&self, station: ChargingStation) -> Self {
        Self {
            station,
            ..self.clone()
        }
    }

    /// Returns a new scenario with every field present in `patch` replaced.
    pub fn apply(&self, patch: &ScenarioPatch) -> Self {
        let mut next = self.clone();
        if let Some(module) = patch.module {
            next = next.with_module(module);
        }
        if let Some(payment) = patch.payment {
            next = next.with_payment(payment);
        }
        if let Some(amount) = patch.amount {
            next = next.with_amount(amount);
        }
        if let Some(time_of_day) = patch.time_of_day {
            next = next.with_time_of_day(time_of_day);
        }
        if let Some(location) = patch.location {
            next = next.with_location(location);
        }
        if let Some(ride_category) = patch.ride_category {
            next = next.with_ride_category(ride_category);
        }
        if let Some(marketplace) = patch.marketplace {
            next = next.with_marketplace(marketplace);
        }
        if let Some(vendor_approved) = patch.vendor_approved {
            next = next.with_vendor_approved(vendor_approved);
        }
        if let Some(category) = patch.category {
            next = next.with_category(category);
        }
        if let Some(station) = patch.station {
            next = next.with_station(station);
        }
        next
    }
}

/// Typed partial scenario carried by alternatives and coach tips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<SpendModule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ride_category: Option<RideCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<Marketplace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PurchaseCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<ChargingStation>,
}

impl ScenarioPatch {
    pub fn payment(payment: PaymentMethod) -> Self {
        Self {
            payment: Some(payment),
            ..Self::default()
        }
    }

    pub fn amount(amount: u64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn time_of_day(time_of_day: TimeOfDay) -> Self {
        Self {
            time_of_day: Some(time_of_day),
            ..Self::default()
        }
    }

    pub fn location(location: Location) -> Self {
        Self {
            location: Some(location),
            ..Self::default()
        }
    }

    pub fn ride_category(ride_category: RideCategory) -> Self {
        Self {
            ride_category: Some(ride_category),
            ..Self::default()
        }
    }

    pub fn marketplace(marketplace: Marketplace) -> Self {
        Self {
            marketplace: Some(marketplace),
            ..Self::default()
        }
    }

    pub fn vendor_approved(vendor_approved: bool) -> Self {
        Self {
            vendor_approved: Some(vendor_approved),
            ..Self::default()
        }
    }

    pub fn category(category: PurchaseCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn station(station: ChargingStation) -> Self {
        Self {
            station: Some(station),
            ..Self::default()
        }
    }

    pub fn and_amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn and_vendor_approved(mut self, vendor_approved: bool) -> Self {
        self.vendor_approved = Some(vendor_approved);
        self
    }
}

/// Verdict for a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Allowed,
    ApprovalRequired,
    Blocked,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Allowed => "Allowed",
            Outcome::ApprovalRequired => "ApprovalRequired",
            Outcome::Blocked => "Blocked",
        }
    }
}

/// Closed set of rule identifiers a reason can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReasonCode {
    Geo,
    Time,
    Vendor,
    Category,
    Basket,
    Station,
    Threshold,
    Cap,
    Program,
    Ok,
}

impl ReasonCode {
    pub fn label(&self) -> &'static str {
        match self {
            ReasonCode::Geo => "GEO",
            ReasonCode::Time => "TIME",
            ReasonCode::Vendor => "VENDOR",
            ReasonCode::Category => "CATEGORY",
            ReasonCode::Basket => "BASKET",
            ReasonCode::Station => "STATION",
            ReasonCode::Threshold => "THRESHOLD",
            ReasonCode::Cap => "CAP",
            ReasonCode::Program => "PROGRAM",
            ReasonCode::Ok => "OK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    pub code: ReasonCode,
    pub title: String,
    pub detail: String,
}

/// Minimal corrective change that would move the scenario toward `expected_outcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AltAction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub expected_outcome: Outcome,
    pub patch: ScenarioPatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachTip {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<ScenarioPatch>,
}

/// Result of one evaluation: verdict, explanation, fixes, and coaching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub reasons: Vec<Reason>,
    pub alternatives: Vec<AltAction>,
    pub coach: Vec<CoachTip>,
}

impl Decision {
    pub fn alternative(&self, id: &str) -> Option<&AltAction> {
        self.alternatives.iter().find(|alt| alt.id == id)
    }

    pub fn has_reason(&self, code: ReasonCode) -> bool {
        self.reasons.iter().any(|reason| reason.code == code)
    }

    pub fn summary(&self) -> String {
        let codes: Vec<&str> = self.reasons.iter().map(|reason| reason.code.label()).collect();
        format!("{} ({})", self.outcome.label(), codes.join(", "))
    }
}

/// Scenario fields tracked by the conflict differ, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScenarioField {
    Module,
    Payment,
    Amount,
    Time,
    Location,
    RideCategory,
    Marketplace,
    VendorApproved,
    Category,
    Station,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Impact {
    Improved,
    Worse,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub field: ScenarioField,
    pub from: String,
    pub to: String,
    pub impact: Impact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_parses_strict_hh_mm() {
        assert_eq!(TimeOfDay::parse("09:30"), TimeOfDay::from_hm(9, 30));
        assert_eq!(TimeOfDay::parse("22:00"), TimeOfDay::from_hm(22, 0));
        assert!(TimeOfDay::parse(" 22:00 ").is_none());
        assert!(TimeOfDay::parse("22:00\n").is_none());
        assert!(TimeOfDay::parse("9:30").is_none());
        assert!(TimeOfDay::parse("24:00").is_none());
        assert!(TimeOfDay::parse("12:60").is_none());
        assert!(TimeOfDay::parse("noon").is_none());
    }

    #[test]
    fn time_window_is_inclusive() {
        let start = TimeOfDay::from_hm(6, 0).expect("valid");
        let end = TimeOfDay::from_hm(22, 0).expect("valid");
        assert!(start.within(start, end));
        assert!(end.within(start, end));
        assert!(!TimeOfDay::from_hm(22, 1).expect("valid").within(start, end));
        assert!(!TimeOfDay::from_hm(5, 59).expect("valid").within(start, end));
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = ScenarioPatch::ride_category(RideCategory::Standard).and_amount(200_000);
        let json = serde_json::to_value(&patch).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "amount": 200000, "rideCategory": "Standard" })
        );
    }

    #[test]
    fn reason_codes_serialize_uppercase() {
        let json = serde_json::to_value(ReasonCode::Threshold).expect("serializes");
        assert_eq!(json, serde_json::json!("THRESHOLD"));
        assert_eq!(ReasonCode::Ok.label(), "OK");
    }
}
