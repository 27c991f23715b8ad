use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::{
    ChargingStation, Marketplace, PurchaseCategory, RideCategory, Scenario, SpendModule,
    TimeOfDay,
};

/// Rejection raised before evaluation; always names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidScenario {
    #[error("{field}: required field is missing")]
    MissingField { field: String },
    #[error("{field}: expected {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
    #[error("{field}: unknown value '{value}'")]
    UnknownValue { field: String, value: String },
    #[error("{field}: amount must be non-negative (found {value})")]
    NegativeAmount { field: String, value: i64 },
    #[error("{field}: '{value}' is not a 24h HH:MM time")]
    MalformedTime { field: String, value: String },
}

impl InvalidScenario {
    pub fn field(&self) -> &str {
        match self {
            InvalidScenario::MissingField { field }
            | InvalidScenario::InvalidType { field, .. }
            | InvalidScenario::UnknownValue { field, .. }
            | InvalidScenario::NegativeAmount { field, .. }
            | InvalidScenario::MalformedTime { field, .. } => field,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self {
            InvalidScenario::MissingField { field }
            | InvalidScenario::InvalidType { field, .. }
            | InvalidScenario::UnknownValue { field, .. }
            | InvalidScenario::NegativeAmount { field, .. }
            | InvalidScenario::MalformedTime { field, .. } => field,
        }
    }

    /// Re-roots the field path, e.g. `amount` -> `previous.amount`.
    pub fn within(mut self, parent: &str) -> Self {
        let field = self.field_mut();
        *field = format!("{parent}.{field}");
        self
    }
}

/// Untrusted scenario as it arrives over the wire or from a file.
///
/// Enumerations stay raw strings so that an unknown value can be reported
/// against its field instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPayload {
    pub module: String,
    pub payment: String,
    pub amount: i64,
    pub time_of_day: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ride_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_approved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

const RIDE_CATEGORY: &str = "rideCategory";
const MARKETPLACE: &str = "marketplace";
const VENDOR_APPROVED: &str = "vendorApproved";
const CATEGORY: &str = "category";
const STATION: &str = "station";

/// Whether the evaluator for `module` reads the module-specific `field`.
fn module_reads(module: SpendModule, field: &str) -> bool {
    match module {
        SpendModule::RidesAndLogistics => field == RIDE_CATEGORY,
        SpendModule::ECommerce => matches!(field, MARKETPLACE | VENDOR_APPROVED | CATEGORY),
        SpendModule::EvCharging => field == STATION,
        SpendModule::Other => false,
    }
}

impl ScenarioPayload {
    /// Pulls a payload out of an untyped JSON document one key at a time, so a
    /// missing or wrong-typed key is reported by name.
    ///
    /// A module-specific key the selected module never reads is dropped when it
    /// has the wrong type instead of failing the document. `null` counts as
    /// absent.
    pub fn from_json(value: &Value) -> Result<Self, InvalidScenario> {
        let object = value
            .as_object()
            .ok_or_else(|| InvalidScenario::InvalidType {
                field: "scenario".to_string(),
                expected: "a JSON object",
            })?;

        let module = required_str(object, "module")?;
        let selected = parse_enum::<SpendModule>("module", &module).ok();
        let relevant = |field: &str| selected.is_some_and(|module| module_reads(module, field));

        Ok(Self {
            payment: required_str(object, "payment")?,
            amount: required_amount(object)?,
            time_of_day: required_str(object, "timeOfDay")?,
            location: required_str(object, "location")?,
            ride_category: optional_str(object, RIDE_CATEGORY, relevant(RIDE_CATEGORY))?,
            marketplace: optional_str(object, MARKETPLACE, relevant(MARKETPLACE))?,
            vendor_approved: optional_bool(object, VENDOR_APPROVED, relevant(VENDOR_APPROVED))?,
            category: optional_str(object, CATEGORY, relevant(CATEGORY))?,
            station: optional_str(object, STATION, relevant(STATION))?,
            module,
        })
    }

    /// Validates the fields the selected module reads.
    ///
    /// Fields of other modules are carried through when they hold a known
    /// value and fall back to their defaults otherwise; they are never
    /// rejected.
    pub fn into_scenario(self) -> Result<Scenario, InvalidScenario> {
        let module: SpendModule = parse_enum("module", &self.module)?;
        let payment = parse_enum("payment", &self.payment)?;
        let amount = u64::try_from(self.amount).map_err(|_| InvalidScenario::NegativeAmount {
            field: "amount".to_string(),
            value: self.amount,
        })?;
        let time_of_day =
            TimeOfDay::parse(&self.time_of_day).ok_or_else(|| InvalidScenario::MalformedTime {
                field: "timeOfDay".to_string(),
                value: self.time_of_day.clone(),
            })?;
        let location = parse_enum("location", &self.location)?;

        let ride_category = module_field(module, RIDE_CATEGORY, self.ride_category.as_deref())?;
        let marketplace = module_field(module, MARKETPLACE, self.marketplace.as_deref())?;
        let category = module_field(module, CATEGORY, self.category.as_deref())?;
        let station = module_field(module, STATION, self.station.as_deref())?;

        Ok(Scenario {
            module,
            payment,
            amount,
            time_of_day,
            location,
            ride_category: ride_category.unwrap_or(RideCategory::Standard),
            marketplace: marketplace.unwrap_or(Marketplace::MyLiveDealz),
            vendor_approved: self.vendor_approved.unwrap_or(true),
            category: category.unwrap_or(PurchaseCategory::OfficeSupplies),
            station: station.unwrap_or(ChargingStation::KampalaCbd),
        })
    }
}

impl TryFrom<ScenarioPayload> for Scenario {
    type Error = InvalidScenario;

    fn try_from(payload: ScenarioPayload) -> Result<Self, Self::Error> {
        payload.into_scenario()
    }
}

impl From<&Scenario> for ScenarioPayload {
    fn from(scenario: &Scenario) -> Self {
        Self {
            module: scenario.module.label().to_string(),
            payment: scenario.payment.label().to_string(),
            amount: i64::try_from(scenario.amount).unwrap_or(i64::MAX),
            time_of_day: scenario.time_of_day.to_string(),
            location: scenario.location.label().to_string(),
            ride_category: Some(scenario.ride_category.label().to_string()),
            marketplace: Some(scenario.marketplace.label().to_string()),
            vendor_approved: Some(scenario.vendor_approved),
            category: Some(scenario.category.label().to_string()),
            station: Some(scenario.station.label().to_string()),
        }
    }
}

fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| !value.is_null())
}

fn required_str(object: &Map<String, Value>, field: &str) -> Result<String, InvalidScenario> {
    let value = present(object, field).ok_or_else(|| InvalidScenario::MissingField {
        field: field.to_string(),
    })?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| InvalidScenario::InvalidType {
            field: field.to_string(),
            expected: "a string",
        })
}

fn required_amount(object: &Map<String, Value>) -> Result<i64, InvalidScenario> {
    let value = present(object, "amount").ok_or_else(|| InvalidScenario::MissingField {
        field: "amount".to_string(),
    })?;
    value.as_i64().ok_or_else(|| InvalidScenario::InvalidType {
        field: "amount".to_string(),
        expected: "a whole number of currency units",
    })
}

fn optional_str(
    object: &Map<String, Value>,
    field: &str,
    relevant: bool,
) -> Result<Option<String>, InvalidScenario> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::String(raw)) => Ok(Some(raw.clone())),
        Some(_) if relevant => Err(InvalidScenario::InvalidType {
            field: field.to_string(),
            expected: "a string",
        }),
        Some(_) => Ok(None),
    }
}

fn optional_bool(
    object: &Map<String, Value>,
    field: &str,
    relevant: bool,
) -> Result<Option<bool>, InvalidScenario> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) if relevant => Err(InvalidScenario::InvalidType {
            field: field.to_string(),
            expected: "a boolean",
        }),
        Some(_) => Ok(None),
    }
}

/// Strict for fields `module` reads; best-effort for the rest.
fn module_field<T: DeserializeOwned>(
    module: SpendModule,
    field: &str,
    raw: Option<&str>,
) -> Result<Option<T>, InvalidScenario> {
    if module_reads(module, field) {
        parse_optional(field, raw)
    } else {
        Ok(raw.and_then(|value| parse_enum(field, value).ok()))
    }
}

fn parse_enum<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, InvalidScenario> {
    let deserializer: StrDeserializer<'_, ValueError> = raw.into_deserializer();
    T::deserialize(deserializer).map_err(|_| InvalidScenario::UnknownValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_optional<T: DeserializeOwned>(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<T>, InvalidScenario> {
    raw.map(|value| parse_enum(field, value)).transpose()
}
