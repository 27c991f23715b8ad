use serde::{Deserialize, Serialize};

use super::domain::{
    ChargingStation, Location, Marketplace, PurchaseCategory, RideCategory, TimeOfDay,
};

/// Thresholds, caps, and allow-lists parameterizing every rule table.
///
/// Loaded once at startup and shared read-only; `Default` reproduces the
/// stock corporate policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub rides: RidesPolicy,
    pub ecommerce: ECommercePolicy,
    pub charging: ChargingPolicy,
    pub other: OtherPolicy,
}

impl PolicyConfig {
    /// Rejects configurations whose thresholds contradict each other.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let rides = &self.rides;
        if rides.window_start >= rides.window_end {
            return Err(PolicyError::InvertedWindow {
                start: rides.window_start,
                end: rides.window_end,
            });
        }
        if rides.allowed_locations.is_empty() {
            return Err(PolicyError::EmptyAllowList("rides.allowedLocations"));
        }
        if self.charging.approved_stations.is_empty() {
            return Err(PolicyError::EmptyAllowList("charging.approvedStations"));
        }

        let limits = [
            (
                "rides.premiumThreshold",
                rides.premium_threshold,
                "rides.basketCap",
                rides.basket_cap,
            ),
            (
                "ecommerce.marketplaceThreshold",
                self.ecommerce.marketplace_threshold,
                "ecommerce.basketCap",
                self.ecommerce.basket_cap,
            ),
            (
                "charging.threshold",
                self.charging.threshold,
                "charging.basketCap",
                self.charging.basket_cap,
            ),
            (
                "other.threshold",
                self.other.threshold,
                "other.basketCap",
                self.other.basket_cap,
            ),
        ];
        for (threshold, threshold_value, cap, cap_value) in limits {
            if threshold_value > cap_value {
                return Err(PolicyError::ThresholdAboveCap { threshold, cap });
            }
        }
        Ok(())
    }
}

/// Inconsistency found in a loaded policy document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("rides.windowStart ({start}) must be before rides.windowEnd ({end})")]
    InvertedWindow { start: TimeOfDay, end: TimeOfDay },
    #[error("{0} must not be empty")]
    EmptyAllowList(&'static str),
    #[error("{threshold} must not exceed {cap}")]
    ThresholdAboveCap {
        threshold: &'static str,
        cap: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RidesPolicy {
    pub window_start: TimeOfDay,
    pub window_end: TimeOfDay,
    pub allowed_locations: Vec<Location>,
    pub blocked_categories: Vec<RideCategory>,
    pub basket_cap: u64,
    pub premium_threshold: u64,
    pub suggested_time: TimeOfDay,
    pub fallback_location: Location,
    pub basket_target: u64,
    pub premium_target: u64,
}

impl Default for RidesPolicy {
    fn default() -> Self {
        Self {
            window_start: TimeOfDay::at(6, 0),
            window_end: TimeOfDay::at(22, 0),
            allowed_locations: vec![Location::Kampala, Location::Entebbe],
            blocked_categories: vec![RideCategory::Luxury],
            basket_cap: 600_000,
            premium_threshold: 200_000,
            suggested_time: TimeOfDay::at(9, 0),
            fallback_location: Location::Kampala,
            basket_target: 200_000,
            premium_target: 190_000,
        }
    }
}

impl RidesPolicy {
    pub fn within_hours(&self, time: TimeOfDay) -> bool {
        time.within(self.window_start, self.window_end)
    }

    pub fn location_allowed(&self, location: Location) -> bool {
        self.allowed_locations.contains(&location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ECommercePolicy {
    pub blocked_categories: Vec<PurchaseCategory>,
    pub fallback_category: PurchaseCategory,
    /// Unapproved vendors at or below this amount need approval; above it they block.
    pub unapproved_vendor_limit: u64,
    pub rfq_amount: u64,
    pub thresholded_marketplace: Marketplace,
    pub marketplace_threshold: u64,
    pub marketplace_target: u64,
    pub fallback_marketplace: Marketplace,
    pub basket_cap: u64,
    pub split_target: u64,
}

impl Default for ECommercePolicy {
    fn default() -> Self {
        Self {
            blocked_categories: vec![PurchaseCategory::Restricted],
            fallback_category: PurchaseCategory::OfficeSupplies,
            unapproved_vendor_limit: 300_000,
            rfq_amount: 950_000,
            thresholded_marketplace: Marketplace::MyLiveDealz,
            marketplace_threshold: 1_000_000,
            marketplace_target: 990_000,
            fallback_marketplace: Marketplace::EvMart,
            basket_cap: 2_000_000,
            split_target: 1_500_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChargingPolicy {
    pub approved_stations: Vec<ChargingStation>,
    pub fallback_station: ChargingStation,
    pub basket_cap: u64,
    pub threshold: u64,
}

impl Default for ChargingPolicy {
    fn default() -> Self {
        Self {
            approved_stations: vec![ChargingStation::KampalaCbd, ChargingStation::Entebbe],
            fallback_station: ChargingStation::KampalaCbd,
            basket_cap: 300_000,
            threshold: 150_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherPolicy {
    pub basket_cap: u64,
    pub rfq_amount: u64,
    pub threshold: u64,
    pub threshold_target: u64,
}

impl Default for OtherPolicy {
    fn default() -> Self {
        Self {
            basket_cap: 1_000_000,
            rfq_amount: 950_000,
            threshold: 200_000,
            threshold_target: 190_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        PolicyConfig::default()
            .validate()
            .expect("stock policy is consistent");
    }

    #[test]
    fn partial_documents_keep_defaults() {
        let config: PolicyConfig = serde_json::from_str(
            r#"{ "rides": { "basketCap": 700000, "windowEnd": "23:00" } }"#,
        )
        .expect("parses");

        assert_eq!(config.rides.basket_cap, 700_000);
        assert_eq!(config.rides.window_end, TimeOfDay::at(23, 0));
        assert_eq!(config.rides.premium_threshold, 200_000);
        assert_eq!(config.ecommerce, ECommercePolicy::default());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut config = PolicyConfig::default();
        config.rides.window_start = TimeOfDay::at(23, 0);

        let err = config.validate().expect_err("window rejected");
        assert_eq!(
            err,
            PolicyError::InvertedWindow {
                start: TimeOfDay::at(23, 0),
                end: TimeOfDay::at(22, 0),
            }
        );
        assert!(err.to_string().starts_with("rides.windowStart (23:00)"));
    }

    #[test]
    fn threshold_above_cap_is_rejected() {
        let mut config = PolicyConfig::default();
        config.charging.threshold = 400_000;

        assert_eq!(
            config.validate(),
            Err(PolicyError::ThresholdAboveCap {
                threshold: "charging.threshold",
                cap: "charging.basketCap",
            })
        );
    }

    #[test]
    fn empty_station_list_is_rejected() {
        let mut config = PolicyConfig::default();
        config.charging.approved_stations.clear();

        assert_eq!(
            config.validate(),
            Err(PolicyError::EmptyAllowList("charging.approvedStations"))
        );
    }
}
