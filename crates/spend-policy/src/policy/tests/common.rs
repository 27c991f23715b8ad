use axum::response::Response;
use serde_json::Value;

use crate::policy::domain::{
    ChargingStation, Location, Marketplace, PaymentMethod, PurchaseCategory, RideCategory,
    Scenario, SpendModule, TimeOfDay,
};
use crate::policy::validate::ScenarioPayload;
use crate::policy::{PolicyConfig, PolicyEngine};

pub(super) fn engine() -> PolicyEngine {
    PolicyEngine::new(PolicyConfig::default())
}

pub(super) fn clock(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).expect("valid clock time")
}

pub(super) fn ride(amount: u64, category: RideCategory) -> Scenario {
    Scenario {
        module: SpendModule::RidesAndLogistics,
        payment: PaymentMethod::CorporatePay,
        amount,
        time_of_day: clock(9, 30),
        location: Location::Kampala,
        ride_category: category,
        marketplace: Marketplace::MyLiveDealz,
        vendor_approved: true,
        category: PurchaseCategory::OfficeSupplies,
        station: ChargingStation::KampalaCbd,
    }
}

pub(super) fn purchase(amount: u64, marketplace: Marketplace, vendor_approved: bool) -> Scenario {
    Scenario {
        module: SpendModule::ECommerce,
        marketplace,
        vendor_approved,
        ..ride(amount, RideCategory::Standard)
    }
}

pub(super) fn charging(amount: u64, station: ChargingStation) -> Scenario {
    Scenario {
        module: SpendModule::EvCharging,
        station,
        ..ride(amount, RideCategory::Standard)
    }
}

pub(super) fn other(amount: u64) -> Scenario {
    Scenario {
        module: SpendModule::Other,
        ..ride(amount, RideCategory::Standard)
    }
}

/// Reference scenario: a modest Standard ride inside hours in Kampala.
pub(super) fn scenario_a() -> Scenario {
    ride(160_000, RideCategory::Standard)
}

/// Reference scenario: a large MyLiveDealz basket from an unapproved vendor.
pub(super) fn scenario_b() -> Scenario {
    purchase(1_250_000, Marketplace::MyLiveDealz, false)
}

pub(super) fn payload(scenario: &Scenario) -> ScenarioPayload {
    ScenarioPayload::from(scenario)
}

pub(super) const MODULES: [SpendModule; 4] = [
    SpendModule::RidesAndLogistics,
    SpendModule::ECommerce,
    SpendModule::EvCharging,
    SpendModule::Other,
];

pub(super) const LOCATIONS: [Location; 4] = [
    Location::Kampala,
    Location::Entebbe,
    Location::Jinja,
    Location::Other,
];

pub(super) const RIDE_CATEGORIES: [RideCategory; 3] = [
    RideCategory::Standard,
    RideCategory::Premium,
    RideCategory::Luxury,
];

pub(super) const MARKETPLACES: [Marketplace; 4] = [
    Marketplace::MyLiveDealz,
    Marketplace::EvMart,
    Marketplace::ServiceMart,
    Marketplace::Other,
];

pub(super) const CATEGORIES: [PurchaseCategory; 6] = [
    PurchaseCategory::OfficeSupplies,
    PurchaseCategory::Electronics,
    PurchaseCategory::Vehicles,
    PurchaseCategory::Catering,
    PurchaseCategory::Medical,
    PurchaseCategory::Restricted,
];

pub(super) const STATIONS: [ChargingStation; 3] = [
    ChargingStation::KampalaCbd,
    ChargingStation::Entebbe,
    ChargingStation::Other,
];

pub(super) const AMOUNTS: [u64; 12] = [
    0, 150_000, 150_001, 190_000, 200_000, 200_001, 300_000, 300_001, 600_001, 1_000_001,
    2_000_000, 2_000_001,
];

/// Every combination of module, location, time band, and module-specific field.
pub(super) fn scenario_grid(payment: PaymentMethod) -> Vec<Scenario> {
    let times = [clock(5, 59), clock(6, 0), clock(13, 15), clock(22, 0), clock(23, 30)];
    let mut grid = Vec::new();
    for module in MODULES {
        for location in LOCATIONS {
            for time in times {
                for amount in AMOUNTS {
                    let base = Scenario {
                        module,
                        payment,
                        amount,
                        time_of_day: time,
                        location,
                        ..ride(amount, RideCategory::Standard)
                    };
                    match module {
                        SpendModule::RidesAndLogistics => {
                            for category in RIDE_CATEGORIES {
                                grid.push(base.with_ride_category(category));
                            }
                        }
                        SpendModule::ECommerce => {
                            for marketplace in MARKETPLACES {
                                for category in CATEGORIES {
                                    for approved in [true, false] {
                                        grid.push(
                                            base.with_marketplace(marketplace)
                                                .with_category(category)
                                                .with_vendor_approved(approved),
                                        );
                                    }
                                }
                            }
                        }
                        SpendModule::EvCharging => {
                            for station in STATIONS {
                                grid.push(base.with_station(station));
                            }
                        }
                        SpendModule::Other => grid.push(base),
                    }
                }
            }
        }
    }
    grid
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
