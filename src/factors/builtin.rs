use super::table::{FoodFactors, TransportFactors};

/// Country used when a requested code is not in the table
pub const DEFAULT_BASELINE: &str = "US";

pub(crate) struct BuiltinCountry {
    pub code: &'static str,
    pub name: &'static str,
    pub electricity: f64,
    pub transport: TransportFactors,
    pub food: FoodFactors,
}

const fn transport(car: f64, bus: f64, train: f64, plane: f64) -> TransportFactors {
    TransportFactors {
        car,
        bus,
        train,
        plane,
    }
}

const fn food(
    beef: f64,
    chicken: f64,
    pork: f64,
    fish: f64,
    vegetables: f64,
    dairy: f64,
) -> FoodFactors {
    FoodFactors {
        beef,
        chicken,
        pork,
        fish,
        vegetables,
        dairy,
    }
}

// Columns: car, bus, train, plane (kg/km); beef, chicken, pork, fish, vegetables, dairy (kg/kg)
pub(crate) const BUILTIN_COUNTRIES: [BuiltinCountry; 10] = [
    BuiltinCountry {
        code: "US",
        name: "United States",
        electricity: 0.45,
        transport: transport(0.21, 0.089, 0.041, 0.255),
        food: food(27.0, 6.9, 12.1, 6.1, 2.0, 3.2),
    },
    BuiltinCountry {
        code: "GB",
        name: "United Kingdom",
        electricity: 0.28,
        transport: transport(0.18, 0.082, 0.035, 0.255),
        food: food(25.8, 6.5, 11.8, 5.9, 1.8, 3.0),
    },
    BuiltinCountry {
        code: "DE",
        name: "Germany",
        electricity: 0.33,
        transport: transport(0.19, 0.075, 0.032, 0.255),
        food: food(26.2, 6.7, 11.9, 6.0, 1.9, 3.1),
    },
    BuiltinCountry {
        code: "FR",
        name: "France",
        // Mostly nuclear
        electricity: 0.052,
        transport: transport(0.17, 0.073, 0.029, 0.255),
        food: food(24.9, 6.3, 11.5, 5.8, 1.7, 2.9),
    },
    BuiltinCountry {
        code: "JP",
        name: "Japan",
        electricity: 0.52,
        transport: transport(0.16, 0.071, 0.027, 0.255),
        food: food(28.5, 7.2, 12.8, 5.2, 2.1, 3.4),
    },
    BuiltinCountry {
        code: "CN",
        name: "China",
        electricity: 0.68,
        transport: transport(0.22, 0.095, 0.045, 0.255),
        food: food(29.1, 7.5, 13.2, 6.8, 2.3, 3.6),
    },
    BuiltinCountry {
        code: "IN",
        name: "India",
        electricity: 0.82,
        transport: transport(0.24, 0.11, 0.052, 0.255),
        food: food(30.2, 7.8, 13.5, 7.1, 2.5, 3.8),
    },
    BuiltinCountry {
        code: "AU",
        name: "Australia",
        electricity: 0.79,
        transport: transport(0.23, 0.098, 0.047, 0.255),
        food: food(31.5, 8.1, 14.2, 6.5, 2.2, 3.5),
    },
    BuiltinCountry {
        code: "CA",
        name: "Canada",
        // Mostly hydro
        electricity: 0.12,
        transport: transport(0.20, 0.085, 0.038, 0.255),
        food: food(26.8, 6.8, 12.3, 5.7, 1.9, 3.1),
    },
    BuiltinCountry {
        code: "BR",
        name: "Brazil",
        electricity: 0.074,
        transport: transport(0.21, 0.092, 0.043, 0.255),
        food: food(32.1, 7.9, 13.8, 6.9, 2.4, 3.7),
    },
];
