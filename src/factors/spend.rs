use crate::activity::ShoppingType;

/// kg CO2 per currency unit spent, in [`ShoppingType::ALL`] order
pub const SPEND_FACTORS: [(ShoppingType, f64); 3] = [
    (ShoppingType::Electronics, 0.5),
    (ShoppingType::Clothing, 0.3),
    (ShoppingType::Books, 0.1),
];

pub fn spend_factor(item: ShoppingType) -> f64 {
    match item {
        ShoppingType::Electronics => SPEND_FACTORS[0].1,
        ShoppingType::Clothing => SPEND_FACTORS[1].1,
        ShoppingType::Books => SPEND_FACTORS[2].1,
    }
}

/// Emission of a purchase: amount spent times the item's spend factor.
/// Spend factors do not vary by country.
pub fn spend_emission(item: ShoppingType, spent: f64) -> f64 {
    spent * spend_factor(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_factors_follow_all_order() {
        for (i, item) in ShoppingType::ALL.into_iter().enumerate() {
            assert_eq!(SPEND_FACTORS[i].0, item);
            assert_eq!(spend_factor(item), SPEND_FACTORS[i].1);
        }
    }

    #[test]
    fn test_spend_emission() {
        assert!((spend_emission(ShoppingType::Electronics, 89.99) - 44.995).abs() < 1e-9);
        assert!((spend_emission(ShoppingType::Books, 25.0) - 2.5).abs() < 1e-9);
        assert_eq!(spend_emission(ShoppingType::Clothing, 0.0), 0.0);
    }
}
