//! Order pricing.

use super::models::{Price, PricingRules};
use super::pickup::PickupOptions;

/// Prices an order from its quantity, flavor and pickup date.
///
/// The flavor is part of the input but every flavor costs the same.
/// A pickup on the earliest offered date adds the same-day surcharge;
/// an order without a date yet carries no surcharge.
///
/// # Examples
///
/// ```
/// use cupcake::domain::{PickupOptions, PickupSchedule, Price, PricingCalculator, PricingRules};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2021, 7, 21).unwrap();
/// let options = PickupOptions::generate(start, &PickupSchedule::default());
/// let calculator = PricingCalculator::new(PricingRules::default());
///
/// assert_eq!(calculator.price(6, Some("Vanilla"), Some("Wed Jul 21"), &options), Price(15));
/// assert_eq!(calculator.price(6, Some("Vanilla"), Some("Thu Jul 22"), &options), Price(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PricingCalculator {
    rules: PricingRules,
}

impl PricingCalculator {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    pub fn price(
        &self,
        quantity: u32,
        _flavor: Option<&str>,
        pickup_date: Option<&str>,
        pickup_options: &PickupOptions,
    ) -> Price {
        let mut total = quantity.saturating_mul(self.rules.unit_price);
        if pickup_date.is_some_and(|date| pickup_options.is_same_day(date)) {
            total = total.saturating_add(self.rules.same_day_surcharge);
        }
        Price(total)
    }
}
