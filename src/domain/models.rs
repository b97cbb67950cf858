use serde::{Deserialize, Serialize};
use std::fmt;

/// A quantity button on the start screen: what it says and how many cupcakes it orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityOption {
    pub label: String,
    pub count: u32,
}

impl QuantityOption {
    pub fn new(label: &str, count: u32) -> Self {
        Self {
            label: label.to_string(),
            count,
        }
    }
}

/// A whole-dollar amount.
///
/// # Examples
///
/// ```
/// use cupcake::domain::Price;
///
/// assert_eq!(Price(15).to_string(), "$15");
/// assert_eq!(Price::default().to_string(), "$0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Price(pub u32);

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Price of a single cupcake, in dollars
    pub unit_price: u32,
    /// Flat fee added when the order is picked up on the first offered date
    pub same_day_surcharge: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            unit_price: 2,
            same_day_surcharge: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupSchedule {
    /// Number of consecutive days offered, starting today
    pub days: u32,
    /// strftime pattern used to label each date
    pub date_format: String,
}

impl Default for PickupSchedule {
    fn default() -> Self {
        Self {
            days: 4,
            date_format: "%a %b %-d".to_string(),
        }
    }
}

/// Everything the shop offers: the closed option sets and the pricing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub quantity_options: Vec<QuantityOption>,
    pub flavors: Vec<String>,
    pub pricing: PricingRules,
    pub pickup: PickupSchedule,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            quantity_options: vec![
                QuantityOption::new("One cupcake", 1),
                QuantityOption::new("Six cupcakes", 6),
                QuantityOption::new("Twelve cupcakes", 12),
            ],
            flavors: ["Vanilla", "Chocolate", "Hazelnut", "Cookie", "Mango"]
                .iter()
                .map(|flavor| flavor.to_string())
                .collect(),
            pricing: PricingRules::default(),
            pickup: PickupSchedule::default(),
        }
    }
}

impl Catalog {
    pub fn offers_quantity(&self, count: u32) -> bool {
        self.quantity_options.iter().any(|option| option.count == count)
    }

    pub fn offers_flavor(&self, flavor: &str) -> bool {
        self.flavors.iter().any(|f| f == flavor)
    }

    pub fn quantity_index(&self, count: u32) -> Option<usize> {
        self.quantity_options.iter().position(|option| option.count == count)
    }

    pub fn flavor_index(&self, flavor: &str) -> Option<usize> {
        self.flavors.iter().position(|f| f == flavor)
    }
}
