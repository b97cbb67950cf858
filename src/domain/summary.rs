use super::models::Price;

/// Human-readable description of a finished order, handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub quantity: u32,
    pub flavor: String,
    pub pickup_date: String,
    pub price: Price,
}

impl OrderSummary {
    pub const SUBJECT: &'static str = "New Cupcake Order";

    /// "1 cupcake", "6 cupcakes".
    pub fn quantity_text(&self) -> String {
        quantity_text(self.quantity)
    }

    /// # Examples
    ///
    /// ```
    /// use cupcake::domain::{OrderSummary, Price};
    ///
    /// let summary = OrderSummary {
    ///     quantity: 6,
    ///     flavor: "Vanilla".to_string(),
    ///     pickup_date: "Wed Jul 21".to_string(),
    ///     price: Price(15),
    /// };
    /// assert!(summary.body().starts_with("Quantity: 6 cupcakes\n"));
    /// ```
    pub fn body(&self) -> String {
        format!(
            "Quantity: {}\nFlavor: {}\nPickup date: {}\nTotal: {}\n\nThank you!",
            self.quantity_text(),
            self.flavor,
            self.pickup_date,
            self.price
        )
    }
}

pub fn quantity_text(quantity: u32) -> String {
    if quantity == 1 {
        "1 cupcake".to_string()
    } else {
        format!("{} cupcakes", quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_layout() {
        let summary = OrderSummary {
            quantity: 12,
            flavor: "Mango".to_string(),
            pickup_date: "Fri Jul 23".to_string(),
            price: Price(24),
        };
        assert_eq!(
            summary.body(),
            "Quantity: 12 cupcakes\nFlavor: Mango\nPickup date: Fri Jul 23\nTotal: $24\n\nThank you!"
        );
    }

    #[test]
    fn test_quantity_text_singular() {
        assert_eq!(quantity_text(1), "1 cupcake");
        assert_eq!(quantity_text(6), "6 cupcakes");
    }
}
