//! The order state holder.
//!
//! `OrderStore` owns the order being built during a session together with
//! the catalog it is validated against and the pickup dates offered for
//! the session. Every setter builds the complete next state, price
//! included, before swapping it in.

use crate::domain::{
    Catalog, Clock, OrderError, OrderResult, OrderSummary, PickupOptions, Price, PricingCalculator,
};

/// Snapshot of the order being built.
///
/// `quantity == 0`, `flavor == None` and `pickup_date == None` mean
/// "not yet selected".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderState {
    pub quantity: u32,
    pub flavor: Option<String>,
    pub pickup_date: Option<String>,
    pub price: Price,
}

impl OrderState {
    pub fn has_quantity(&self) -> bool {
        self.quantity > 0
    }
}

/// Single-writer holder of the current order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cupcake::application::OrderStore;
/// use cupcake::domain::{Catalog, FixedClock, Price};
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2021, 7, 21).unwrap());
/// let mut store = OrderStore::new(Catalog::default(), Box::new(clock));
///
/// store.set_quantity(6).unwrap();
/// store.set_flavor("Vanilla").unwrap();
/// store.set_pickup_date("Wed Jul 21").unwrap();
/// assert_eq!(store.state().price, Price(15));
/// ```
#[derive(Debug)]
pub struct OrderStore {
    catalog: Catalog,
    pricing: PricingCalculator,
    clock: Box<dyn Clock>,
    pickup_options: PickupOptions,
    state: OrderState,
}

impl OrderStore {
    pub fn new(catalog: Catalog, clock: Box<dyn Clock>) -> Self {
        let pickup_options = PickupOptions::generate(clock.today(), &catalog.pickup);
        let pricing = PricingCalculator::new(catalog.pricing.clone());
        Self {
            catalog,
            pricing,
            clock,
            pickup_options,
            state: OrderState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pickup_options(&self) -> &PickupOptions {
        &self.pickup_options
    }

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    /// Owned copy of the current order.
    pub fn snapshot(&self) -> OrderState {
        self.state.clone()
    }

    pub fn set_quantity(&mut self, quantity: u32) -> OrderResult<()> {
        if !self.catalog.offers_quantity(quantity) {
            return Err(OrderError::UnknownQuantity(quantity));
        }
        let next = OrderState {
            quantity,
            ..self.state.clone()
        };
        self.commit(next);
        Ok(())
    }

    pub fn set_flavor(&mut self, flavor: &str) -> OrderResult<()> {
        if !self.catalog.offers_flavor(flavor) {
            return Err(OrderError::UnknownFlavor(flavor.to_string()));
        }
        let next = OrderState {
            flavor: Some(flavor.to_string()),
            ..self.state.clone()
        };
        self.commit(next);
        Ok(())
    }

    pub fn set_pickup_date(&mut self, date: &str) -> OrderResult<()> {
        if !self.pickup_options.contains(date) {
            return Err(OrderError::UnknownPickupDate(date.to_string()));
        }
        let next = OrderState {
            pickup_date: Some(date.to_string()),
            ..self.state.clone()
        };
        self.commit(next);
        Ok(())
    }

    /// Starts a fresh session: default order, pickup dates regenerated from today.
    pub fn reset_order(&mut self) {
        self.pickup_options = PickupOptions::generate(self.clock.today(), &self.catalog.pickup);
        self.state = OrderState::default();
    }

    /// The finished order, if quantity, flavor and pickup date are all chosen.
    pub fn summary(&self) -> Option<OrderSummary> {
        if !self.state.has_quantity() {
            return None;
        }
        Some(OrderSummary {
            quantity: self.state.quantity,
            flavor: self.state.flavor.clone()?,
            pickup_date: self.state.pickup_date.clone()?,
            price: self.state.price,
        })
    }

    fn commit(&mut self, mut next: OrderState) {
        next.price = self.pricing.price(
            next.quantity,
            next.flavor.as_deref(),
            next.pickup_date.as_deref(),
            &self.pickup_options,
        );
        self.state = next;
    }
}
