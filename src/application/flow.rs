//! The linear order screen flow.
//!
//! Screens move `Start -> SelectFlavor -> SelectPickupDate -> Summary`.
//! [`transition`] is the whole table; [`OrderFlow`] applies it while keeping
//! the order store in step (resetting it on cancel and completion).

use super::order::{OrderState, OrderStore};
use crate::domain::{OrderError, OrderSummary};
use thiserror::Error;
use tracing::{debug, info};

/// One screen of the ordering wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Choose how many cupcakes
    Start,
    SelectFlavor,
    SelectPickupDate,
    /// Review and send the order
    Summary,
}

impl Screen {
    pub const COUNT: usize = 4;

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Start => "Order Cupcakes",
            Screen::SelectFlavor => "Choose Flavor",
            Screen::SelectPickupDate => "Choose Pickup Date",
            Screen::Summary => "Order Summary",
        }
    }

    /// One-based position in the flow.
    pub fn step(&self) -> usize {
        match self {
            Screen::Start => 1,
            Screen::SelectFlavor => 2,
            Screen::SelectPickupDate => 3,
            Screen::Summary => 4,
        }
    }
}

/// Something the user did that may move the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    QuantityChosen,
    FlavorChosen,
    DateChosen,
    Back,
    Cancel,
    Complete,
}

/// The screen reached from `screen` on `event`, or `None` if `event` does
/// not apply there.
///
/// # Examples
///
/// ```
/// use cupcake::application::{transition, FlowEvent, Screen};
///
/// assert_eq!(transition(Screen::Start, FlowEvent::QuantityChosen), Some(Screen::SelectFlavor));
/// assert_eq!(transition(Screen::Start, FlowEvent::Cancel), None);
/// ```
pub fn transition(screen: Screen, event: FlowEvent) -> Option<Screen> {
    use FlowEvent as E;
    use Screen as S;

    match (screen, event) {
        (S::Start, E::QuantityChosen) => Some(S::SelectFlavor),
        (S::SelectFlavor, E::FlavorChosen) => Some(S::SelectPickupDate),
        (S::SelectPickupDate, E::DateChosen) => Some(S::Summary),
        (S::SelectFlavor, E::Back) => Some(S::Start),
        (S::SelectPickupDate, E::Back) => Some(S::SelectFlavor),
        (S::Summary, E::Back) => Some(S::SelectPickupDate),
        (S::SelectFlavor | S::SelectPickupDate | S::Summary, E::Cancel) => Some(S::Start),
        (S::Summary, E::Complete) => Some(S::Start),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{} needs a selection before continuing", .0.title())]
    SelectionRequired(Screen),
    #[error("{event:?} is not possible from {}", .screen.title())]
    InvalidTransition { screen: Screen, event: FlowEvent },
    #[error(transparent)]
    Order(#[from] OrderError),
}

pub type FlowResult<T> = Result<T, FlowError>;

/// Drives the order store through the screen flow.
#[derive(Debug)]
pub struct OrderFlow {
    store: OrderStore,
    screen: Screen,
}

impl OrderFlow {
    pub fn new(store: OrderStore) -> Self {
        Self {
            store,
            screen: Screen::Start,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn order(&self) -> &OrderState {
        self.store.state()
    }

    /// Whether the current screen's required field is filled in.
    pub fn can_advance(&self) -> bool {
        let order = self.store.state();
        match self.screen {
            Screen::Start => order.has_quantity(),
            Screen::SelectFlavor => order.flavor.is_some(),
            Screen::SelectPickupDate => order.pickup_date.is_some(),
            Screen::Summary => true,
        }
    }

    /// Picks a quantity on the start screen and moves on to flavors.
    pub fn choose_quantity(&mut self, quantity: u32) -> FlowResult<Screen> {
        self.expect_screen(Screen::Start, FlowEvent::QuantityChosen)?;
        self.store.set_quantity(quantity)?;
        info!(quantity, "quantity chosen");
        self.fire(FlowEvent::QuantityChosen)
    }

    pub fn select_flavor(&mut self, flavor: &str) -> FlowResult<()> {
        self.expect_screen(Screen::SelectFlavor, FlowEvent::FlavorChosen)?;
        self.store.set_flavor(flavor)?;
        debug!(flavor, price = %self.store.state().price, "flavor selected");
        Ok(())
    }

    pub fn select_pickup_date(&mut self, date: &str) -> FlowResult<()> {
        self.expect_screen(Screen::SelectPickupDate, FlowEvent::DateChosen)?;
        self.store.set_pickup_date(date)?;
        debug!(date, price = %self.store.state().price, "pickup date selected");
        Ok(())
    }

    /// Advances past the current screen once its selection is made.
    ///
    /// On the summary screen this completes the order; use [`OrderFlow::complete`]
    /// to also get the summary back.
    pub fn next(&mut self) -> FlowResult<Screen> {
        if !self.can_advance() {
            return Err(FlowError::SelectionRequired(self.screen));
        }
        match self.screen {
            Screen::Start => self.fire(FlowEvent::QuantityChosen),
            Screen::SelectFlavor => self.fire(FlowEvent::FlavorChosen),
            Screen::SelectPickupDate => self.fire(FlowEvent::DateChosen),
            Screen::Summary => self.complete().map(|_| self.screen),
        }
    }

    /// Goes up one screen, keeping the order as it is.
    pub fn back(&mut self) -> FlowResult<Screen> {
        self.fire(FlowEvent::Back)
    }

    /// Abandons the order and returns to the start screen. Does nothing on
    /// the start screen itself.
    pub fn cancel(&mut self) -> Screen {
        if self.fire(FlowEvent::Cancel).is_ok() {
            self.store.reset_order();
            info!("order cancelled");
        }
        self.screen
    }

    /// Finishes the order from the summary screen, returning what was
    /// ordered. The store is reset for the next session.
    pub fn complete(&mut self) -> FlowResult<OrderSummary> {
        self.expect_screen(Screen::Summary, FlowEvent::Complete)?;
        let summary = self
            .store
            .summary()
            .ok_or(FlowError::SelectionRequired(Screen::Summary))?;
        self.fire(FlowEvent::Complete)?;
        self.store.reset_order();
        info!(
            quantity = summary.quantity,
            flavor = %summary.flavor,
            pickup_date = %summary.pickup_date,
            price = %summary.price,
            "order completed"
        );
        Ok(summary)
    }

    /// The order as it stands, if complete enough to summarize.
    pub fn summary(&self) -> Option<OrderSummary> {
        self.store.summary()
    }

    fn expect_screen(&self, screen: Screen, event: FlowEvent) -> FlowResult<()> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                screen: self.screen,
                event,
            })
        }
    }

    fn fire(&mut self, event: FlowEvent) -> FlowResult<Screen> {
        let next = transition(self.screen, event).ok_or(FlowError::InvalidTransition {
            screen: self.screen,
            event,
        })?;
        debug!(from = ?self.screen, to = ?next, ?event, "screen transition");
        self.screen = next;
        Ok(next)
    }
}
