//! Application state for the terminal ordering wizard.
//!
//! This module contains the session state the UI renders from: the order
//! flow, which option is highlighted, the help popup and status messages.

use super::flow::{OrderFlow, Screen};
use super::order::OrderStore;
use crate::domain::{Catalog, Clock, OrderSummary};
use crate::infrastructure::ShareTarget;
use tracing::{info, warn};

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Ordering - keys drive the current screen
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cupcake::application::{App, Screen};
/// use cupcake::domain::{Catalog, FixedClock};
/// use cupcake::infrastructure::FileShare;
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2021, 7, 21).unwrap());
/// let app = App::new(Catalog::default(), Box::new(clock), Box::new(FileShare::new("orders.txt")));
/// assert_eq!(app.screen(), Screen::Start);
/// assert_eq!(app.cursor, 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// The order being built and the screen it is on
    pub flow: OrderFlow,
    /// Current application mode
    pub mode: AppMode,
    /// Highlighted option on the current screen (zero-based)
    pub cursor: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    share_target: Box<dyn ShareTarget>,
}

impl App {
    pub fn new(catalog: Catalog, clock: Box<dyn Clock>, share_target: Box<dyn ShareTarget>) -> Self {
        Self {
            flow: OrderFlow::new(OrderStore::new(catalog, clock)),
            mode: AppMode::Normal,
            cursor: 0,
            help_scroll: 0,
            status_message: None,
            share_target,
        }
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    /// Labels of the choices offered on the current screen.
    pub fn options(&self) -> Vec<String> {
        let store = self.flow.store();
        match self.screen() {
            Screen::Start => store
                .catalog()
                .quantity_options
                .iter()
                .map(|option| option.label.clone())
                .collect(),
            Screen::SelectFlavor => store.catalog().flavors.clone(),
            Screen::SelectPickupDate => store.pickup_options().as_slice().to_vec(),
            Screen::Summary => Vec::new(),
        }
    }

    /// Index of the option currently chosen in the order, if any.
    pub fn selected_index(&self) -> Option<usize> {
        let store = self.flow.store();
        let order = store.state();
        match self.screen() {
            Screen::Start => store.catalog().quantity_index(order.quantity),
            Screen::SelectFlavor => order
                .flavor
                .as_deref()
                .and_then(|flavor| store.catalog().flavor_index(flavor)),
            Screen::SelectPickupDate => order
                .pickup_date
                .as_deref()
                .and_then(|date| store.pickup_options().position(date)),
            Screen::Summary => None,
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.options().len() {
            self.cursor += 1;
        }
    }

    /// Acts on the highlighted option: chooses a quantity (and advances) on
    /// the start screen, otherwise selects the flavor or date.
    pub fn select_highlighted(&mut self) {
        self.status_message = None;
        let highlighted = self.options().get(self.cursor).cloned();
        let result = match (self.screen(), highlighted) {
            (Screen::Start, Some(_)) => {
                let count = self
                    .flow
                    .store()
                    .catalog()
                    .quantity_options
                    .get(self.cursor)
                    .map(|option| option.count);
                match count {
                    Some(count) => self.flow.choose_quantity(count).map(|_| ()),
                    None => Ok(()),
                }
            }
            (Screen::SelectFlavor, Some(flavor)) => self.flow.select_flavor(&flavor),
            (Screen::SelectPickupDate, Some(date)) => self.flow.select_pickup_date(&date),
            _ => Ok(()),
        };

        match result {
            Ok(()) => self.sync_cursor(),
            Err(error) => {
                warn!(%error, "selection rejected");
                self.status_message = Some(error.to_string());
            }
        }
    }

    /// The "Next" button.
    pub fn next(&mut self) {
        self.status_message = None;
        if self.screen() == Screen::Summary {
            self.send_order();
            return;
        }
        match self.flow.next() {
            Ok(_) => self.sync_cursor(),
            Err(error) => self.status_message = Some(error.to_string()),
        }
    }

    /// Navigates up one screen.
    pub fn back(&mut self) {
        self.status_message = None;
        if self.flow.back().is_ok() {
            self.sync_cursor();
        }
    }

    /// The "Cancel" button.
    pub fn cancel(&mut self) {
        if self.screen() == Screen::Start {
            return;
        }
        self.flow.cancel();
        self.cursor = 0;
        self.status_message = Some("Order cancelled".to_string());
    }

    /// Shares the order and, once it has been handed off, completes it.
    ///
    /// A failed share leaves the order on the summary screen.
    pub fn send_order(&mut self) {
        if self.screen() != Screen::Summary {
            return;
        }
        let Some(summary) = self.flow.summary() else {
            return;
        };

        match self.share_target.share(OrderSummary::SUBJECT, &summary.body()) {
            Ok(()) => {
                let destination = self.share_target.describe();
                info!(%destination, "order shared");
                if let Err(error) = self.flow.complete() {
                    warn!(%error, "order shared but could not be completed");
                }
                self.cursor = 0;
                self.status_message = Some(format!("Order sent to {}", destination));
            }
            Err(error) => {
                warn!(%error, "order share failed");
                self.status_message = Some(format!("Could not send order: {}", error));
            }
        }
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Puts the highlight on the current selection, or the first option.
    fn sync_cursor(&mut self) {
        self.cursor = self.selected_index().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, Price};
    use crate::infrastructure::ShareError;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct RecordingShare {
        sent: Rc<RefCell<Vec<(String, String)>>>,
        fail: bool,
    }

    impl ShareTarget for RecordingShare {
        fn share(&mut self, subject: &str, body: &str) -> Result<(), ShareError> {
            if self.fail {
                return Err(ShareError::Io {
                    path: "orders.txt".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.sent.borrow_mut().push((subject.to_string(), body.to_string()));
            Ok(())
        }

        fn describe(&self) -> String {
            "recorder".to_string()
        }
    }

    fn app_with(share: RecordingShare) -> App {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2021, 7, 21).unwrap());
        App::new(Catalog::default(), Box::new(clock), Box::new(share))
    }

    fn app() -> App {
        app_with(RecordingShare::default())
    }

    fn drive_to_summary(app: &mut App) {
        app.cursor = 1;
        app.select_highlighted();
        app.select_highlighted();
        app.next();
        app.select_highlighted();
        app.next();
    }

    #[test]
    fn test_app_default_state() {
        let app = app();
        assert_eq!(app.screen(), Screen::Start);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.help_scroll, 0);
        assert!(app.status_message.is_none());
        assert_eq!(
            app.options(),
            vec!["One cupcake", "Six cupcakes", "Twelve cupcakes"]
        );
    }

    #[test]
    fn test_select_with_cursor_past_options_is_noop() {
        let mut app = app();
        app.cursor = 7;
        app.select_highlighted();
        assert_eq!(app.screen(), Screen::Start);
        assert!(!app.flow.order().has_quantity());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut app = app();
        app.move_cursor_up();
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            app.move_cursor_down();
        }
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_choosing_quantity_advances() {
        let mut app = app();
        app.move_cursor_down();
        app.select_highlighted();
        assert_eq!(app.screen(), Screen::SelectFlavor);
        assert_eq!(app.flow.order().quantity, 6);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.options().len(), 5);
    }

    #[test]
    fn test_next_requires_selection() {
        let mut app = app();
        app.select_highlighted();
        app.next();
        assert_eq!(app.screen(), Screen::SelectFlavor);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Choose Flavor needs a selection before continuing")
        );

        app.move_cursor_down();
        app.select_highlighted();
        assert!(app.status_message.is_none());
        assert_eq!(app.flow.order().flavor.as_deref(), Some("Chocolate"));
        app.next();
        assert_eq!(app.screen(), Screen::SelectPickupDate);
    }

    #[test]
    fn test_back_restores_highlight() {
        let mut app = app();
        drive_to_summary(&mut app);
        assert_eq!(app.screen(), Screen::Summary);

        app.back();
        assert_eq!(app.screen(), Screen::SelectPickupDate);
        assert_eq!(app.cursor, 0);

        app.back();
        assert_eq!(app.screen(), Screen::SelectFlavor);
        assert_eq!(app.cursor, 0);

        app.back();
        assert_eq!(app.screen(), Screen::Start);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_send_order_shares_and_resets() {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let mut app = app_with(RecordingShare {
            sent: Rc::clone(&sent),
            fail: false,
        });
        drive_to_summary(&mut app);
        assert_eq!(app.flow.order().price, Price(15));

        app.send_order();

        assert_eq!(app.screen(), Screen::Start);
        assert!(app.flow.order().flavor.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Order sent to recorder"));
        let sent = sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "New Cupcake Order");
        assert_eq!(
            sent[0].1,
            "Quantity: 6 cupcakes\nFlavor: Vanilla\nPickup date: Wed Jul 21\nTotal: $15\n\nThank you!"
        );
    }

    #[test]
    fn test_failed_share_keeps_summary() {
        let mut app = app_with(RecordingShare {
            sent: Rc::default(),
            fail: true,
        });
        drive_to_summary(&mut app);
        app.next();

        assert_eq!(app.screen(), Screen::Summary);
        assert_eq!(app.flow.order().flavor.as_deref(), Some("Vanilla"));
        assert!(
            app.status_message
                .as_deref()
                .unwrap()
                .starts_with("Could not send order:")
        );
    }

    #[test]
    fn test_send_outside_summary_does_nothing() {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let mut app = app_with(RecordingShare {
            sent: Rc::clone(&sent),
            fail: false,
        });
        app.select_highlighted();
        app.send_order();
        assert_eq!(app.screen(), Screen::SelectFlavor);
        assert!(sent.borrow().is_empty());
    }

    #[test]
    fn test_cancel_resets_order() {
        let mut app = app();
        drive_to_summary(&mut app);
        app.cancel();
        assert_eq!(app.screen(), Screen::Start);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.flow.order().quantity, 0);
        assert_eq!(app.status_message.as_deref(), Some("Order cancelled"));
    }

    #[test]
    fn test_cancel_on_start_is_silent() {
        let mut app = app();
        app.cancel();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_help_mode_transitions() {
        let mut app = app();
        app.help_scroll = 3;
        app.show_help();
        assert_eq!(app.mode, AppMode::Help);
        assert_eq!(app.help_scroll, 0);
        app.close_help();
        assert_eq!(app.mode, AppMode::Normal);
    }
}
