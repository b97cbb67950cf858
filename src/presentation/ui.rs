use crate::application::{App, AppMode, Screen};
use crate::domain::quantity_text;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const NEXT_BUTTON: &str = "[ Next ]";
const CANCEL_BUTTON: &str = "[ Cancel ]";
const SEND_BUTTON: &str = "[ Send ]";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen() {
        Screen::Start => render_start(f, app, chunks[1]),
        Screen::SelectFlavor | Screen::SelectPickupDate => render_select_option(f, app, chunks[1]),
        Screen::Summary => render_summary(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();
    let header = Paragraph::new(format!(
        "cupcake - {} | Step {} of {}",
        screen.title(),
        screen.step(),
        Screen::COUNT
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::LightBlue).fg(Color::Black)
    } else {
        Style::default()
    }
}

fn body_block(screen: Screen) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(screen.title())
}

fn render_start(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from("Order cupcakes, pick a quantity:"),
        Line::from(""),
    ];
    for (index, label) in app.options().into_iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("[ {} ]", label),
            highlight(index == app.cursor),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(body_block(app.screen())), area);
}

fn render_select_option(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.selected_index();
    let mut lines = Vec::new();

    for (index, option) in app.options().into_iter().enumerate() {
        let marker = if selected == Some(index) { "(*)" } else { "( )" };
        lines.push(Line::from(Span::styled(
            format!("{} {}", marker, option),
            highlight(index == app.cursor),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Subtotal {}", app.flow.order().price),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let next_style = if app.flow.can_advance() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(vec![
        Span::raw(CANCEL_BUTTON),
        Span::raw("  "),
        Span::styled(NEXT_BUTTON, next_style),
    ]));

    f.render_widget(Paragraph::new(lines).block(body_block(app.screen())), area);
}

fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let order = app.flow.order();
    let label = Style::default().fg(Color::Yellow);
    let lines = vec![
        Line::from(Span::styled("QUANTITY", label)),
        Line::from(quantity_text(order.quantity)),
        Line::from(""),
        Line::from(Span::styled("FLAVOR", label)),
        Line::from(order.flavor.clone().unwrap_or_default()),
        Line::from(""),
        Line::from(Span::styled("PICKUP DATE", label)),
        Line::from(order.pickup_date.clone().unwrap_or_default()),
        Line::from(""),
        Line::from(Span::styled(
            format!("Subtotal {}", order.price),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(SEND_BUTTON, Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::raw(CANCEL_BUTTON),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(body_block(app.screen())), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Help => "Up/Down: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Normal => match app.status_message {
            Some(ref status) => status.clone(),
            None => key_hints(app.screen()).to_string(),
        },
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Start => "Up/Down: choose | Enter: order | ?: help | q: quit",
        Screen::SelectFlavor | Screen::SelectPickupDate => {
            "Up/Down: move | Space: select | Enter: next | Left: back | Esc: cancel | ?: help"
        }
        Screen::Summary => "s/Enter/Right: send order | Left: back | Esc: cancel | ?: help | q: quit",
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("cupcake help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Number of lines in the help text, for clamping scroll.
pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"ORDERING CUPCAKES

=== STEPS ===
1. Order Cupcakes       Pick how many cupcakes you want
2. Choose Flavor        Pick one flavor for the whole order
3. Choose Pickup Date   Pick a day; today costs a same-day surcharge
4. Order Summary        Check the order and send it

=== KEYS ===
Up/Down or k/j  Move the highlight
Space           Select the highlighted option
Enter           Start: order the highlighted quantity
                Flavor/date: continue to the next step
                Summary: send the order
Right or n      Continue to the next step (sends on the summary)
Left, b, Bksp   Go back one step (the order is kept)
Esc or c        Cancel the order and start over
s               Send the order (summary screen)
F1 or ?         Show this help
q               Quit

=== PRICING ===
Every cupcake costs the same regardless of flavor.
Picking up on the first offered date adds a flat surcharge.
The subtotal is shown while you choose.

=== SENDING ===
Sending copies the order to the clipboard, or appends it to the
file given with --share-file. The order then starts over.

=== HELP NAVIGATION ===
Up/Down or j/k  Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, FixedClock};
    use crate::infrastructure::FileShare;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn app() -> App {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2021, 7, 21).unwrap());
        App::new(
            Catalog::default(),
            Box::new(clock),
            Box::new(FileShare::new("orders.txt")),
        )
    }

    fn render(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn assert_displayed(buffer: &Buffer, text: &str) {
        assert!(
            rows(buffer).iter().any(|row| row.contains(text)),
            "`{}` not on screen:\n{}",
            text,
            rows(buffer).join("\n")
        );
    }

    fn next_button_color(buffer: &Buffer) -> Color {
        let rows = rows(buffer);
        let (y, x) = rows
            .iter()
            .enumerate()
            .find_map(|(y, row)| row.find(NEXT_BUTTON).map(|x| (y, row[..x].chars().count())))
            .expect("next button rendered");
        buffer[(x as u16 + 2, y as u16)].fg
    }

    #[test]
    fn test_start_screen_shows_every_quantity() {
        let app = app();
        let buffer = render(&app);
        for option in &Catalog::default().quantity_options {
            assert_displayed(&buffer, &option.label);
        }
        assert_displayed(&buffer, "Step 1 of 4");
    }

    #[test]
    fn test_flavor_screen_content() {
        let mut app = app();
        app.cursor = 1;
        app.select_highlighted();
        let buffer = render(&app);

        for flavor in ["Vanilla", "Chocolate", "Hazelnut", "Cookie", "Mango"] {
            assert_displayed(&buffer, flavor);
        }
        assert_displayed(&buffer, "Subtotal $12");
        assert_eq!(next_button_color(&buffer), Color::DarkGray);
    }

    #[test]
    fn test_selecting_option_enables_next() {
        let mut app = app();
        app.select_highlighted();
        app.select_highlighted();
        let buffer = render(&app);

        assert_displayed(&buffer, "(*) Vanilla");
        assert_displayed(&buffer, "( ) Chocolate");
        assert_eq!(next_button_color(&buffer), Color::Green);
    }

    #[test]
    fn test_pickup_screen_lists_dates() {
        let mut app = app();
        app.select_highlighted();
        app.select_highlighted();
        app.next();
        let buffer = render(&app);

        for date in ["Wed Jul 21", "Thu Jul 22", "Fri Jul 23", "Sat Jul 24"] {
            assert_displayed(&buffer, date);
        }
        assert_eq!(next_button_color(&buffer), Color::DarkGray);
    }

    #[test]
    fn test_summary_screen_content() {
        let mut app = app();
        app.cursor = 1;
        app.select_highlighted();
        app.select_highlighted();
        app.next();
        app.select_highlighted();
        app.next();
        let buffer = render(&app);

        assert_displayed(&buffer, "6 cupcakes");
        assert_displayed(&buffer, "Vanilla");
        assert_displayed(&buffer, "Wed Jul 21");
        assert_displayed(&buffer, "Subtotal $15");
        assert_displayed(&buffer, SEND_BUTTON);
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let mut app = app();
        app.status_message = Some("Order cancelled".to_string());
        assert_displayed(&render(&app), "Order cancelled");
    }

    #[test]
    fn test_help_popup() {
        let mut app = app();
        app.show_help();
        assert_displayed(&render(&app), "cupcake help (Line 1/");
    }
}
