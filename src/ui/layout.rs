use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Widest the form column grows on large terminals.
const FORM_MAX_WIDTH: u16 = 64;

pub struct AppLayout {
    pub title_bar: Rect,
    pub name_input: Rect,
    pub button: Rect,
    pub greeting: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, button_label: &str) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Centered form column
    let [column] = Layout::horizontal([Constraint::Max(FORM_MAX_WIDTH)])
        .flex(Flex::Center)
        .areas(content);

    let column_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Gap
            Constraint::Length(3), // Name input
            Constraint::Length(3), // Button row
            Constraint::Min(3),    // Greeting
        ])
        .split(column);

    let title_bar = column_chunks[0];
    let name_input = column_chunks[2];
    let button_row = column_chunks[3];
    let greeting = column_chunks[4];

    // Button hugs its label: border + one space padding each side
    let label_width = u16::try_from(button_label.width()).unwrap_or(u16::MAX);
    let button_width = label_width.saturating_add(4).min(button_row.width);
    let button = Rect {
        x: button_row.x,
        y: button_row.y,
        width: button_width,
        height: button_row.height,
    };

    AppLayout {
        title_bar,
        name_input,
        button,
        greeting,
        status_bar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_sits_below_input() {
        let l = compute_layout(Rect::new(0, 0, 80, 24), "Click Me!");
        assert_eq!(l.button.y, l.name_input.y + l.name_input.height);
        assert_eq!(l.button.width, 13);
        assert_eq!(l.button.height, 3);
        assert_eq!(l.status_bar.y, 23);
    }

    #[test]
    fn test_oversized_label_is_clamped() {
        let label = "x".repeat(70_000);
        let l = compute_layout(Rect::new(0, 0, 80, 24), &label);
        assert_eq!(l.button.width, l.name_input.width);
    }

    #[test]
    fn test_form_is_centered_and_capped() {
        let l = compute_layout(Rect::new(0, 0, 100, 30), "Go");
        assert_eq!(l.name_input.width, FORM_MAX_WIDTH);
        assert_eq!(l.name_input.x, (100 - FORM_MAX_WIDTH) / 2);
        assert_eq!(l.button.x, l.name_input.x);
    }
}
