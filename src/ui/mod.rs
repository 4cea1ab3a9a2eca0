mod button;
mod greeting;
mod input_box;
pub mod layout;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, &state.config.ui.button_label);

    render_title(frame, app_layout.title_bar, state);
    input_box::render(frame, app_layout.name_input, state);
    button::render(frame, app_layout.button, state);
    greeting::render(frame, app_layout.greeting, state);
    status_bar::render(frame, app_layout.status_bar, state);
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(state.config.ui.title.as_str(), Theme::title()),
        Span::styled("  Esc to quit", Style::default().fg(Theme::TEXT_MUTED)),
    ]));
    frame.render_widget(title, area);
}
