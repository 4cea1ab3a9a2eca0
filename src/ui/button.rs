use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Button;
    let pressed = state.press_flash > 0;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            Theme::border_type_focused()
        } else {
            Theme::border_type()
        })
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let label = Paragraph::new(state.config.ui.button_label.as_str())
        .alignment(Alignment::Center)
        .style(if pressed {
            Theme::button_pressed()
        } else {
            Theme::button()
        })
        .block(block);
    frame.render_widget(label, area);
}
