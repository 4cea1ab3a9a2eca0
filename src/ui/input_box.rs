use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Name;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(" Name ")
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = state.input.value();
    let paragraph = if text.is_empty() && !focused {
        Paragraph::new(Span::styled(
            state.config.ui.placeholder.as_str(),
            Theme::placeholder(),
        ))
    } else {
        Paragraph::new(Span::styled(text, Theme::input_text()))
    };
    frame.render_widget(paragraph, inner);

    if focused && inner.width > 0 {
        let cursor_x = inner.x + state.input.cursor_column() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}
