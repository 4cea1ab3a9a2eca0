use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Greeting ")
        .title_style(Theme::title())
        .borders(Borders::TOP);

    // Written verbatim, no trimming
    let paragraph = Paragraph::new(state.greeting.as_str())
        .style(Theme::greeting())
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}
