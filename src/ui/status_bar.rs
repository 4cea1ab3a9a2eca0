use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    parts.push(Span::styled(
        format!(" [{}] ", state.backend_label),
        Style::default().fg(Color::Green).bg(Color::DarkGray),
    ));

    let style = if !state.pending.is_empty() {
        Theme::status_busy()
    } else if matches!(state.outcome, Some(Outcome::Failed { .. })) {
        Theme::status_error()
    } else {
        Theme::status_bar()
    };
    parts.push(Span::styled(format!(" {} ", state.status_line()), style));

    // Focus indicator
    let focus_name = match state.focus {
        FocusPanel::Name => "NAME",
        FocusPanel::Button => "BUTTON",
    };
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Color::Cyan).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
