use crate::app::action::Action;
use crate::app::event::{AppEvent, CallId};
use crate::app::state::*;
use crate::config::ErrorReporting;
use crate::ui::layout;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::GreetResolved { call_id, greeting } => {
            handle_resolved(state, call_id, greeting);
            vec![]
        }
        AppEvent::GreetFailed { call_id, error } => {
            handle_failed(state, call_id, error);
            vec![]
        }
        AppEvent::Tick => {
            handle_tick(state);
            vec![]
        }
    }
}

/// The click handler proper: read the name field as-is and ask for a greet
/// call. No validation, no debouncing; every activation is its own call.
fn activate(state: &mut AppState) -> Vec<Action> {
    let name = state.input.value().to_string();
    let call_id = state.begin_call(&name);
    tracing::debug!(call_id, name = %name, "greet requested");
    vec![Action::Greet { call_id, name }]
}

fn handle_resolved(state: &mut AppState, call_id: CallId, greeting: String) {
    let call = state.finish_call(call_id);
    let ordering = state.config.behavior.ordering;
    let elapsed_ms = call
        .as_ref()
        .map(|c| c.started_at.elapsed().as_millis() as u64)
        .unwrap_or_default();
    let name = call.map(|c| c.name).unwrap_or_default();
    if state.apply_greeting(call_id, greeting, ordering) {
        tracing::info!(call_id, elapsed_ms, name = %name, "greet resolved");
    } else {
        tracing::debug!(call_id, elapsed_ms, last_applied = ?state.last_applied, "stale greet dropped");
    }
}

fn handle_failed(state: &mut AppState, call_id: CallId, error: String) {
    state.finish_call(call_id);
    tracing::warn!(call_id, %error, "greet failed");
    // The greeting display is never touched on failure.
    match state.config.behavior.on_error {
        ErrorReporting::Report => state.record_failure(call_id, error),
        ErrorReporting::Silent => {}
    }
}

fn handle_tick(state: &mut AppState) {
    state.tick_count = state.tick_count.wrapping_add(1);
    if state.press_flash > 0 {
        state.press_flash -= 1;
        state.dirty = true;
    }
    // Keep the spinner and elapsed time moving
    if !state.pending.is_empty() {
        state.dirty = true;
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Mouse(mouse) => handle_mouse(state, mouse),
        CEvent::Resize(width, height) => {
            state.viewport = Rect::new(0, 0, width, height);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return vec![];
    }
    let app_layout = layout::compute_layout(state.viewport, &state.config.ui.button_label);
    let pos = Position::new(mouse.column, mouse.row);
    if app_layout.button.contains(pos) {
        state.focus = FocusPanel::Button;
        return activate(state);
    }
    if app_layout.name_input.contains(pos) {
        state.focus = FocusPanel::Name;
        state.dirty = true;
    }
    vec![]
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    match key.code {
        KeyCode::Esc => return vec![Action::Quit],
        KeyCode::Tab | KeyCode::BackTab => {
            state.cycle_focus();
            return vec![];
        }
        _ => {}
    }

    match state.focus {
        FocusPanel::Name => handle_name_key(state, key),
        FocusPanel::Button => handle_button_key(state, key),
    }
}

fn handle_button_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => activate(state),
        KeyCode::Up => {
            state.focus = FocusPanel::Name;
            vec![]
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Start typing: switch to the name field
            state.focus = FocusPanel::Name;
            state.input.insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_name_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        // Submitting the field presses the button
        KeyCode::Enter => activate(state),
        KeyCode::Down => {
            state.focus = FocusPanel::Button;
            vec![]
        }
        KeyCode::Backspace => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                state.input.delete_word_back();
            } else {
                state.input.delete_back();
            }
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => state.input.move_home(),
                    'e' => state.input.move_end(),
                    'w' => state.input.delete_word_back(),
                    'u' => state.input.clear(),
                    _ => {}
                }
            } else {
                state.input.insert_char(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Ordering};
    use crossterm::event::KeyEventState;

    fn state_with(config: AppConfig) -> AppState {
        let mut state = AppState::new(config, "test".into());
        state.viewport = Rect::new(0, 0, 80, 24);
        state
    }

    fn state() -> AppState {
        state_with(AppConfig::default())
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Terminal(CEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, key(KeyCode::Char(c)));
        }
    }

    fn resolve(state: &mut AppState, call_id: CallId, greeting: &str) {
        handle_event(
            state,
            AppEvent::GreetResolved {
                call_id,
                greeting: greeting.to_string(),
            },
        );
    }

    fn greet_action(actions: &[Action]) -> (CallId, String) {
        match actions {
            [Action::Greet { call_id, name }] => (*call_id, name.clone()),
            other => panic!("expected one Greet action, got {:?}", other),
        }
    }

    #[test]
    fn test_enter_greets_and_reply_is_displayed() {
        let mut s = state();
        type_text(&mut s, "Alice");
        let actions = handle_event(&mut s, key(KeyCode::Enter));
        let (id, name) = greet_action(&actions);
        assert_eq!(name, "Alice");
        assert_eq!(s.pending.len(), 1);

        resolve(&mut s, id, "Hello, Alice!");
        assert_eq!(s.greeting, "Hello, Alice!");
        assert!(s.pending.is_empty());
        // The field keeps its value after activation
        assert_eq!(s.input.value(), "Alice");
    }

    #[test]
    fn test_empty_name_is_not_short_circuited() {
        let mut s = state();
        let actions = handle_event(&mut s, key(KeyCode::Enter));
        let (_, name) = greet_action(&actions);
        assert_eq!(name, "");
    }

    #[test]
    fn test_failure_leaves_display_unchanged() {
        let mut s = state();
        type_text(&mut s, "Alice");
        let (first, _) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));
        resolve(&mut s, first, "Hello, Alice!");

        let (second, _) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));
        handle_event(
            &mut s,
            AppEvent::GreetFailed {
                call_id: second,
                error: "connection refused".into(),
            },
        );
        assert_eq!(s.greeting, "Hello, Alice!");
        assert!(s.pending.is_empty());
        assert_eq!(
            s.outcome,
            Some(Outcome::Failed {
                call_id: second,
                error: "connection refused".into()
            })
        );
    }

    #[test]
    fn test_silent_failure_reports_nothing() {
        let mut config = AppConfig::default();
        config.behavior.on_error = ErrorReporting::Silent;
        let mut s = state_with(config);
        let (id, _) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));
        handle_event(
            &mut s,
            AppEvent::GreetFailed {
                call_id: id,
                error: "boom".into(),
            },
        );
        assert_eq!(s.greeting, "");
        assert_eq!(s.outcome, None);
        assert!(s.pending.is_empty());
    }

    #[test]
    fn test_overlapping_calls_last_resolution_wins() {
        let mut s = state();
        type_text(&mut s, "Alice");
        let (a, _) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));
        handle_event(&mut s, ctrl('u'));
        type_text(&mut s, "Bob");
        let (b, name) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));
        assert_eq!(name, "Bob");
        assert_ne!(a, b);
        assert_eq!(s.pending.len(), 2);

        // Bob's call comes back first, Alice's last: arrival order decides.
        resolve(&mut s, b, "Hello, Bob!");
        assert_eq!(s.greeting, "Hello, Bob!");
        resolve(&mut s, a, "Hello, Alice!");
        assert_eq!(s.greeting, "Hello, Alice!");
    }

    #[test]
    fn test_latest_ordering_ignores_older_call() {
        let mut config = AppConfig::default();
        config.behavior.ordering = Ordering::Latest;
        let mut s = state_with(config);
        let (a, _) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));
        let (b, _) = greet_action(&handle_event(&mut s, key(KeyCode::Enter)));

        resolve(&mut s, b, "second");
        resolve(&mut s, a, "first");
        assert_eq!(s.greeting, "second");
        assert_eq!(s.outcome, Some(Outcome::Stale(a)));
        assert!(s.pending.is_empty());
    }

    #[test]
    fn test_button_focus_enter_and_space_activate() {
        let mut s = state();
        handle_event(&mut s, key(KeyCode::Tab));
        assert_eq!(s.focus, FocusPanel::Button);
        assert_eq!(handle_event(&mut s, key(KeyCode::Enter)).len(), 1);
        assert_eq!(handle_event(&mut s, key(KeyCode::Char(' '))).len(), 1);
        assert_eq!(s.pending.len(), 2);
        // Typing from the button jumps back into the field
        handle_event(&mut s, key(KeyCode::Char('z')));
        assert_eq!(s.focus, FocusPanel::Name);
        assert_eq!(s.input.value(), "z");
    }

    #[test]
    fn test_click_inside_button_activates() {
        let mut s = state();
        type_text(&mut s, "Ada");
        let button = layout::compute_layout(s.viewport, &s.config.ui.button_label).button;
        let actions = handle_event(&mut s, click(button.x + 1, button.y + 1));
        let (_, name) = greet_action(&actions);
        assert_eq!(name, "Ada");
        assert_eq!(s.focus, FocusPanel::Button);
    }

    #[test]
    fn test_click_outside_button_does_nothing() {
        let mut s = state();
        let button = layout::compute_layout(s.viewport, &s.config.ui.button_label).button;
        let actions = handle_event(&mut s, click(button.x + button.width + 2, button.y + 1));
        assert!(actions.is_empty());
        assert!(s.pending.is_empty());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut s = state();
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        let actions = handle_event(&mut s, AppEvent::Terminal(CEvent::Key(release)));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut s = state();
        assert_eq!(handle_event(&mut s, ctrl('c')), vec![Action::Quit]);
        assert_eq!(handle_event(&mut s, key(KeyCode::Esc)), vec![Action::Quit]);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut s = state();
        handle_event(&mut s, AppEvent::Terminal(CEvent::Resize(120, 40)));
        assert_eq!(s.viewport, Rect::new(0, 0, 120, 40));
    }
}
