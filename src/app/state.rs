use crate::app::event::CallId;
use crate::config::{AppConfig, Ordering};
use ratatui::layout::Rect;
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Ticks the button stays highlighted after a press (4 ticks at 50ms = 200ms).
const PRESS_FLASH_TICKS: u8 = 4;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// A greet call that has been dispatched but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingCall {
    pub id: CallId,
    pub name: String,
    pub started_at: Instant,
}

/// What happened to the most recently finished call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resolved(CallId),
    /// Resolved, but an older call than the greeting already on screen.
    Stale(CallId),
    Failed { call_id: CallId, error: String },
}

/// Single-line text field holding the name to greet.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    /// Byte offset into `text`, always on a char boundary.
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, read as-is. The field is not cleared on activation.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_boundary();
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn delete_word_back(&mut self) {
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end_matches(char::is_whitespace);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Name,
    Button,
}

pub struct AppState {
    pub config: AppConfig,
    pub input: InputState,
    pub focus: FocusPanel,
    /// Text of the greeting panel, written verbatim from the actor's reply.
    pub greeting: String,
    pub pending: Vec<PendingCall>,
    pub next_call_id: CallId,
    /// Id of the call whose reply is currently displayed.
    pub last_applied: Option<CallId>,
    pub outcome: Option<Outcome>,
    /// Terminal area, used to hit-test mouse presses.
    pub viewport: Rect,
    pub backend_label: String,
    pub press_flash: u8,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, backend_label: String) -> Self {
        Self {
            config,
            input: InputState::new(),
            focus: FocusPanel::Name,
            greeting: String::new(),
            pending: Vec::new(),
            next_call_id: 1,
            last_applied: None,
            outcome: None,
            viewport: Rect::default(),
            backend_label,
            press_flash: 0,
            tick_count: 0,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn allocate_call_id(&mut self) -> CallId {
        let id = self.next_call_id;
        self.next_call_id += 1;
        id
    }

    /// Register a new in-flight call for `name` and return its id.
    pub fn begin_call(&mut self, name: &str) -> CallId {
        let id = self.allocate_call_id();
        self.pending.push(PendingCall {
            id,
            name: name.to_string(),
            started_at: Instant::now(),
        });
        self.press_flash = PRESS_FLASH_TICKS;
        self.dirty = true;
        id
    }

    /// Remove a call from the in-flight list, returning it if it was known.
    pub fn finish_call(&mut self, id: CallId) -> Option<PendingCall> {
        let idx = self.pending.iter().position(|c| c.id == id)?;
        self.dirty = true;
        Some(self.pending.remove(idx))
    }

    /// Write a resolved greeting to the display, subject to `ordering`.
    /// Returns `false` when the reply was dropped as stale.
    ///
    /// Under `Latest` the cutoff is the last *applied* call. Failed calls do
    /// not move it, so an older call may still land after a newer one fails.
    pub fn apply_greeting(&mut self, id: CallId, greeting: String, ordering: Ordering) -> bool {
        let fresh = match ordering {
            Ordering::Arrival => true,
            Ordering::Latest => self.last_applied.map_or(true, |last| id > last),
        };
        if fresh {
            self.greeting = greeting;
            self.last_applied = Some(id);
            self.outcome = Some(Outcome::Resolved(id));
        } else {
            self.outcome = Some(Outcome::Stale(id));
        }
        self.dirty = true;
        fresh
    }

    pub fn record_failure(&mut self, call_id: CallId, error: String) {
        self.outcome = Some(Outcome::Failed { call_id, error });
        self.dirty = true;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Name => FocusPanel::Button,
            FocusPanel::Button => FocusPanel::Name,
        };
        self.dirty = true;
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[(self.tick_count as usize / 2) % SPINNER.len()]
    }

    pub fn status_line(&self) -> String {
        if !self.pending.is_empty() {
            let oldest = self
                .pending
                .iter()
                .map(|c| c.started_at.elapsed().as_secs_f32())
                .fold(0.0f32, f32::max);
            return format!(
                "{} waiting on {} call(s), oldest {:.1}s",
                self.spinner(),
                self.pending.len(),
                oldest
            );
        }
        match &self.outcome {
            Some(Outcome::Resolved(id)) => format!("call #{} resolved", id),
            Some(Outcome::Stale(id)) => format!("call #{} resolved late, ignored", id),
            Some(Outcome::Failed { call_id, error }) => {
                format!("call #{} failed: {}", call_id, error)
            }
            None => "Ready. Tab switches focus, Enter greets.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), "local".into())
    }

    #[test]
    fn test_input_editing_respects_char_boundaries() {
        let mut input = InputState::new();
        for c in "héllo".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.move_left();
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 1);
        input.delete_forward();
        assert_eq!(input.value(), "hllo");
        input.move_end();
        input.delete_back();
        assert_eq!(input.value(), "hll");
    }

    #[test]
    fn test_cursor_column_counts_wide_chars() {
        let mut input = InputState::new();
        input.insert_char('名');
        input.insert_char('a');
        assert_eq!(input.cursor_column(), 3);
    }

    #[test]
    fn test_delete_word_back() {
        let mut input = InputState::new();
        for c in "Ada Lovelace  ".chars() {
            input.insert_char(c);
        }
        input.delete_word_back();
        assert_eq!(input.value(), "Ada ");
        input.delete_word_back();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_call_ids_are_monotonic() {
        let mut s = state();
        let a = s.begin_call("a");
        let b = s.begin_call("b");
        assert!(b > a);
        assert_eq!(s.pending.len(), 2);
        assert_eq!(s.finish_call(a).map(|c| c.name), Some("a".to_string()));
        assert!(s.finish_call(a).is_none());
        assert_eq!(s.pending.len(), 1);
    }

    #[test]
    fn test_arrival_ordering_applies_every_reply() {
        let mut s = state();
        assert!(s.apply_greeting(2, "two".into(), Ordering::Arrival));
        assert!(s.apply_greeting(1, "one".into(), Ordering::Arrival));
        assert_eq!(s.greeting, "one");
    }

    #[test]
    fn test_latest_ordering_drops_stale_reply() {
        let mut s = state();
        assert!(s.apply_greeting(2, "two".into(), Ordering::Latest));
        assert!(!s.apply_greeting(1, "one".into(), Ordering::Latest));
        assert_eq!(s.greeting, "two");
        assert_eq!(s.outcome, Some(Outcome::Stale(1)));
    }

    #[test]
    fn test_latest_cutoff_ignores_failed_calls() {
        let mut s = state();
        let a = s.begin_call("a");
        let b = s.begin_call("b");
        s.finish_call(b);
        s.record_failure(b, "trap".into());
        s.finish_call(a);
        assert!(s.apply_greeting(a, "A".into(), Ordering::Latest));
        assert_eq!(s.greeting, "A");
        assert_eq!(s.last_applied, Some(a));
    }

    #[test]
    fn test_status_line_reports_failure() {
        let mut s = state();
        s.record_failure(3, "timeout".into());
        assert_eq!(s.status_line(), "call #3 failed: timeout");
    }
}
