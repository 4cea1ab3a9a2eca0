use crossterm::event::Event as CrosstermEvent;

pub type CallId = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A greet call returned a value
    GreetResolved { call_id: CallId, greeting: String },

    /// A greet call failed or timed out
    GreetFailed { call_id: CallId, error: String },

    /// Tick for UI refresh
    Tick,
}
