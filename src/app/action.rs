use crate::app::event::CallId;

#[derive(Debug, PartialEq)]
pub enum Action {
    Greet { call_id: CallId, name: String },
    Quit,
}
