/// Rendering: the button panel and the spectrum canvas. All state changes go
/// through [`AppState`](crate::state::AppState).

pub mod panels;
pub mod plot;
