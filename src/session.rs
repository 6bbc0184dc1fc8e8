//! Session state machine
//!
//! Implements the Elm Architecture pattern: a pure transition function over
//! the two-state session lifecycle (topic selection, active conversation)
//! producing render effects for an impure controller to execute.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, FocusTarget, Sender, View};
pub use event::{Event, ExchangeOutcome};
pub use state::SessionState;
pub use transition::{transition, TransitionResult};
