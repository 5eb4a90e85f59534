//! Legality-gated actions.
//!
//! An action is a name, a predicate deciding whether it may be taken right
//! now, and an effect that mutates the game state. Every participant owns an
//! [`ActionRegistry`]; the turn controller filters it through
//! [`LegalityContext`] and runs the chosen effect with an [`ActionContext`].
//!
//! ## Key Types
//!
//! - `ActionRegistry`: name → (predicate, effect), in registration order
//! - `LegalityContext`: read-only view for predicates
//! - `ActionContext`: mutable state plus sub-choices and eliminations
//! - `ActionOutcome`: continue, end the phase or end the turn

mod context;
mod registry;

pub use context::{ActionContext, ActionOutcome, LegalityContext};
pub use registry::{Action, ActionName, ActionRegistry};
