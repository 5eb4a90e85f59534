//! Action registry.
//!
//! Each participant owns a registry mapping action names to a legality
//! predicate and an effect. Names come back from decision makers, so the
//! registry is keyed by name and remembers registration order: the legal
//! set is always offered in that order.

use rustc_hash::FxHashMap;

use super::context::{ActionContext, ActionOutcome, LegalityContext};
use crate::core::Result;

/// Name an action is registered and chosen under.
pub type ActionName = String;

type Predicate<S> = Box<dyn Fn(&LegalityContext<'_, S>) -> bool + Send + Sync>;
type Effect<S> = Box<dyn Fn(&mut ActionContext<'_, S>) -> Result<ActionOutcome> + Send + Sync>;

/// A legality-gated action.
pub struct Action<S> {
    name: ActionName,
    predicate: Predicate<S>,
    effect: Effect<S>,
}

impl<S> Action<S> {
    /// Name this action is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate against the current state.
    #[must_use]
    pub fn is_legal(&self, ctx: &LegalityContext<'_, S>) -> bool {
        (self.predicate)(ctx)
    }

    /// Run the effect.
    ///
    /// Does not re-check legality; the turn controller only performs
    /// actions that were legal when the choice was made.
    pub fn perform(&self, ctx: &mut ActionContext<'_, S>) -> Result<ActionOutcome> {
        (self.effect)(ctx)
    }
}

impl<S> std::fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Per-participant mapping from action name to action.
///
/// ## Example
///
/// ```
/// use turn_engine::actions::{ActionOutcome, ActionRegistry, LegalityContext};
/// use turn_engine::core::{ParticipantId, PhaseId};
///
/// let mut registry: ActionRegistry<u32> = ActionRegistry::new();
/// registry.register(
///     "Increment",
///     |ctx| *ctx.state < 3,
///     |ctx| {
///         *ctx.state += 1;
///         Ok(ActionOutcome::Continue)
///     },
/// );
///
/// let ctx = LegalityContext { state: &5, actor: ParticipantId::new(0), phase: PhaseId::PLAY, turn: 1 };
/// assert!(registry.legal_names(&ctx).is_empty());
/// ```
pub struct ActionRegistry<S> {
    actions: Vec<Action<S>>,
    index: FxHashMap<ActionName, usize>,
}

impl<S> Default for ActionRegistry<S> {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<S> ActionRegistry<S> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action.
    ///
    /// Registering a name twice replaces the earlier action but keeps its
    /// original position in the offering order.
    pub fn register<P, E>(&mut self, name: impl Into<ActionName>, predicate: P, effect: E)
    where
        P: Fn(&LegalityContext<'_, S>) -> bool + Send + Sync + 'static,
        E: Fn(&mut ActionContext<'_, S>) -> Result<ActionOutcome> + Send + Sync + 'static,
    {
        let name = name.into();
        let action = Action {
            name: name.clone(),
            predicate: Box::new(predicate),
            effect: Box::new(effect),
        };

        match self.index.get(&name) {
            Some(&idx) => self.actions[idx] = action,
            None => {
                self.index.insert(name, self.actions.len());
                self.actions.push(action);
            }
        }
    }

    /// Remove an action, returning whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(idx) = self.index.remove(name) else {
            return false;
        };
        self.actions.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        true
    }

    /// Look up an action by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action<S>> {
        self.index.get(name).map(|&idx| &self.actions[idx])
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if no action is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered names in offering order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }

    /// Names of the actions legal right now, in offering order.
    #[must_use]
    pub fn legal_names(&self, ctx: &LegalityContext<'_, S>) -> Vec<ActionName> {
        self.actions
            .iter()
            .filter(|a| a.is_legal(ctx))
            .map(|a| a.name.clone())
            .collect()
    }
}

impl<S> std::fmt::Debug for ActionRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
