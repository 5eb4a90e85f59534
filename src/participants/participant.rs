//! A seated participant.

use crate::actions::ActionRegistry;
use crate::core::{ParticipantId, ParticipantMap};

use super::decision::{DecisionMaker, ParticipantKind};

/// All participants of a session, indexed by join order.
pub type Roster<S> = ParticipantMap<Participant<S>>;

/// One participant: identity, available actions and whoever makes its
/// choices.
///
/// Neighbours are unset until the session builds its ring. Elimination is
/// terminal: once set, the turn controller skips this participant.
pub struct Participant<S> {
    id: ParticipantId,
    name: String,
    actions: ActionRegistry<S>,
    decider: Box<dyn DecisionMaker>,
    eliminated: bool,
    left: Option<ParticipantId>,
    right: Option<ParticipantId>,
}

impl<S> Participant<S> {
    pub fn new(id: ParticipantId, name: impl Into<String>, decider: Box<dyn DecisionMaker>) -> Self {
        Self {
            id,
            name: name.into(),
            actions: ActionRegistry::new(),
            decider,
            eliminated: false,
            left: None,
            right: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human or bot, as reported by the decision maker.
    #[must_use]
    pub fn kind(&self) -> ParticipantKind {
        self.decider.kind()
    }

    #[must_use]
    pub fn actions(&self) -> &ActionRegistry<S> {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionRegistry<S> {
        &mut self.actions
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Next seat clockwise.
    #[must_use]
    pub fn left(&self) -> Option<ParticipantId> {
        self.left
    }

    /// Next seat counterclockwise.
    #[must_use]
    pub fn right(&self) -> Option<ParticipantId> {
        self.right
    }

    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }

    pub(crate) fn set_neighbors(&mut self, left: ParticipantId, right: ParticipantId) {
        self.left = Some(left);
        self.right = Some(right);
    }

    /// Re-key after a roster removal shifted this participant down.
    pub(crate) fn reassign(&mut self, id: ParticipantId) {
        self.id = id;
        self.actions = ActionRegistry::new();
    }

    /// Split borrow for running an effect: the registry is read while the
    /// decider may be asked for sub-choices.
    pub(crate) fn parts_mut(&mut self) -> (&ActionRegistry<S>, &mut dyn DecisionMaker) {
        (&self.actions, &mut *self.decider)
    }
}

impl<S> std::fmt::Debug for Participant<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("actions", &self.actions)
            .field("eliminated", &self.eliminated)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
