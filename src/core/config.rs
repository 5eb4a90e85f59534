//! Session and phase configuration.
//!
//! Games configure the engine when a session is created:
//! - `SessionConfig`: participant bounds, rotation direction, seed, retry policy
//! - `PhaseConfig`: a single named sub-step of a turn
//! - `PhaseSequence`: the fixed phase order shared by every turn of a game type
//!
//! The engine never hardcodes phases; the DRAW/PLAY pair is only a default.

use serde::{Deserialize, Serialize};

/// Opaque phase identifier. Games define their own phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Conventional draw phase of the default card-game sequence.
    pub const DRAW: PhaseId = PhaseId(1);
    /// Conventional play phase of the default card-game sequence.
    pub const PLAY: PhaseId = PhaseId(2);

    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Phase({})", self.0)
    }
}

/// Configuration for one phase of a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Phase identifier, compared by actions' legality predicates.
    pub id: PhaseId,

    /// Human-readable name (for logs and front ends).
    pub name: String,

    /// May this phase start with no legal action at all?
    ///
    /// When false, entering the phase with an empty legal set is an engine
    /// error: the game forgot to account for that situation.
    pub allow_empty: bool,
}

impl PhaseConfig {
    /// Create a phase that requires at least one legal action on entry.
    pub fn new(id: PhaseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            allow_empty: false,
        }
    }

    /// Allow the phase to be entered with nothing to do.
    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Ordered list of phases making up one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSequence {
    phases: Vec<PhaseConfig>,
}

impl PhaseSequence {
    /// Create a sequence from phases in turn order.
    pub fn new(phases: Vec<PhaseConfig>) -> Self {
        assert!(!phases.is_empty(), "A turn needs at least one phase");
        Self { phases }
    }

    /// The DRAW, PLAY sequence used by most card games.
    ///
    /// Both phases allow being empty: a participant with an empty hand and
    /// an exhausted draw pile legitimately has nothing to do.
    #[must_use]
    pub fn draw_play() -> Self {
        Self::new(vec![
            PhaseConfig::new(PhaseId::DRAW, "Draw").allow_empty(),
            PhaseConfig::new(PhaseId::PLAY, "Play").allow_empty(),
        ])
    }

    /// Iterate phases in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &PhaseConfig> {
        self.phases.iter()
    }

    /// Number of phases per turn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; sequences are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Look up a phase by ID.
    #[must_use]
    pub fn get(&self, id: PhaseId) -> Option<&PhaseConfig> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// The first phase of every turn.
    #[must_use]
    pub fn first(&self) -> &PhaseConfig {
        &self.phases[0]
    }
}

impl Default for PhaseSequence {
    fn default() -> Self {
        Self::draw_play()
    }
}

/// Session-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fewest participants the ring may be built from.
    pub min_player_count: usize,

    /// Most participants the ring may be built from.
    pub max_player_count: usize,

    /// Rotate towards each participant's left (true) or right (false).
    pub clockwise: bool,

    /// Seed for seat shuffling and every game-supplied random stream.
    pub seed: u64,

    /// How many times a human is re-prompted after choosing an option
    /// outside the legal set. Bots are never re-prompted.
    pub max_decision_retries: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_player_count: 2,
            max_player_count: 6,
            clockwise: true,
            seed: 0,
            max_decision_retries: 3,
        }
    }
}

impl SessionConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allowed participant range.
    #[must_use]
    pub fn with_player_count(mut self, min: usize, max: usize) -> Self {
        assert!(min >= 1, "Must allow at least 1 participant");
        assert!(min <= max, "Minimum participant count exceeds maximum");
        assert!(max <= 255, "At most 255 participants supported");
        self.min_player_count = min;
        self.max_player_count = max;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rotate counterclockwise.
    #[must_use]
    pub fn counterclockwise(mut self) -> Self {
        self.clockwise = false;
        self
    }

    /// Set the human re-prompt bound.
    #[must_use]
    pub fn with_max_decision_retries(mut self, retries: u32) -> Self {
        self.max_decision_retries = retries;
        self
    }

    /// Check whether `count` participants fit the configured range.
    #[must_use]
    pub fn accepts_player_count(&self, count: usize) -> bool {
        count > 0 && (self.min_player_count..=self.max_player_count).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_config_builder() {
        let phase = PhaseConfig::new(PhaseId::new(3), "Combat");
        assert!(!phase.allow_empty);

        let phase = phase.allow_empty();
        assert!(phase.allow_empty);
        assert_eq!(phase.name, "Combat");
    }

    #[test]
    fn test_default_sequence_order() {
        let phases = PhaseSequence::default();
        let ids: Vec<_> = phases.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![PhaseId::DRAW, PhaseId::PLAY]);
        assert_eq!(phases.first().id, PhaseId::DRAW);
        assert_eq!(phases.get(PhaseId::PLAY).map(|p| p.name.as_str()), Some("Play"));
        assert!(phases.get(PhaseId::new(99)).is_none());
    }

    #[test]
    #[should_panic(expected = "A turn needs at least one phase")]
    fn test_empty_sequence_rejected() {
        PhaseSequence::new(Vec::new());
    }

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.min_player_count, 2);
        assert_eq!(config.max_player_count, 6);
        assert!(config.clockwise);
        assert_eq!(config.max_decision_retries, 3);
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new()
            .with_player_count(3, 4)
            .with_seed(11)
            .counterclockwise()
            .with_max_decision_retries(0);

        assert!(!config.accepts_player_count(2));
        assert!(config.accepts_player_count(3));
        assert!(config.accepts_player_count(4));
        assert!(!config.accepts_player_count(5));
        assert!(!config.clockwise);
        assert_eq!(config.seed, 11);
    }

    #[test]
    fn test_session_config_partial_json() {
        let config: SessionConfig = serde_json::from_str(r#"{"seed": 5, "clockwise": false}"#).unwrap();
        assert_eq!(config.seed, 5);
        assert!(!config.clockwise);
        assert_eq!(config.max_player_count, 6);
    }

    #[test]
    fn test_zero_participants_never_accepted() {
        let config: SessionConfig = serde_json::from_str(r#"{"min_player_count": 0}"#).unwrap();
        assert_eq!(config.min_player_count, 0);
        assert!(!config.accepts_player_count(0));
        assert!(config.accepts_player_count(1));
    }

    #[test]
    #[should_panic(expected = "Minimum participant count exceeds maximum")]
    fn test_session_config_inverted_range() {
        let _ = SessionConfig::new().with_player_count(5, 2);
    }
}
