//! Seating ring tests.

use proptest::prelude::*;
use turn_engine::core::{EngineError, GameRng, ParticipantId, SessionConfig};
use turn_engine::turn::Ring;

fn seats(n: u8) -> Vec<ParticipantId> {
    (0..n).map(ParticipantId::new).collect()
}

#[test]
fn test_participant_bounds() {
    let config = SessionConfig::default().with_player_count(3, 4);
    let mut rng = GameRng::new(0);

    for n in [0u8, 1, 2, 5] {
        let err = Ring::build(seats(n), &config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidPlayerCount {
                count: n as usize,
                min: 3,
                max: 4
            }
        );
    }
    assert_eq!(Ring::build(seats(3), &config, &mut rng).unwrap().len(), 3);
}

#[test]
fn test_counterclockwise_rotation() {
    let ring = Ring::with_order(seats(4), &SessionConfig::default()).unwrap();
    let mut current = ParticipantId::new(0);
    let mut visited = Vec::new();

    for _ in 0..4 {
        current = ring.advance(current, false).unwrap();
        visited.push(current.0);
    }
    assert_eq!(visited, vec![3, 2, 1, 0]);
}

#[test]
fn test_different_seeds_can_seat_differently() {
    let config = SessionConfig::default();
    let orders: Vec<_> = (0..16)
        .map(|seed| Ring::build(seats(6), &config, &mut GameRng::new(seed)).unwrap().seats().to_vec())
        .collect();

    assert!(orders.iter().any(|o| o != &orders[0]));
}

proptest! {
    #[test]
    fn test_full_lap_returns_to_start(n in 2u8..=6, seed in any::<u64>(), start in 0u8..6, clockwise in any::<bool>()) {
        let ring = Ring::build(seats(n), &SessionConfig::default(), &mut GameRng::new(seed)).unwrap();
        let start = ParticipantId::new(start % n);

        let mut current = start;
        let mut seen = vec![start];
        for _ in 0..n {
            current = ring.advance(current, clockwise).unwrap();
            seen.push(current);
        }

        prop_assert_eq!(current, start);
        seen.pop();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), n as usize);
    }

    #[test]
    fn test_left_and_right_are_inverse(n in 2u8..=6, seed in any::<u64>()) {
        let ring = Ring::build(seats(n), &SessionConfig::default(), &mut GameRng::new(seed)).unwrap();

        for id in ring.iter() {
            prop_assert_eq!(ring.right_of(ring.left_of(id).unwrap()).unwrap(), id);
            prop_assert_eq!(ring.left_of(ring.right_of(id).unwrap()).unwrap(), id);
        }
    }

    #[test]
    fn test_next_active_never_lands_on_eliminated(
        n in 2u8..=6,
        seed in any::<u64>(),
        out in prop::collection::vec(any::<bool>(), 6),
    ) {
        let ring = Ring::build(seats(n), &SessionConfig::default(), &mut GameRng::new(seed)).unwrap();
        let eliminated = |id: ParticipantId| out[id.index()];

        for id in ring.iter() {
            match ring.next_active(id, true, eliminated).unwrap() {
                Some(next) => prop_assert!(!eliminated(next)),
                None => prop_assert!(ring.iter().all(eliminated)),
            }
        }
    }
}
