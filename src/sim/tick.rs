//! Fixed timestep simulation tick
//!
//! One pass is always Spawner -> Motion -> Collision against the same field
//! snapshot. Session deltas are applied here; ending the run is left to the
//! state machine, which reacts to [`GameEvent::OutOfLives`].

use super::collision::resolve;
use super::motion::advance;
use super::state::{Field, GameEvent, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, field: Field, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick unless a run is in progress
    if !state.session.is_active() {
        return events;
    }

    if let Some(drop) = state
        .spawner
        .maybe_spawn(state.session.level, field.width(), tuning)
    {
        log::trace!("Spawned drop {:?} at x={:.1}", drop.id, drop.pos.x);
        events.push(GameEvent::DropSpawned {
            id: drop.id,
            pos: drop.pos,
            color: drop.color,
        });
        state.world.add(drop);
    }

    let motion = advance(&mut state.world, field.height(), tuning);
    events.extend(motion.newly_late.into_iter().map(|id| GameEvent::DropLate { id }));
    events.extend(
        motion
            .expired
            .into_iter()
            .map(|(id, life_lost)| GameEvent::DropExpired { id, life_lost }),
    );

    for _ in 0..motion.lives_lost {
        let lives = state.session.lose_life();
        log::debug!("Life lost, {} remaining", lives);
        events.push(GameEvent::LifeLost { lives });
        if state.session.is_out_of_lives() {
            // Nothing left to catch once the run is over
            events.push(GameEvent::OutOfLives);
            return events;
        }
    }

    let paddle_rect = state.world.paddle.rect(&field, tuning);
    let resolution = resolve(
        &paddle_rect,
        &mut state.world,
        field.height(),
        state.session.score,
        state.session.level,
        tuning,
    );
    events.extend(resolution.caught.iter().map(|&id| GameEvent::DropCaught { id }));

    if resolution.score_delta > 0 {
        state.session.score += resolution.score_delta;
        events.push(GameEvent::ScoreChanged {
            score: state.session.score,
        });
    }
    if resolution.leveled_up {
        state.session.level = resolution.level;
        log::debug!("Level up: {}", state.session.level);
        events.push(GameEvent::LevelUp {
            level: state.session.level,
        });
    }
    debug_assert_eq!(
        state.session.level,
        tuning.level_for_score(state.session.score)
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Drop, DropColor, DropId, Phase};
    use glam::Vec2;

    const FIELD: Field = Field {
        size: Vec2::new(800.0, 600.0),
    };

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_chance_base: 0.0,
            spawn_chance_per_level: 0.0,
            ..Default::default()
        }
    }

    fn active_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning);
        state.session.phase = Phase::Active;
        state.world.paddle.center(FIELD.width());
        state
    }

    fn add_drop(state: &mut GameState, x: f32, y: f32) -> DropId {
        let id = state.spawner.next_drop_id();
        state
            .world
            .add(Drop::new(id, Vec2::new(x, y), DropColor::Yellow, 2.0));
        id
    }

    #[test]
    fn test_idle_does_nothing() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        assert!(tick(&mut state, FIELD, &tuning).is_empty());
        assert!(state.world.is_empty());
    }

    #[test]
    fn test_catch_flow() {
        let tuning = quiet_tuning();
        let mut state = active_state(&tuning);
        // Paddle at 340..460; lands at y=540 after one move
        let id = add_drop(&mut state, 360.0, 538.0);

        let events = tick(&mut state, FIELD, &tuning);
        assert!(events.contains(&GameEvent::DropLate { id }));
        assert!(events.contains(&GameEvent::DropCaught { id }));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 10 }));
        assert_eq!(state.session.score, 10);
        assert!(state.world.is_empty());
    }

    #[test]
    fn test_out_of_lives_stops_the_pass() {
        let tuning = quiet_tuning();
        let mut state = active_state(&tuning);
        state.session.lives = 1;
        add_drop(&mut state, 0.0, 599.0);
        // Would be caught if collisions ran
        add_drop(&mut state, 360.0, 538.0);

        let events = tick(&mut state, FIELD, &tuning);
        assert_eq!(events.last(), Some(&GameEvent::OutOfLives));
        assert!(events.contains(&GameEvent::LifeLost { lives: 0 }));
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_level_invariant_over_long_run() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        state.session.lives = u32::MAX;
        for i in 0..5000 {
            // Sweep the paddle back and forth to catch some drops
            state.world.paddle.x = ((i * 3) % 680) as f32;
            tick(&mut state, FIELD, &tuning);
            assert_eq!(state.session.level, state.session.score / 100 + 1);
        }
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut state1 = active_state(&tuning);
        let mut state2 = active_state(&tuning);

        for _ in 0..2000 {
            let a = tick(&mut state1, FIELD, &tuning);
            let b = tick(&mut state2, FIELD, &tuning);
            assert_eq!(a, b);
        }

        assert_eq!(state1.session, state2.session);
        assert_eq!(state1.world.len(), state2.world.len());
    }
}
