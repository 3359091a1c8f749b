//! Drop motion and lifecycle
//!
//! Drops fall at their spawn speed. Past the danger line they turn "late";
//! once fully below the play area they expire. A miss only costs a life when
//! the drop overshot the danger line by more than the miss buffer.

use serde::{Deserialize, Serialize};

use super::state::{DropId, World};
use crate::tuning::Tuning;

/// What happened to the drops during one motion pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionOutcome {
    pub lives_lost: u32,
    /// Drops that crossed the danger line this pass
    pub newly_late: Vec<DropId>,
    /// Expired drops and whether each cost a life
    pub expired: Vec<(DropId, bool)>,
}

/// Advance every drop by its speed and expire the ones below the area
pub fn advance(world: &mut World, area_height: f32, tuning: &Tuning) -> MotionOutcome {
    let danger_line = area_height * tuning.danger_line_ratio;
    let miss_line = danger_line + tuning.miss_buffer;
    let mut outcome = MotionOutcome::default();

    world.sweep(|drop| {
        drop.pos.y += drop.speed;

        if drop.pos.y > danger_line && !drop.late {
            drop.late = true;
            outcome.newly_late.push(drop.id);
        }

        if drop.pos.y > area_height {
            let life_lost = drop.pos.y > miss_line;
            if life_lost {
                outcome.lives_lost += 1;
            }
            outcome.expired.push((drop.id, life_lost));
            return false;
        }

        true
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Drop, DropColor, Paddle};
    use glam::Vec2;
    use proptest::prelude::*;

    fn world_with(drops: &[(u32, f32, f32)]) -> World {
        let mut world = World::new(Paddle::new(&Tuning::default()));
        for &(id, y, speed) in drops {
            world.add(Drop::new(DropId(id), Vec2::new(10.0, y), DropColor::Blue, speed));
        }
        world
    }

    #[test]
    fn test_drops_fall_by_speed() {
        let mut world = world_with(&[(1, -50.0, 2.7), (2, 100.0, 4.1)]);
        let outcome = advance(&mut world, 600.0, &Tuning::default());
        assert_eq!(outcome, MotionOutcome::default());
        assert!((world.get(DropId(1)).unwrap().pos.y - (-47.3)).abs() < 1e-4);
        assert!((world.get(DropId(2)).unwrap().pos.y - 104.1).abs() < 1e-4);
    }

    #[test]
    fn test_late_reported_once() {
        // Danger line at 450
        let mut world = world_with(&[(1, 449.0, 2.0)]);
        let tuning = Tuning::default();

        let first = advance(&mut world, 600.0, &tuning);
        assert_eq!(first.newly_late, vec![DropId(1)]);
        assert!(world.get(DropId(1)).unwrap().late);

        let second = advance(&mut world, 600.0, &tuning);
        assert!(second.newly_late.is_empty());
        assert!(world.get(DropId(1)).unwrap().late);
    }

    #[test]
    fn test_miss_past_buffer_costs_life() {
        let mut world = world_with(&[(1, 599.0, 2.0)]);
        let outcome = advance(&mut world, 600.0, &Tuning::default());
        assert_eq!(outcome.lives_lost, 1);
        assert_eq!(outcome.expired, vec![(DropId(1), true)]);
        assert!(world.is_empty());
    }

    #[test]
    fn test_miss_within_buffer_is_forgiven() {
        // Height 160: danger line 120, miss line 170. Expires at 161.
        let mut world = world_with(&[(1, 159.0, 2.0)]);
        let outcome = advance(&mut world, 160.0, &Tuning::default());
        assert_eq!(outcome.lives_lost, 0);
        assert_eq!(outcome.expired, vec![(DropId(1), false)]);
        assert!(world.is_empty());
    }

    #[test]
    fn test_exactly_at_height_stays() {
        let mut world = world_with(&[(1, 598.0, 2.0)]);
        let outcome = advance(&mut world, 600.0, &Tuning::default());
        assert!(outcome.expired.is_empty());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_multiple_expiries_in_one_pass() {
        let mut world = world_with(&[(1, 599.0, 2.0), (2, 300.0, 2.0), (3, 599.5, 5.0)]);
        let outcome = advance(&mut world, 600.0, &Tuning::default());
        assert_eq!(outcome.lives_lost, 2);
        assert_eq!(world.len(), 1);
        assert!(world.get(DropId(2)).is_some());
    }

    proptest! {
        #[test]
        fn prop_y_never_decreases(
            start in -50.0f32..600.0,
            speed in 0.0f32..20.0,
            height in 100.0f32..1200.0,
            steps in 1usize..200,
        ) {
            let tuning = Tuning::default();
            let mut world = world_with(&[(1, start, speed)]);
            let mut last_y = start;
            for _ in 0..steps {
                advance(&mut world, height, &tuning);
                match world.get(DropId(1)) {
                    Some(drop) => {
                        prop_assert!(drop.pos.y >= last_y);
                        last_y = drop.pos.y;
                    }
                    None => break,
                }
            }
        }
    }
}
