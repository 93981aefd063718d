//! Carnivore behavior: hunt, chase, wander, feed and reproduce.

use hecs::Entity;
use rand::seq::SliceRandom;

use crate::components::{FoodValue, Hunger, Position, ReproductionClock, Species, Vitals};
use crate::grid::CARDINALS;
use crate::systems::{self, MateSearch};
use crate::world::SimulationWorld;

pub const INITIAL_HEALTH: f32 = 12.0;
pub const LIFESPAN: u32 = 250;
pub const INITIAL_HUNGER: u32 = 7;
pub const FOOD_VALUE: f32 = 7.0;

/// Health lost per tick; faster decay than herbivores.
pub const HEALTH_DRAIN: f32 = 0.7;
/// Reproduction additionally requires health above this floor.
pub const REPRODUCE_HEALTH_FLOOR: f32 = 6.0;

/// Component bundle for a newly spawned carnivore.
pub fn bundle(
    x: i32,
    y: i32,
) -> (Position, Species, Vitals, FoodValue, Hunger, ReproductionClock) {
    (
        Position::new(x, y),
        Species::Carnivore,
        Vitals::new(INITIAL_HEALTH, LIFESPAN),
        FoodValue(FOOD_VALUE),
        Hunger(INITIAL_HUNGER),
        ReproductionClock::default(),
    )
}

/// One tick for a carnivore: decay, death check, feeding or movement, then a
/// second reproduction pass. The movement phase already contains its own
/// reproduction attempt; both share the cooldown clock, so at most one
/// attempt per window succeeds. Returns the number of children spawned.
pub fn tick_carnivore(sim: &mut SimulationWorld, entity: Entity) -> u32 {
    if systems::age_and_decay(sim, entity, HEALTH_DRAIN) {
        sim.remove_entity(entity);
        return 0;
    }

    let mut births = 0;

    // Feed on the nearest herbivore when exactly one cell away, taking over
    // its cell.
    let adjacent_prey = sim
        .find_nearest(entity, Species::is_herbivore)
        .filter(|&prey| sim.distance(entity, prey) == Some(1));
    if let Some(prey) = adjacent_prey {
        let meal = sim.position(prey);
        sim.consume(entity, prey);
        systems::reset_hunger(sim, entity);
        if let Some(cell) = meal {
            sim.move_entity(entity, cell.x, cell.y);
        }
    } else {
        births += movement(sim, entity);
    }

    births += match try_reproduce(sim, entity) {
        MateSearch::Matched { births } => births,
        MateSearch::NoPartner => 0,
    };
    births
}

fn try_reproduce(sim: &mut SimulationWorld, entity: Entity) -> MateSearch {
    let threshold = sim.config().carn_reproduce_threshold;
    systems::try_reproduce(sim, entity, Species::Carnivore, threshold, REPRODUCE_HEALTH_FLOOR)
}

/// Movement policy, one branch per tick in priority order:
/// hunt > reproduce > chase > wander. Returns children spawned by the
/// in-movement reproduction attempt.
fn movement(sim: &mut SimulationWorld, entity: Entity) -> u32 {
    let Some(pos) = sim.position(entity) else {
        return 0;
    };

    // 1) Hunt: eat the first herbivore found in the four adjacent cells and
    // move into its place.
    for (dx, dy) in CARDINALS {
        let (tx, ty) = (pos.x + dx, pos.y + dy);
        if let Some(prey) = sim.first_at(tx, ty, Species::is_herbivore) {
            sim.consume(entity, prey);
            sim.move_entity(entity, tx, ty);
            return 0;
        }
    }

    // 2) Reproduce: a matched partner ends the movement phase here, even
    // when no free cell was left for the child.
    match try_reproduce(sim, entity) {
        MateSearch::Matched { births } => return births,
        MateSearch::NoPartner => {}
    }

    // 3) Chase the nearest herbivore; prey on the destination is eaten
    // while entering, and only another carnivore blocks the step.
    if let Some(prey) = sim.find_nearest(entity, Species::is_herbivore) {
        if let Some(target) = sim.position(prey) {
            let (tx, ty) = pos.step_toward(target);
            if sim.in_bounds(tx, ty) {
                if let Some(caught) = sim.first_at(tx, ty, Species::is_herbivore) {
                    sim.consume(entity, caught);
                    sim.move_entity(entity, tx, ty);
                    return 0;
                }
                if sim.first_at(tx, ty, Species::is_carnivore).is_none() {
                    sim.move_entity(entity, tx, ty);
                    return 0;
                }
            }
        }
    }

    // 4) Wander into the first strictly empty cell, if any.
    let mut directions = CARDINALS;
    directions.shuffle(&mut rand::thread_rng());
    for (dx, dy) in directions {
        let (tx, ty) = (pos.x + dx, pos.y + dy);
        if sim.in_bounds(tx, ty) && sim.occupants(tx, ty).is_empty() {
            sim.move_entity(entity, tx, ty);
            return 0;
        }
    }
    0
}
