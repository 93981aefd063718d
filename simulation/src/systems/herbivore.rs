//! Herbivore behavior: flee, forage, group, wander, feed and reproduce.

use hecs::Entity;
use rand::seq::SliceRandom;

use crate::components::{FoodValue, Hunger, Position, ReproductionClock, Species, Vitals};
use crate::grid::CARDINALS;
use crate::systems::{self, MateSearch};
use crate::world::SimulationWorld;

pub const INITIAL_HEALTH: f32 = 10.0;
pub const LIFESPAN: u32 = 200;
pub const INITIAL_HUNGER: u32 = 5;
pub const FOOD_VALUE: f32 = 5.0;

/// Health lost per tick.
pub const HEALTH_DRAIN: f32 = 0.5;
/// A carnivore within this Manhattan distance triggers fleeing.
pub const FLEE_DISTANCE: i32 = 5;
/// Herd-mates farther than 1 but within this distance attract grouping.
pub const GROUP_DISTANCE: i32 = 10;
/// Reproduction additionally requires health above this floor.
pub const REPRODUCE_HEALTH_FLOOR: f32 = 5.0;

/// Component bundle for a newly spawned herbivore.
pub fn bundle(
    x: i32,
    y: i32,
) -> (Position, Species, Vitals, FoodValue, Hunger, ReproductionClock) {
    (
        Position::new(x, y),
        Species::Herbivore,
        Vitals::new(INITIAL_HEALTH, LIFESPAN),
        FoodValue(FOOD_VALUE),
        Hunger(INITIAL_HUNGER),
        ReproductionClock::default(),
    )
}

/// One tick for a herbivore: decay, death check, feeding or movement, then
/// one reproduction attempt. Returns the number of children spawned.
pub fn tick_herbivore(sim: &mut SimulationWorld, entity: Entity) -> u32 {
    if systems::age_and_decay(sim, entity, HEALTH_DRAIN) {
        sim.remove_entity(entity);
        return 0;
    }

    // Feed on the nearest plant when it is exactly one cell away; the meal
    // replaces movement for this tick and the herbivore stays put.
    let adjacent_plant = sim
        .find_nearest(entity, Species::is_vegetation)
        .filter(|&plant| sim.distance(entity, plant) == Some(1));
    if let Some(plant) = adjacent_plant {
        sim.consume(entity, plant);
        systems::reset_hunger(sim, entity);
    } else {
        movement(sim, entity);
    }

    let threshold = sim.config().herb_reproduce_threshold;
    match systems::try_reproduce(sim, entity, Species::Herbivore, threshold, REPRODUCE_HEALTH_FLOOR)
    {
        MateSearch::Matched { births } => births,
        MateSearch::NoPartner => 0,
    }
}

/// Movement policy, one branch per tick in priority order:
/// flee > forage > group > wander.
fn movement(sim: &mut SimulationWorld, entity: Entity) {
    let Some(pos) = sim.position(entity) else {
        return;
    };

    // 1) Flee the nearest predator. Once a carnivore is close enough this
    // branch ends the movement phase whether or not a safe step exists.
    if let Some(predator) = sim.find_nearest(entity, Species::is_carnivore) {
        if sim.distance(entity, predator).is_some_and(|d| d <= FLEE_DISTANCE) {
            if let Some(threat) = sim.position(predator) {
                let (tx, ty) = pos.step_away(threat);
                if sim.in_bounds(tx, ty) && !sim.has_animal_at(tx, ty) {
                    sim.move_entity(entity, tx, ty);
                }
            }
            return;
        }
    }

    // 2) Forage: step toward the nearest plant. Only another animal blocks
    // the step; a blocked forage falls through to grouping.
    if let Some(plant) = sim.find_nearest(entity, Species::is_vegetation) {
        if sim.distance(entity, plant).is_some_and(|d| d > 1) {
            if let Some(target) = sim.position(plant) {
                let (tx, ty) = pos.step_toward(target);
                if !sim.has_animal_at(tx, ty) {
                    sim.move_entity(entity, tx, ty);
                    return;
                }
            }
        }
    }

    // 3) Group: close ranks with the nearest herd-mate. Vegetation on the
    // way is eaten while entering; another animal blocks the step and ends
    // the movement phase.
    if let Some(buddy) = sim.find_nearest(entity, Species::is_herbivore) {
        let in_range = sim
            .distance(entity, buddy)
            .is_some_and(|d| d > 1 && d <= GROUP_DISTANCE);
        if in_range {
            if let Some(target) = sim.position(buddy) {
                let (tx, ty) = pos.step_toward(target);
                if sim.in_bounds(tx, ty) {
                    if let Some(plant) = sim.first_at(tx, ty, Species::is_vegetation) {
                        sim.consume(entity, plant);
                        sim.move_entity(entity, tx, ty);
                    } else if !sim.has_animal_at(tx, ty) {
                        sim.move_entity(entity, tx, ty);
                    }
                }
            }
            return;
        }
    }

    // 4) Wander: first direction holding vegetation (eaten on entry) or
    // nothing at all; otherwise stay in place.
    let mut directions = CARDINALS;
    directions.shuffle(&mut rand::thread_rng());
    for (dx, dy) in directions {
        let (tx, ty) = (pos.x + dx, pos.y + dy);
        if !sim.in_bounds(tx, ty) {
            continue;
        }
        if let Some(plant) = sim.first_at(tx, ty, Species::is_vegetation) {
            sim.consume(entity, plant);
            sim.move_entity(entity, tx, ty);
            return;
        }
        if sim.has_animal_at(tx, ty) {
            continue;
        }
        sim.move_entity(entity, tx, ty);
        return;
    }
}
