//! Per-species tick routines, plus the lifecycle and reproduction helpers
//! they share.

use hecs::Entity;

use crate::components::{Hunger, ReproductionClock, Species, Vitals};
use crate::world::SimulationWorld;

pub mod carnivore;
pub mod herbivore;
pub mod vegetation;

pub use carnivore::tick_carnivore;
pub use herbivore::tick_herbivore;
pub use vegetation::tick_vegetation;

/// Outcome of scanning adjacent cells for a mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MateSearch {
    /// A partner was found; the scan stopped there. `births` is 1 when a
    /// child was actually placed, 0 when no empty cell was available.
    Matched { births: u32 },
    NoPartner,
}

/// One tick of aging for an animal: age and hunger advance, health drains.
/// Returns true when a death threshold was crossed; the caller removes the
/// entity.
pub(crate) fn age_and_decay(sim: &mut SimulationWorld, entity: Entity, drain: f32) -> bool {
    let expired = match sim.world.get::<&mut Vitals>(entity) {
        Ok(mut vitals) => {
            vitals.age += 1;
            vitals.health -= drain;
            vitals.expired()
        }
        Err(_) => return false,
    };
    if let Ok(mut hunger) = sim.world.get::<&mut Hunger>(entity) {
        hunger.0 += 1;
    }
    expired
}

/// Reset an animal's hunger after feeding.
pub(crate) fn reset_hunger(sim: &mut SimulationWorld, entity: Entity) {
    if let Ok(mut hunger) = sim.world.get::<&mut Hunger>(entity) {
        hunger.0 = 0;
    }
}

/// Whether an animal currently qualifies to reproduce: hunger below the
/// species threshold, health above the species floor, cooldown elapsed.
pub(crate) fn reproduction_ready(
    sim: &SimulationWorld,
    entity: Entity,
    hunger_threshold: f64,
    health_floor: f32,
    now: u64,
    cooldown_ticks: u64,
) -> bool {
    let Ok(hunger) = sim.world.get::<&Hunger>(entity) else {
        return false;
    };
    let Ok(vitals) = sim.world.get::<&Vitals>(entity) else {
        return false;
    };
    let Ok(clock) = sim.world.get::<&ReproductionClock>(entity) else {
        return false;
    };
    (hunger.0 as f64) < hunger_threshold
        && vitals.health > health_floor
        && clock.ready(now, cooldown_ticks)
}

/// Scan the 4 adjacent cells in fixed order for another eligible animal of
/// the same species. On the first match, spawn one child at an empty cell
/// adjacent to the acting parent, falling back to the partner's
/// neighborhood, stamp both clocks, and stop scanning. A match with no free
/// cell still ends the scan, but stamps nothing.
pub(crate) fn try_reproduce(
    sim: &mut SimulationWorld,
    entity: Entity,
    species: Species,
    hunger_threshold: f64,
    health_floor: f32,
) -> MateSearch {
    let now = sim.current_tick();
    let cooldown = sim.config().cooldown_ticks();
    if !reproduction_ready(sim, entity, hunger_threshold, health_floor, now, cooldown) {
        return MateSearch::NoPartner;
    }
    let Some(pos) = sim.position(entity) else {
        return MateSearch::NoPartner;
    };

    for (dx, dy) in crate::grid::CARDINALS {
        let (nx, ny) = (pos.x + dx, pos.y + dy);
        if !sim.in_bounds(nx, ny) {
            continue;
        }
        let neighbors = sim.occupants(nx, ny).to_vec();
        for partner in neighbors {
            if sim.species(partner) != Some(species)
                || !reproduction_ready(sim, partner, hunger_threshold, health_floor, now, cooldown)
            {
                continue;
            }

            let spot = sim.find_empty_adjacent(pos.x, pos.y).or_else(|| {
                sim.position(partner)
                    .and_then(|p| sim.find_empty_adjacent(p.x, p.y))
            });
            let mut births = 0;
            if let Some(cell) = spot {
                let child = match species {
                    Species::Herbivore => sim.spawn_herbivore(cell.x, cell.y),
                    Species::Carnivore => sim.spawn_carnivore(cell.x, cell.y),
                    Species::Vegetation => None,
                };
                if child.is_some() {
                    sim.stamp_reproduction(entity, now);
                    sim.stamp_reproduction(partner, now);
                    births = 1;
                }
            }
            return MateSearch::Matched { births };
        }
    }
    MateSearch::NoPartner
}
