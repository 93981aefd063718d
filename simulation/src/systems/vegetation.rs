//! Vegetation behavior: passive aging and occasional regrowth, no movement.

use hecs::Entity;
use rand::Rng;

use crate::components::{FoodValue, Position, Species, Vitals};
use crate::world::SimulationWorld;

pub const INITIAL_HEALTH: f32 = 5.0;
pub const LIFESPAN: u32 = 100;
pub const FOOD_VALUE: f32 = 3.0;

/// Chance per tick of regrowing one point of health.
pub const REGROWTH_CHANCE: f64 = 0.1;
/// Regrowth cap.
pub const MAX_HEALTH: f32 = 10.0;

/// Component bundle for a freshly sprouted plant.
pub fn bundle(x: i32, y: i32) -> (Position, Species, Vitals, FoodValue) {
    (
        Position::new(x, y),
        Species::Vegetation,
        Vitals::new(INITIAL_HEALTH, LIFESPAN),
        FoodValue(FOOD_VALUE),
    )
}

/// One tick for a plant: age, die of old age, or occasionally regrow.
pub fn tick_vegetation(sim: &mut SimulationWorld, entity: Entity) {
    let expired = match sim.world.get::<&mut Vitals>(entity) {
        Ok(mut vitals) => {
            vitals.age += 1;
            if vitals.age >= vitals.lifespan {
                true
            } else {
                if rand::thread_rng().gen::<f64>() < REGROWTH_CHANCE {
                    vitals.health = (vitals.health + 1.0).min(MAX_HEALTH);
                }
                false
            }
        }
        Err(_) => return,
    };
    if expired {
        sim.remove_entity(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    fn quiet_world() -> SimulationWorld {
        let config = SimulationConfig {
            plant_spawn_rate: 0.0,
            ..Default::default()
        };
        SimulationWorld::with_config(10, 10, config)
    }

    #[test]
    fn test_ages_and_stays_put() {
        let mut sim = quiet_world();
        let veg = sim.spawn_vegetation(4, 4).unwrap();

        tick_vegetation(&mut sim, veg);
        let vitals = *sim.world.get::<&Vitals>(veg).unwrap();
        assert_eq!(vitals.age, 1);
        assert_eq!(sim.position(veg), Some(Position::new(4, 4)));
    }

    #[test]
    fn test_dies_at_lifespan() {
        let mut sim = quiet_world();
        let veg = sim.spawn_vegetation(4, 4).unwrap();
        sim.world.get::<&mut Vitals>(veg).unwrap().age = LIFESPAN - 1;

        tick_vegetation(&mut sim, veg);
        assert!(!sim.world.contains(veg));
        assert!(sim.occupants(4, 4).is_empty());
    }

    #[test]
    fn test_regrowth_capped() {
        let mut sim = quiet_world();
        let veg = sim.spawn_vegetation(4, 4).unwrap();
        sim.world.get::<&mut Vitals>(veg).unwrap().health = MAX_HEALTH;

        // Regrowth is probabilistic; over many ticks health may rise but
        // never past the cap.
        for _ in 0..50 {
            tick_vegetation(&mut sim, veg);
        }
        assert!(sim.health(veg).unwrap() <= MAX_HEALTH);
    }
}
