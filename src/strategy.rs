use super::*;

/// Greedy per-drone policy: chase the best visible creature, explore
/// otherwise. Drones do not coordinate.
pub struct Strategy {
    pub tuning: Tuning,
}

impl Strategy {
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    pub fn with_tuning(tuning: Tuning) -> Self {
        Strategy { tuning }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy {
    pub fn decide(&self, drone: &Drone, world: &World) -> Decision {
        if drone.emergency {
            return Decision::Surface;
        }

        match select_target(drone, world, &self.tuning) {
            Some(target) => Decision::Pursue {
                light: use_light(drone, &target, &self.tuning),
                target,
            },
            None => Decision::Explore {
                waypoint: explore(drone.pos, &self.tuning),
            },
        }
    }

    /// One command per owned drone, in feed order.
    pub fn play(&self, world: &World) -> Vec<Command> {
        let commands: Vec<Command> = world
            .me
            .drones
            .iter()
            .map(|drone| {
                let decision = self.decide(drone, world);
                let cmd = plan(drone.pos, &decision, &self.tuning);
                tracing::debug!(drone = drone.id, ?decision, %cmd, "drone decision");
                cmd
            })
            .collect();

        tracing::info!(
            turn = world.iter,
            score = world.me.score,
            foe_score = world.opponent.score,
            visible = world.visible.len(),
            "planned {} moves",
            commands.len()
        );

        commands
    }
}
