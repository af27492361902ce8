/// Fixed thresholds of the drone policy.
///
/// Everything the decision code compares against lives here so the bot, the
/// simulator and the tests can agree on one set of numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Longest move a drone makes in one turn.
    pub max_step: f64,

    /// Illumination needs strictly more battery than this.
    pub light_battery: i32,

    /// Illumination is only worth it for targets strictly farther than this.
    pub light_distance: f64,

    /// Drones above this depth explore sideways while diving.
    pub shallow_depth: i32,
    pub explore_dx: i32,
    pub explore_dy: i32,

    /// Moves landing this close to a border get pulled back inside.
    pub edge_margin: i32,
    pub edge_snap_low: i32,
    pub edge_snap_high: i32,

    /// Pursuit weight per creature type, indexed by type.
    pub type_priority: [u32; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_step: 600.,
            light_battery: 10,
            light_distance: 500.,
            shallow_depth: 2500,
            explore_dx: 2000,
            explore_dy: 1000,
            edge_margin: 100,
            edge_snap_low: 1000,
            edge_snap_high: 9000,
            type_priority: [1, 2, 3],
        }
    }
}

impl Tuning {
    /// Weight of a creature type. Types outside the table (monsters come in
    /// as type -1) weigh 0: still candidates, but any fish outscores them.
    pub fn priority(&self, typ: i8) -> u32 {
        usize::try_from(typ)
            .ok()
            .and_then(|idx| self.type_priority.get(idx).copied())
            .unwrap_or(0)
    }
}
