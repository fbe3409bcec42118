//! Flight constants: physics tuning, gauge limits, default ship parameters.
//!
//! Plain numeric constants with no engine dependency. The ship model, the
//! config validator, and the headless harness all read from here.

pub mod physics {
    /// Multiplicative velocity drag applied once per `Ship::tick` call.
    ///
    /// Not normalized to `dt`, so effective drag depends on the host frame
    /// rate. Kept per-call for behavioral compatibility with the shipped game.
    /// The candidate fix is `DAMPING_PER_TICK.powf(dt * REFERENCE_FRAME_RATE)`,
    /// which matches today's drag at 60 fps.
    pub const DAMPING_PER_TICK: f32 = 0.98;
    /// Frame rate the per-tick drag was tuned at.
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;
    /// Energy spent per second of full-power thrust.
    pub const THRUST_ENERGY_PER_SECOND: f32 = 5.0;
    /// Below this energy level the thrusters refuse to fire at all.
    pub const MIN_THRUST_ENERGY: f32 = 1.0;
    /// Scanner distance units per astronomical unit.
    pub const SCAN_UNITS_PER_AU: f32 = 149.6;
}

pub mod limits {
    /// Upper bound shared by fuel, hull, shield and energy gauges.
    pub const GAUGE_MAX: f32 = 100.0;
    pub const GAUGE_MIN: f32 = 0.0;
    /// Pitch is clamped to ±this many degrees.
    pub const PITCH_LIMIT_DEG: f32 = 90.0;
    pub const FULL_TURN_DEG: f32 = 360.0;
    /// Beyond this magnitude yaw is pre-reduced before iterative wrapping,
    /// since subtracting 360 from a huge f32 no longer changes it.
    pub const YAW_PREREDUCE_DEG: f32 = 1.0e6;
    /// Highest resource richness score a planet may carry.
    pub const MAX_RESOURCE_RICHNESS: u8 = 100;
    /// Kelvin offset for Celsius conversion.
    pub const KELVIN_OFFSET: f32 = 273.15;
}

pub mod defaults {
    /// Units per second.
    pub const MAX_SPEED: f32 = 50.0;
    /// Units per second squared at full thrust.
    pub const ACCELERATION: f32 = 10.0;
    /// Degrees per second at full stick deflection.
    pub const ANGULAR_RATE: f32 = 90.0;
    /// Energy per second.
    pub const ENERGY_REGEN_RATE: f32 = 5.0;
    /// Scanner distance units.
    pub const SCANNER_RANGE: f32 = 1000.0;
    pub const FUEL: f32 = 100.0;
    pub const HULL_INTEGRITY: f32 = 100.0;
    pub const SHIELD_POWER: f32 = 100.0;
    pub const ENERGY: f32 = 100.0;
}

/// Atmosphere classification codes as stored in catalog data.
pub mod atmosphere_codes {
    pub const NONE: u8 = 0;
    pub const THIN: u8 = 1;
    pub const BREATHABLE: u8 = 2;
    pub const TOXIC: u8 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scan_conversion() {
        assert!((1.0 * physics::SCAN_UNITS_PER_AU - 149.6).abs() < 1e-4);
        assert!((30.0 * physics::SCAN_UNITS_PER_AU - 4488.0).abs() < 1e-2);
    }

    #[test]
    fn defaults_fit_gauges() {
        for g in [
            defaults::FUEL,
            defaults::HULL_INTEGRITY,
            defaults::SHIELD_POWER,
            defaults::ENERGY,
        ] {
            assert!((limits::GAUGE_MIN..=limits::GAUGE_MAX).contains(&g));
        }
    }

    #[test]
    fn damping_is_a_drag() {
        assert!(physics::DAMPING_PER_TICK > 0.0 && physics::DAMPING_PER_TICK < 1.0);
    }

    #[test]
    fn normalized_damping_matches_per_tick_at_reference_rate() {
        let dt = 1.0 / physics::REFERENCE_FRAME_RATE;
        let normalized = physics::DAMPING_PER_TICK.powf(dt * physics::REFERENCE_FRAME_RATE);
        assert!((normalized - physics::DAMPING_PER_TICK).abs() < 1e-6);
    }
}
