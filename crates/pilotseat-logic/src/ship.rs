//! Ship flight dynamics: motion integration, energy-gated thrust, scanning.
//!
//! The host calls [`Ship::tick`] once per rendered frame with the measured
//! frame interval, then applies the pilot's thrust and rotation inputs.
//! There is no internal clock; everything advances only through `dt`.
//!
//! # Frame Order
//!
//! 1. `tick(dt)`: regenerate energy, move by velocity, apply drag
//! 2. `apply_thrust(power, dt)`: spend energy, accelerate along the nose
//! 3. `apply_rotation(pitch, yaw, roll, dt)`: turn the ship
//! 4. `scan(catalog)`: optional, refreshes the nearby set
//!
//! Negative, NaN or infinite `dt` is treated as zero.

use std::collections::BTreeSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{validate_config, FlightConfig};
use crate::constants::{limits, physics};
use crate::planet::{PlanetCatalog, PlanetId};

/// Ship attitude in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Nose up/down, clamped to ±90.
    pub pitch: f32,
    /// Heading, wrapped into [0, 360).
    pub yaw: f32,
    /// Bank angle, unconstrained.
    pub roll: f32,
}

impl Orientation {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Clamp pitch and wrap yaw into their legal ranges.
    pub fn normalized(self) -> Self {
        Self {
            pitch: clamp_pitch(self.pitch),
            yaw: wrap_yaw(self.yaw),
            roll: self.roll,
        }
    }

    /// Unit thrust direction for this attitude. Roll does not tilt it.
    ///
    /// Heading 0 with level pitch points along −Z; positive yaw swings the
    /// nose toward +X; positive pitch dips it toward −Y.
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.sin() * pitch.cos(),
            -pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }
}

/// Clamp a pitch angle to ±90 degrees. NaN levels the nose to 0.
pub fn clamp_pitch(pitch: f32) -> f32 {
    if pitch.is_nan() {
        return 0.0;
    }
    pitch.clamp(-limits::PITCH_LIMIT_DEG, limits::PITCH_LIMIT_DEG)
}

/// Wrap a heading into [0, 360) by repeated whole turns.
///
/// Huge magnitudes are pre-reduced first: past ~1e6 degrees an f32 no longer
/// changes when 360 is subtracted. Non-finite headings reset to 0.
pub fn wrap_yaw(yaw: f32) -> f32 {
    if !yaw.is_finite() {
        return 0.0;
    }
    let mut yaw = if yaw.abs() >= limits::YAW_PREREDUCE_DEG {
        yaw.rem_euclid(limits::FULL_TURN_DEG)
    } else {
        yaw
    };
    while yaw < 0.0 {
        yaw += limits::FULL_TURN_DEG;
    }
    while yaw >= limits::FULL_TURN_DEG {
        yaw -= limits::FULL_TURN_DEG;
    }
    yaw
}

fn clamp_gauge(value: f32) -> f32 {
    value.clamp(limits::GAUGE_MIN, limits::GAUGE_MAX)
}

/// Negative, NaN and infinite frame intervals count as zero elapsed time.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        if dt != 0.0 {
            log::trace!("ignoring invalid frame interval {dt}");
        }
        0.0
    }
}

/// The player's ship: kinematics, resource gauges and scanner memory.
#[derive(Debug, Clone)]
pub struct Ship {
    config: FlightConfig,
    position: Vec3,
    velocity: Vec3,
    orientation: Orientation,
    fuel: f32,
    hull_integrity: f32,
    shield_power: f32,
    energy: f32,
    scanner_range: f32,
    /// Planets in range as of the last scan.
    nearby: BTreeSet<PlanetId>,
    /// Every planet ever seen in range.
    scanned: BTreeSet<PlanetId>,
}

impl Ship {
    /// Build a ship at the origin, at rest, heading 0.
    ///
    /// `config` must pass [`validate_config`]; a NaN rate or a negative
    /// max speed would corrupt every later step. Debug builds assert this.
    pub fn new(config: FlightConfig) -> Self {
        debug_assert!(
            validate_config(&config).is_empty(),
            "invalid flight config: {:?}",
            validate_config(&config)
        );
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            orientation: Orientation::default(),
            fuel: clamp_gauge(config.initial_fuel),
            hull_integrity: clamp_gauge(config.initial_hull_integrity),
            shield_power: clamp_gauge(config.initial_shield_power),
            energy: clamp_gauge(config.initial_energy),
            scanner_range: config.scanner_range.max(0.0),
            nearby: BTreeSet::new(),
            scanned: BTreeSet::new(),
            config,
        }
    }

    /// Start from a given attitude (normalized into legal ranges).
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation.normalized();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    // ── Per-frame operations ─────────────────────────────────────────────

    /// Advance the ship by `dt` seconds.
    ///
    /// Energy regenerates (capped at 100), position integrates the current
    /// velocity, then velocity takes one fixed drag step. `dt == 0` does
    /// nothing at all.
    pub fn tick(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        if dt == 0.0 {
            return;
        }

        self.energy = clamp_gauge(self.energy + self.config.energy_regen_rate * dt);
        self.position += self.velocity * dt;
        self.velocity *= physics::DAMPING_PER_TICK;
    }

    /// Fire the main thruster at `power` (clamped to 0..=1) for `dt` seconds.
    ///
    /// All or nothing: below the minimum energy floor, or when the full cost
    /// cannot be paid, neither velocity nor energy changes. Returns whether
    /// the thruster fired.
    pub fn apply_thrust(&mut self, power: f32, dt: f32) -> bool {
        let dt = sanitize_dt(dt);
        if self.energy < physics::MIN_THRUST_ENERGY {
            log::trace!("thrust refused: energy {:.2} below floor", self.energy);
            return false;
        }

        let power = if power.is_nan() { 0.0 } else { power.clamp(0.0, 1.0) };
        let cost = power * physics::THRUST_ENERGY_PER_SECOND * dt;
        if self.energy < cost {
            log::trace!(
                "thrust refused: energy {:.2} short of cost {:.2}",
                self.energy,
                cost
            );
            return false;
        }

        self.velocity += self.forward() * self.config.acceleration * power * dt;
        let max_speed = self.config.max_speed;
        if self.velocity.length() > max_speed {
            self.velocity = self.velocity.normalize() * max_speed;
        }
        self.energy = clamp_gauge(self.energy - cost);
        true
    }

    /// Turn the ship. Inputs are stick deflections, expected in -1..=1.
    pub fn apply_rotation(&mut self, pitch: f32, yaw: f32, roll: f32, dt: f32) {
        let dt = sanitize_dt(dt);
        let rate = self.config.angular_rate * dt;
        let current = self.orientation;

        self.orientation = Orientation {
            pitch: clamp_pitch(current.pitch + pitch * rate),
            yaw: wrap_yaw(current.yaw + yaw * rate),
            roll: current.roll + roll * rate,
        };
    }

    /// Rebuild the nearby set from `catalog` and fold it into the scan history.
    ///
    /// Scan distance is the planet's orbital distance converted from AU, not
    /// a true 3D separation from the ship.
    pub fn scan(&mut self, catalog: &PlanetCatalog) {
        self.nearby.clear();

        for (id, planet) in catalog.iter() {
            let distance = planet.distance_au * physics::SCAN_UNITS_PER_AU;
            if distance <= self.scanner_range {
                self.nearby.insert(id);
            }
        }

        for &id in &self.nearby {
            if self.scanned.insert(id) {
                if let Some(p) = catalog.get(id) {
                    log::info!("scanner discovered {} ({})", p.name, id);
                }
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current thrust direction.
    pub fn forward(&self) -> Vec3 {
        self.orientation.forward()
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn hull_integrity(&self) -> f32 {
        self.hull_integrity
    }

    pub fn shield_power(&self) -> f32 {
        self.shield_power
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn scanner_range(&self) -> f32 {
        self.scanner_range
    }

    /// Retune the scanner. Takes effect on the next scan.
    pub fn set_scanner_range(&mut self, range: f32) {
        self.scanner_range = if range.is_nan() { 0.0 } else { range.max(0.0) };
    }

    pub fn nearby(&self) -> &BTreeSet<PlanetId> {
        &self.nearby
    }

    pub fn scanned(&self) -> &BTreeSet<PlanetId> {
        &self.scanned
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new(FlightConfig::default())
    }
}
