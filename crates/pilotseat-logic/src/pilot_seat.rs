//! Pilot seat controller: per-frame input façade over a [`Ship`].
//!
//! The presentation layer writes stick and throttle values through the
//! setters whenever input events arrive, then calls [`PilotSeat::tick`] once
//! per frame. Telemetry getters read straight through to the ship.
//!
//! The seat is either active or inactive. Only `tick` is gated: setters,
//! selection and telemetry keep working while inactive, so the last readout
//! stays on screen after the pilot stands up.
//!
//! ```
//! use pilotseat_logic::pilot_seat::PilotSeat;
//! use pilotseat_logic::planet::PlanetCatalog;
//! use pilotseat_logic::ship::Ship;
//!
//! let mut seat = PilotSeat::new(Ship::default(), PlanetCatalog::reference());
//! seat.activate();
//! seat.set_thrust(1.0);
//! seat.toggle_scanner();
//! seat.tick(1.0 / 60.0);
//! assert!(seat.speed() > 0.0);
//! assert!(!seat.nearby_planets().is_empty());
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::planet::{Planet, PlanetCatalog, PlanetId};
use crate::ship::{Orientation, Ship};

/// Latest control values from the pilot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    /// Throttle, 0..=1.
    pub thrust: f32,
    /// Stick deflections, -1..=1.
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// One-shot readout of the ship for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub speed: f32,
    pub fuel: f32,
    pub hull_integrity: f32,
    pub shield_power: f32,
    pub energy: f32,
    pub position: Vec3,
    pub orientation: Orientation,
}

fn clamp_input(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(lo, hi)
    }
}

/// A pilot session bound to one ship and one planet catalog.
#[derive(Debug, Clone)]
pub struct PilotSeat {
    ship: Ship,
    catalog: PlanetCatalog,
    active: bool,
    inputs: ControlInputs,
    scanner_visible: bool,
    selected: Option<PlanetId>,
}

impl PilotSeat {
    /// Seat a pilot in `ship`, scanning against `catalog`. Starts inactive.
    pub fn new(ship: Ship, catalog: PlanetCatalog) -> Self {
        Self {
            ship,
            catalog,
            active: false,
            inputs: ControlInputs::default(),
            scanner_visible: false,
            selected: None,
        }
    }

    // ── Session lifecycle ────────────────────────────────────────────────

    /// Take the seat: neutral controls, scanner hidden, nothing selected.
    /// Ship state carries over from any previous session.
    pub fn activate(&mut self) {
        if !self.active {
            log::debug!("pilot seat activated");
        }
        self.active = true;
        self.scanner_visible = false;
        self.selected = None;
        self.inputs = ControlInputs::default();
    }

    /// Leave the seat. Further ticks do nothing until reactivated.
    pub fn deactivate(&mut self) {
        if self.active {
            log::debug!("pilot seat deactivated");
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Run one frame: integrate, apply stored inputs, rescan if the scanner is up.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        let ControlInputs {
            thrust,
            pitch,
            yaw,
            roll,
        } = self.inputs;

        self.ship.tick(dt);
        self.ship.apply_thrust(thrust, dt);
        self.ship.apply_rotation(pitch, yaw, roll, dt);

        if self.scanner_visible {
            self.ship.scan(&self.catalog);
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn set_thrust(&mut self, power: f32) {
        self.inputs.thrust = clamp_input(power, 0.0, 1.0);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.inputs.pitch = clamp_input(pitch, -1.0, 1.0);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.inputs.yaw = clamp_input(yaw, -1.0, 1.0);
    }

    pub fn set_roll(&mut self, roll: f32) {
        self.inputs.roll = clamp_input(roll, -1.0, 1.0);
    }

    pub fn inputs(&self) -> ControlInputs {
        self.inputs
    }

    // ── Scanner & selection ──────────────────────────────────────────────

    pub fn toggle_scanner(&mut self) {
        self.scanner_visible = !self.scanner_visible;
    }

    pub fn scanner_visible(&self) -> bool {
        self.scanner_visible
    }

    /// Select a destination. Handles outside the bound catalog are ignored;
    /// returns whether the selection took.
    pub fn select_planet(&mut self, id: PlanetId) -> bool {
        if !self.catalog.contains(id) {
            log::debug!("ignoring selection of unknown planet {}", id);
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn deselect_planet(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<PlanetId> {
        self.selected
    }

    pub fn selected_planet(&self) -> Option<&Planet> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    // ── Telemetry ────────────────────────────────────────────────────────

    pub fn speed(&self) -> f32 {
        self.ship.speed()
    }

    pub fn fuel(&self) -> f32 {
        self.ship.fuel()
    }

    pub fn hull_integrity(&self) -> f32 {
        self.ship.hull_integrity()
    }

    pub fn shield_power(&self) -> f32 {
        self.ship.shield_power()
    }

    pub fn energy(&self) -> f32 {
        self.ship.energy()
    }

    /// Planets in range as of the last scan, in catalog order.
    pub fn nearby_planets(&self) -> Vec<(PlanetId, &Planet)> {
        self.resolve(self.ship.nearby().iter().copied())
    }

    /// Every planet the scanner has ever picked up, in catalog order.
    pub fn scanned_planets(&self) -> Vec<(PlanetId, &Planet)> {
        self.resolve(self.ship.scanned().iter().copied())
    }

    fn resolve(&self, ids: impl Iterator<Item = PlanetId>) -> Vec<(PlanetId, &Planet)> {
        ids.filter_map(|id| self.catalog.get(id).map(|p| (id, p)))
            .collect()
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            speed: self.ship.speed(),
            fuel: self.ship.fuel(),
            hull_integrity: self.ship.hull_integrity(),
            shield_power: self.ship.shield_power(),
            energy: self.ship.energy(),
            position: self.ship.position(),
            orientation: self.ship.orientation(),
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn catalog(&self) -> &PlanetCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlightConfig;

    fn seat() -> PilotSeat {
        PilotSeat::new(Ship::default(), PlanetCatalog::reference())
    }

    fn active_seat() -> PilotSeat {
        let mut s = seat();
        s.activate();
        s
    }

    #[test]
    fn starts_inactive_and_tick_is_noop() {
        let mut s = seat();
        s.set_thrust(1.0);
        s.tick(1.0);
        assert!(!s.is_active());
        assert_eq!(s.speed(), 0.0);
        assert_eq!(s.energy(), 100.0);
    }

    #[test]
    fn setters_clamp() {
        let mut s = seat();
        s.set_thrust(1.7);
        s.set_pitch(-4.0);
        s.set_yaw(2.0);
        s.set_roll(f32::NAN);
        assert_eq!(
            s.inputs(),
            ControlInputs {
                thrust: 1.0,
                pitch: -1.0,
                yaw: 1.0,
                roll: 0.0,
            }
        );
        s.set_thrust(-0.3);
        assert_eq!(s.inputs().thrust, 0.0);
    }

    #[test]
    fn setters_do_not_touch_ship() {
        let mut s = active_seat();
        s.set_thrust(1.0);
        s.set_yaw(1.0);
        assert_eq!(s.speed(), 0.0);
        assert_eq!(s.ship().orientation(), Orientation::default());
    }

    #[test]
    fn activate_resets_controls_and_ui() {
        let mut s = active_seat();
        s.set_thrust(0.8);
        s.set_roll(0.5);
        s.toggle_scanner();
        assert!(s.select_planet(PlanetId::new(2)));

        s.activate();
        assert_eq!(s.inputs(), ControlInputs::default());
        assert!(!s.scanner_visible());
        assert!(s.selected_id().is_none());
    }

    #[test]
    fn activate_keeps_ship_state() {
        let mut s = active_seat();
        s.set_thrust(1.0);
        s.tick(1.0);
        let energy = s.energy();
        let speed = s.speed();
        s.deactivate();
        s.activate();
        assert_eq!(s.energy(), energy);
        assert_eq!(s.speed(), speed);
    }

    #[test]
    fn tick_runs_thrust_and_rotation() {
        let mut s = active_seat();
        s.set_thrust(1.0);
        s.set_yaw(1.0);
        s.tick(0.5);
        // Thrust fires along the pre-rotation heading.
        assert!((s.ship().velocity().z + 5.0).abs() < 1e-4);
        assert!((s.ship().orientation().yaw - 45.0).abs() < 1e-4);
        // Regen capped at 100, then 2.5 spent.
        assert!((s.energy() - 97.5).abs() < 1e-4);
    }

    #[test]
    fn deactivate_freezes_telemetry() {
        let mut s = active_seat();
        s.set_thrust(1.0);
        s.toggle_scanner();
        s.tick(0.25);
        s.deactivate();
        let before = s.telemetry();
        let nearby = s.nearby_planets().len();
        s.tick(1.0);
        s.tick(5.0);
        assert_eq!(s.telemetry(), before);
        assert_eq!(s.nearby_planets().len(), nearby);
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut s = seat();
        s.deactivate();
        assert!(!s.is_active());
        s.activate();
        s.activate();
        assert!(s.is_active());
        s.deactivate();
        s.deactivate();
        assert!(!s.is_active());
    }

    #[test]
    fn scanner_only_scans_when_visible() {
        let mut s = active_seat();
        s.tick(0.1);
        assert!(s.nearby_planets().is_empty());
        s.toggle_scanner();
        s.tick(0.1);
        assert_eq!(s.nearby_planets().len(), 7);
        assert_eq!(s.scanned_planets().len(), 7);
        s.toggle_scanner();
        assert!(!s.scanner_visible());
    }

    #[test]
    fn nearby_in_catalog_order() {
        let mut s = active_seat();
        s.toggle_scanner();
        s.tick(0.1);
        let names: Vec<&str> = s
            .nearby_planets()
            .iter()
            .map(|(_, p)| p.name.as_str())
            .collect();
        assert_eq!(names[0], "Terra Nova");
        assert!(!names.contains(&"Neptunus Station"));
    }

    #[test]
    fn selection_is_a_handle_into_catalog() {
        let mut s = seat();
        let (id, _) = s.catalog().find_by_name("Glacius").unwrap();
        assert!(s.select_planet(id));
        assert_eq!(s.selected_planet().unwrap().name, "Glacius");
        assert!(!s.select_planet(PlanetId::new(99)));
        // Rejected handle leaves the previous selection in place.
        assert_eq!(s.selected_id(), Some(id));
        s.deselect_planet();
        assert!(s.selected_planet().is_none());
    }

    #[test]
    fn selection_never_moves_the_ship() {
        let mut s = active_seat();
        s.select_planet(PlanetId::new(0));
        s.toggle_scanner();
        assert_eq!(s.speed(), 0.0);
        assert!(s.ship().scanned().is_empty());
    }

    #[test]
    fn telemetry_matches_getters() {
        let mut s = PilotSeat::new(
            Ship::new(FlightConfig {
                initial_fuel: 70.0,
                initial_shield_power: 40.0,
                ..FlightConfig::default()
            }),
            PlanetCatalog::reference(),
        );
        s.activate();
        s.set_thrust(0.5);
        s.tick(0.2);
        let t = s.telemetry();
        assert_eq!(t.speed, s.speed());
        assert_eq!(t.fuel, 70.0);
        assert_eq!(t.shield_power, 40.0);
        assert_eq!(t.hull_integrity, s.hull_integrity());
        assert_eq!(t.energy, s.energy());
    }

    #[test]
    fn telemetry_serializes() {
        let s = seat();
        let json = serde_json::to_string(&s.telemetry()).unwrap();
        assert!(json.contains("\"energy\":100.0"));
        assert!(json.contains("\"orientation\""));
    }
}
