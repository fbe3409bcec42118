//! Pure flight logic for PilotSeat.
//!
//! This crate contains the ship simulation behind the pilot-seat mini-game,
//! independent of any browser, renderer, or runtime. The host feeds it
//! per-frame inputs and a planet catalog and reads back telemetry, making
//! everything unit-testable and portable to WASM or native tools.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Flight parameters, starting gauges, validation |
//! | [`constants`] | Physics tuning, gauge limits, defaults, atmosphere codes |
//! | [`pilot_seat`] | Session façade: inputs, scanner/selection state, telemetry |
//! | [`planet`] | Planet records, catalog, reference bodies |
//! | [`ship`] | Motion integration, energy-gated thrust, rotation, scanning |
//!
//! # Threading
//!
//! Everything is synchronous and single-owner. A [`ship::Ship`] or
//! [`pilot_seat::PilotSeat`] is mutated only through `&mut self` from the
//! frame-update call site; share one across threads only behind a lock.

pub mod config;
pub mod constants;
pub mod pilot_seat;
pub mod planet;
pub mod ship;
