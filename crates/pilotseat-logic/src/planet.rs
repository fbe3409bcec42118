//! Planet catalog: static celestial-body records the scanner sweeps.
//!
//! A catalog is an ordered, read-only list of [`Planet`] records built once.
//! Planets are referred to by [`PlanetId`] (their index in the catalog), so
//! two bodies with identical attributes are still distinct entries.
//!
//! ```
//! use pilotseat_logic::planet::PlanetCatalog;
//!
//! let catalog = PlanetCatalog::reference();
//! assert_eq!(catalog.len(), 8);
//! let (id, terra) = catalog.find_by_name("Terra Nova").unwrap();
//! assert_eq!(catalog.get(id).unwrap().name, terra.name);
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{atmosphere_codes, limits};

// ============================================================================
// ATMOSPHERE
// ============================================================================

/// Atmosphere classification of a planet's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Atmosphere {
    None = atmosphere_codes::NONE,
    Thin = atmosphere_codes::THIN,
    Breathable = atmosphere_codes::BREATHABLE,
    Toxic = atmosphere_codes::TOXIC,
}

impl Atmosphere {
    /// Human-readable label for the scanner readout.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Thin => "Thin",
            Self::Breathable => "Breathable",
            Self::Toxic => "Toxic",
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            atmosphere_codes::NONE => Some(Self::None),
            atmosphere_codes::THIN => Some(Self::Thin),
            atmosphere_codes::BREATHABLE => Some(Self::Breathable),
            atmosphere_codes::TOXIC => Some(Self::Toxic),
            _ => None,
        }
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// PLANET
// ============================================================================

/// Static description of a single celestial body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Orbital distance from the star in AU.
    pub distance_au: f32,
    /// Mean radius in kilometers.
    pub radius_km: f32,
    /// Surface temperature in Kelvin.
    pub surface_temp_k: f32,
    /// Surface gravity in multiples of Earth gravity.
    pub gravity_g: f32,
    pub atmosphere: Atmosphere,
    pub has_water: bool,
    pub has_life: bool,
    /// Sidereal rotation period in hours.
    pub rotation_period_h: f32,
    /// Resource richness score (0-100).
    pub resource_richness: u8,
}

impl Planet {
    pub fn surface_temp_celsius(&self) -> f32 {
        self.surface_temp_k - limits::KELVIN_OFFSET
    }

    pub fn atmosphere_label(&self) -> &'static str {
        self.atmosphere.label()
    }

    /// Breathable air and liquid water on the surface.
    pub fn is_habitable(&self) -> bool {
        self.atmosphere == Atmosphere::Breathable && self.has_water
    }
}

/// Handle to a planet inside a [`PlanetCatalog`] (its index).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlanetId(usize);

impl PlanetId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// A single planet record that breaks a catalog invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanetIssue {
    /// Record at this index has a blank name.
    EmptyName(usize),
    /// Two records share this name.
    DuplicateName(String),
    NonPositiveDistance { name: String, distance_au: f32 },
    NonPositiveRadius { name: String, radius_km: f32 },
    NegativeGravity { name: String, gravity_g: f32 },
    RichnessOutOfRange { name: String, richness: u8 },
    /// A numeric field is NaN or infinite.
    NonFinite { name: String, field: &'static str },
}

impl fmt::Display for PlanetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName(i) => write!(f, "planet at index {} has an empty name", i),
            Self::DuplicateName(n) => write!(f, "duplicate planet name '{}'", n),
            Self::NonPositiveDistance { name, distance_au } => {
                write!(f, "{}: orbital distance {} AU must be > 0", name, distance_au)
            }
            Self::NonPositiveRadius { name, radius_km } => {
                write!(f, "{}: radius {} km must be > 0", name, radius_km)
            }
            Self::NegativeGravity { name, gravity_g } => {
                write!(f, "{}: gravity {} g must be >= 0", name, gravity_g)
            }
            Self::RichnessOutOfRange { name, richness } => write!(
                f,
                "{}: resource richness {} exceeds {}",
                name,
                richness,
                limits::MAX_RESOURCE_RICHNESS
            ),
            Self::NonFinite { name, field } => write!(f, "{}: {} is not finite", name, field),
        }
    }
}

/// Check every record against the planet invariants, returning all issues found.
pub fn validate_planets(planets: &[Planet]) -> Vec<PlanetIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (i, p) in planets.iter().enumerate() {
        if p.name.trim().is_empty() {
            issues.push(PlanetIssue::EmptyName(i));
        } else if !seen.insert(p.name.as_str()) {
            issues.push(PlanetIssue::DuplicateName(p.name.clone()));
        }

        let numeric = [
            ("distance_au", p.distance_au),
            ("radius_km", p.radius_km),
            ("surface_temp_k", p.surface_temp_k),
            ("gravity_g", p.gravity_g),
            ("rotation_period_h", p.rotation_period_h),
        ];
        for (field, value) in numeric {
            if !value.is_finite() {
                issues.push(PlanetIssue::NonFinite {
                    name: p.name.clone(),
                    field,
                });
            }
        }

        if p.distance_au <= 0.0 {
            issues.push(PlanetIssue::NonPositiveDistance {
                name: p.name.clone(),
                distance_au: p.distance_au,
            });
        }
        if p.radius_km <= 0.0 {
            issues.push(PlanetIssue::NonPositiveRadius {
                name: p.name.clone(),
                radius_km: p.radius_km,
            });
        }
        if p.gravity_g < 0.0 {
            issues.push(PlanetIssue::NegativeGravity {
                name: p.name.clone(),
                gravity_g: p.gravity_g,
            });
        }
        if p.resource_richness > limits::MAX_RESOURCE_RICHNESS {
            issues.push(PlanetIssue::RichnessOutOfRange {
                name: p.name.clone(),
                richness: p.resource_richness,
            });
        }
    }

    issues
}

/// Failure to build a catalog from data.
#[derive(Debug)]
pub enum CatalogError {
    Json(serde_json::Error),
    Invalid(Vec<PlanetIssue>),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Json(e) => write!(f, "Catalog parse error: {}", e),
            CatalogError::Invalid(issues) => {
                write!(f, "Catalog has {} invalid record(s)", issues.len())?;
                for issue in issues {
                    write!(f, "; {}", issue)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Json(e) => Some(e),
            CatalogError::Invalid(_) => None,
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// Ordered, immutable set of planets available to the scanner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanetCatalog {
    planets: Vec<Planet>,
}

impl PlanetCatalog {
    /// Build a catalog, rejecting records that break the planet invariants.
    pub fn new(planets: Vec<Planet>) -> Result<Self, CatalogError> {
        let issues = validate_planets(&planets);
        if !issues.is_empty() {
            return Err(CatalogError::Invalid(issues));
        }
        Ok(Self { planets })
    }

    /// Parse a JSON array of planet records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let planets: Vec<Planet> = serde_json::from_str(json)?;
        Self::new(planets)
    }

    /// The eight stock bodies shipped with the game.
    pub fn reference() -> Self {
        Self {
            planets: reference_planets(),
        }
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    pub fn get(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id.index())
    }

    pub fn contains(&self, id: PlanetId) -> bool {
        id.index() < self.planets.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<(PlanetId, &Planet)> {
        self.iter().find(|(_, p)| p.name == name)
    }

    /// Planets in catalog order, paired with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (PlanetId, &Planet)> + '_ {
        self.planets
            .iter()
            .enumerate()
            .map(|(i, p)| (PlanetId::new(i), p))
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }
}

#[allow(clippy::too_many_arguments)]
fn planet(
    name: &str,
    distance_au: f32,
    radius_km: f32,
    surface_temp_k: f32,
    gravity_g: f32,
    atmosphere: Atmosphere,
    has_water: bool,
    has_life: bool,
    rotation_period_h: f32,
    resource_richness: u8,
) -> Planet {
    Planet {
        name: name.to_string(),
        distance_au,
        radius_km,
        surface_temp_k,
        gravity_g,
        atmosphere,
        has_water,
        has_life,
        rotation_period_h,
        resource_richness,
    }
}

/// Reference bodies: temperate, arid, toxic, icy, oceanic, rocky, volcanic, gas giant.
pub fn reference_planets() -> Vec<Planet> {
    use Atmosphere::*;
    vec![
        planet("Terra Nova", 1.0, 6371.0, 288.0, 1.0, Breathable, true, true, 24.0, 85),
        planet("Aridus Prime", 1.5, 3396.0, 210.0, 0.38, Thin, false, false, 24.6, 60),
        planet("Vulcanis", 0.7, 6051.0, 737.0, 0.91, Toxic, false, false, 5832.0, 40),
        planet("Glacius", 5.2, 2634.0, 110.0, 0.13, None, true, false, 84.0, 75),
        planet("Aquarius", 1.2, 8000.0, 280.0, 1.2, Breathable, true, true, 18.0, 90),
        planet("Cimmeria", 2.8, 4500.0, 180.0, 0.55, None, false, false, 36.0, 70),
        planet("Inferno", 0.3, 6000.0, 1500.0, 0.95, Toxic, false, false, 12.0, 95),
        // Gas giant with an orbital station
        planet("Neptunus Station", 30.0, 24622.0, 55.0, 1.14, Breathable, false, false, 16.0, 50),
    ]
}
