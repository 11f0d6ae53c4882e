//! Body catalog: the sun and the eight planets.
//!
//! Loaded from embedded JSON at startup. Sizes, distances and speeds are
//! scene units tuned for readability, not astronomical values; the text
//! fields are what the info panel shows.

use serde::Deserialize;
use thiserror::Error;

/// Embed the catalog JSON at compile time.
const BODIES_JSON: &str = include_str!("../data/bodies.json");

/// Number of bodies the scene is built for (sun + 8 planets).
pub const BODY_COUNT: usize = 9;

/// Stable index of a body in the catalog (and in the scene's object list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyIndex(pub usize);

/// Errors returned while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{name}: invalid color {value:?} (expected #rrggbb)")]
    BadColor { name: String, value: String },

    #[error("{name}: radius must be positive, got {radius}")]
    BadRadius { name: String, radius: f32 },

    #[error("{name}: orbital distance must be non-negative, got {distance}")]
    NegativeDistance { name: String, distance: f32 },

    #[error("{name}: angular speed must be non-negative, got {speed}")]
    NegativeSpeed { name: String, speed: f32 },

    #[error("{name}: orbiting bodies need both distance and speed")]
    IncompleteOrbit { name: String },

    #[error("catalog has no central star")]
    MissingStar,

    #[error("catalog has more than one central star: {0} and {1}")]
    MultipleStars(String, String),

    #[error("expected {expected} bodies, found {found}")]
    BodyCount { expected: usize, found: usize },
}

/// On-disk shape of one body.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBody {
    name: String,
    radius: f32,
    #[serde(default)]
    distance: Option<f32>,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    color: Option<String>,
    description: String,
    diameter: String,
    day: String,
    year: String,
    temp: String,
    moons: String,
    fact: String,
}

/// Immutable description of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBodyDescriptor {
    pub name: String,
    pub radius: f32,
    /// Orbital radius around the star; `None` for the star itself.
    pub distance: Option<f32>,
    /// Orbital angular speed; `None` for the star itself.
    pub speed: Option<f32>,
    /// Linear RGB in [0, 1]; `None` for the star, which is drawn with its own palette.
    pub color: Option<[f32; 3]>,
    pub description: String,
    pub diameter: String,
    pub day: String,
    pub year: String,
    pub temp: String,
    pub moons: String,
    pub fact: String,
}

impl CelestialBodyDescriptor {
    pub fn is_star(&self) -> bool {
        self.distance.is_none()
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into RGB floats.
pub fn parse_hex_color(value: &str) -> Option<[f32; 3]> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 {
        return None;
    }
    let packed = u32::from_str_radix(hex, 16).ok()?;
    Some([
        ((packed >> 16) & 0xff) as f32 / 255.0,
        ((packed >> 8) & 0xff) as f32 / 255.0,
        (packed & 0xff) as f32 / 255.0,
    ])
}

impl TryFrom<RawBody> for CelestialBodyDescriptor {
    type Error = CatalogError;

    fn try_from(raw: RawBody) -> Result<Self, CatalogError> {
        if !(raw.radius > 0.0) {
            return Err(CatalogError::BadRadius { name: raw.name, radius: raw.radius });
        }
        match (raw.distance, raw.speed) {
            (Some(distance), _) if distance < 0.0 => {
                return Err(CatalogError::NegativeDistance { name: raw.name, distance });
            }
            (_, Some(speed)) if speed < 0.0 => {
                return Err(CatalogError::NegativeSpeed { name: raw.name, speed });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(CatalogError::IncompleteOrbit { name: raw.name });
            }
            _ => {}
        }
        let color = match raw.color {
            Some(value) => match parse_hex_color(&value) {
                Some(rgb) => Some(rgb),
                None => return Err(CatalogError::BadColor { name: raw.name, value }),
            },
            None => None,
        };

        Ok(Self {
            name: raw.name,
            radius: raw.radius,
            distance: raw.distance,
            speed: raw.speed,
            color,
            description: raw.description,
            diameter: raw.diameter,
            day: raw.day,
            year: raw.year,
            temp: raw.temp,
            moons: raw.moons,
            fact: raw.fact,
        })
    }
}

/// The validated body list. The star is always at index 0.
#[derive(Debug, Clone)]
pub struct BodyCatalog {
    bodies: Vec<CelestialBodyDescriptor>,
}

impl BodyCatalog {
    /// Load the embedded catalog.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(BODIES_JSON)
    }

    /// Parse and validate a catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawBody> = serde_json::from_str(json)?;
        if raw.len() != BODY_COUNT {
            return Err(CatalogError::BodyCount { expected: BODY_COUNT, found: raw.len() });
        }

        let mut bodies = raw
            .into_iter()
            .map(CelestialBodyDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut stars = bodies.iter().enumerate().filter(|(_, b)| b.is_star()).map(|(i, _)| i);
        let star = stars.next().ok_or(CatalogError::MissingStar)?;
        if let Some(other) = stars.next() {
            return Err(CatalogError::MultipleStars(
                bodies[star].name.clone(),
                bodies[other].name.clone(),
            ));
        }
        if star != 0 {
            let star_body = bodies.remove(star);
            bodies.insert(0, star_body);
        }

        Ok(Self { bodies })
    }

    pub fn bodies(&self) -> &[CelestialBodyDescriptor] {
        &self.bodies
    }

    pub fn get(&self, index: BodyIndex) -> Option<&CelestialBodyDescriptor> {
        self.bodies.get(index.0)
    }

    pub fn star(&self) -> &CelestialBodyDescriptor {
        &self.bodies[0]
    }

    pub fn index_of(&self, name: &str) -> Option<BodyIndex> {
        self.bodies.iter().position(|b| b.name == name).map(BodyIndex)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_json(name: &str, orbit: &str) -> String {
        format!(
            r#"{{"name":"{name}","radius":2{orbit},"description":"d","diameter":"1 km","day":"1","year":"1","temp":"0","moons":"0","fact":"f"}}"#
        )
    }

    fn catalog_json(bodies: &[String]) -> String {
        format!("[{}]", bodies.join(","))
    }

    fn valid_bodies() -> Vec<String> {
        let mut bodies = vec![body_json("Star", "")];
        for i in 0..8 {
            bodies.push(body_json(&format!("P{i}"), r##","distance":10,"speed":0.1,"color":"#ffffff""##));
        }
        bodies
    }

    #[test]
    fn embedded_catalog_loads() {
        let catalog = BodyCatalog::load().unwrap();
        assert_eq!(catalog.len(), BODY_COUNT);
        assert_eq!(catalog.star().name, "Sun");
        assert_eq!(catalog.star().radius, 20.0);

        let earth = catalog.get(catalog.index_of("Earth").unwrap()).unwrap();
        assert_eq!(earth.distance, Some(120.0));
        assert_eq!(earth.speed, Some(0.015));
        assert_eq!(earth.diameter, "12,742 km");
        assert_eq!(earth.moons, "1");
        let [r, g, b] = earth.color.unwrap();
        assert!((r - 0x46 as f32 / 255.0).abs() < 1e-6);
        assert!((g - 0x82 as f32 / 255.0).abs() < 1e-6);
        assert!((b - 0xb4 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn embedded_planets_orbit_in_order() {
        let catalog = BodyCatalog::load().unwrap();
        let names: Vec<&str> = catalog.bodies().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        let distances: Vec<f32> = catalog.bodies()[1..].iter().map(|b| b.distance.unwrap()).collect();
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("000000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn star_is_moved_to_front() {
        let mut bodies = valid_bodies();
        let star = bodies.remove(0);
        bodies.push(star);
        let catalog = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap();
        assert_eq!(catalog.star().name, "Star");
    }

    #[test]
    fn rejects_negative_speed() {
        let mut bodies = valid_bodies();
        bodies[3] = body_json("Bad", r#","distance":10,"speed":-0.1"#);
        let err = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap_err();
        assert!(matches!(err, CatalogError::NegativeSpeed { .. }));
    }

    #[test]
    fn rejects_negative_distance() {
        let mut bodies = valid_bodies();
        bodies[3] = body_json("Bad", r#","distance":-10,"speed":0.1"#);
        let err = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap_err();
        assert!(matches!(err, CatalogError::NegativeDistance { .. }));
    }

    #[test]
    fn rejects_half_orbit() {
        let mut bodies = valid_bodies();
        bodies[3] = body_json("Bad", r#","distance":10"#);
        let err = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap_err();
        assert!(matches!(err, CatalogError::IncompleteOrbit { .. }));
    }

    #[test]
    fn rejects_bad_color() {
        let mut bodies = valid_bodies();
        bodies[3] = body_json("Bad", r#","distance":10,"speed":0.1,"color":"blue""#);
        let err = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap_err();
        assert!(matches!(err, CatalogError::BadColor { .. }));
    }

    #[test]
    fn rejects_star_count() {
        let mut bodies = valid_bodies();
        bodies[3] = body_json("Second", "");
        let err = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap_err();
        assert!(matches!(err, CatalogError::MultipleStars(..)));

        let mut bodies = valid_bodies();
        bodies[0] = body_json("Lonely", r##","distance":1,"speed":0.1,"color":"#ffffff""##);
        let err = BodyCatalog::from_json(&catalog_json(&bodies)).unwrap_err();
        assert!(matches!(err, CatalogError::MissingStar));
    }

    #[test]
    fn rejects_wrong_count_and_bad_json() {
        let err = BodyCatalog::from_json("[]").unwrap_err();
        assert!(matches!(err, CatalogError::BodyCount { expected: BODY_COUNT, found: 0 }));

        let err = BodyCatalog::from_json("{").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
