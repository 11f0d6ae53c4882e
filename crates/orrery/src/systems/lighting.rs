/// Scene lighting for the SDF sphere pipeline.
///
/// Lights are added once at scene build and persist for the session.
/// The engine does not serialize lights; it bakes the key light into each
/// SDF instance as a screen-plane direction and writes the ambient term into
/// the buffer header.

use glam::Vec3;

/// A point light with position, color, intensity and range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// RGB color, [0..1] per channel.
    pub color: [f32; 3],
    pub intensity: f32,
    /// Distance past which the light contributes nothing. 0 = unbounded.
    pub range: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self { position, color, intensity, range }
    }

    pub fn white(position: Vec3, intensity: f32, range: f32) -> Self {
        Self::new(position, [1.0; 3], intensity, range)
    }

    /// Whether a world point lies within this light's range.
    pub fn reaches(&self, point: Vec3) -> bool {
        self.range <= 0.0 || self.position.distance(point) <= self.range
    }
}

/// Active lights plus the ambient term.
///
/// The first light added is the key light used for SDF shading.
/// Ambient defaults to white (no darkening) until a scene sets it.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: [1.0, 1.0, 1.0],
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// The light that drives sphere shading, if any.
    pub fn key_light(&self) -> Option<&PointLight> {
        self.lights.first()
    }

    /// Set the ambient term from a packed `0xRRGGBB` color scaled by `intensity`.
    pub fn set_ambient_hex(&mut self, hex: u32, intensity: f32) {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0 * intensity;
        self.ambient = [channel(16), channel(8), channel(0)];
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
