use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::bodies::{BodyIndex, CelestialBodyDescriptor};

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Offset from target to camera.
    pub fn offset(&self) -> Vec3 {
        self.position - self.target
    }

    pub fn distance(&self) -> f32 {
        self.offset().length()
    }
}

/// Button state and the last cursor position seen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub primary_down: bool,
    pub secondary_down: bool,
    pub last: Vec2,
}

/// Text shown in the info overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfoPanel {
    pub visible: bool,
    pub name: String,
    pub description: String,
    pub diameter: String,
    pub day: String,
    pub year: String,
    pub temperature: String,
    pub moons: String,
    pub fact: String,
}

impl InfoPanel {
    /// Fill every field from `body` and make the panel visible.
    pub fn show(&mut self, body: &CelestialBodyDescriptor) {
        *self = Self {
            visible: true,
            name: body.name.clone(),
            description: body.description.clone(),
            diameter: body.diameter.clone(),
            day: body.day.clone(),
            year: body.year.clone(),
            temperature: body.temp.clone(),
            moons: body.moons.clone(),
            fact: body.fact.clone(),
        };
    }

    /// Hide the panel. The last text stays so a host can fade it out.
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Everything the handlers and the per-frame updater mutate.
#[derive(Debug, Clone)]
pub struct AppState {
    pub camera: CameraState,
    pub focus: Option<BodyIndex>,
    pub paused: bool,
    pub pointer: PointerState,
    pub panel: InfoPanel,
}

impl AppState {
    pub fn new(camera: CameraState) -> Self {
        Self {
            camera,
            focus: None,
            paused: false,
            pointer: PointerState::default(),
            panel: InfoPanel::default(),
        }
    }
}
