//! Spawns the sun, planets, lights, starfield and orbit rings into the engine.
//!
//! Each planet hangs off its own mesh-less pivot at the origin; rotating the
//! pivot about +Y carries the planet around its orbit while the planet's own
//! rotation only spins it in place.

use glam::{Quat, Vec3};
use orrery::*;

use crate::bodies::{BodyCatalog, BodyIndex, CelestialBodyDescriptor};
use crate::config::SolarConfig;

/// Base color of the sun sphere; the glow layers carry the rest of its gradient.
pub const SUN_COLOR: SDFColor = SDFColor::new(1.0, 200.0 / 255.0, 0.0);
pub const SUN_EMISSIVE: f32 = 1.5;

/// Surface roughness of every planet.
const PLANET_ROUGHNESS: f32 = 0.8;

const AMBIENT_HEX: u32 = 0x404040;
const AMBIENT_INTENSITY: f32 = 0.6;
const SUN_LIGHT_INTENSITY: f32 = 2.5;
const SUN_LIGHT_RANGE: f32 = 3000.0;

/// Handle of a floating name label; one per body, numbered by body index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

/// A body as it lives in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialObject {
    pub body: BodyIndex,
    pub mesh: EntityId,
    /// Orbit pivot; `None` for the sun.
    pub pivot: Option<EntityId>,
    /// Orbital angular speed (radians per scaled second).
    pub speed: f32,
    pub orbit_angle: f32,
    pub spin_angle: f32,
    pub label: Option<LabelId>,
}

/// A circle in the XZ plane at a planet's orbital distance.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRing {
    pub radius: f32,
    pub points: Vec<Vec3>,
}

impl OrbitRing {
    pub fn new(radius: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
                Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
            })
            .collect();
        Self { radius, points }
    }
}

/// What the builder hands back to the game.
#[derive(Debug, Clone, Default)]
pub struct SolarScene {
    /// Indexed by [`BodyIndex`]; the sun is first.
    pub objects: Vec<CelestialObject>,
    pub rings: Vec<OrbitRing>,
}

impl SolarScene {
    pub fn object(&self, body: BodyIndex) -> Option<&CelestialObject> {
        self.objects.get(body.0)
    }

    /// Mesh ids of everything that can be clicked.
    pub fn pickable(&self) -> Vec<EntityId> {
        self.objects.iter().map(|o| o.mesh).collect()
    }

    pub fn body_for_mesh(&self, mesh: EntityId) -> Option<BodyIndex> {
        self.objects.iter().find(|o| o.mesh == mesh).map(|o| o.body)
    }

    pub fn world_position(&self, scene: &Scene, body: BodyIndex) -> Option<Vec3> {
        scene.world_position(self.object(body)?.mesh)
    }
}

/// Blinn-Phong exponent that roughly matches a PBR roughness.
fn shininess_from_roughness(roughness: f32) -> f32 {
    (2.0 / roughness.powi(4) - 2.0).max(1.0)
}

fn planet_mesh(body: &CelestialBodyDescriptor) -> MeshComponent {
    let color = body
        .color
        .map(|[r, g, b]| SDFColor::new(r, g, b))
        .unwrap_or(SDFColor::WHITE);
    MeshComponent::sphere(body.radius, color).with_shininess(shininess_from_roughness(PLANET_ROUGHNESS))
}

fn sun_mesh(body: &CelestialBodyDescriptor) -> MeshComponent {
    MeshComponent::sphere(body.radius, SUN_COLOR)
        .with_emissive(SUN_EMISSIVE)
        .unlit()
}

/// Populate `ctx` from the catalog.
pub fn build(ctx: &mut EngineContext, catalog: &BodyCatalog, config: &SolarConfig) -> SolarScene {
    let mut objects = Vec::with_capacity(catalog.len());
    let mut rings = Vec::with_capacity(catalog.len().saturating_sub(1));

    for (i, body) in catalog.bodies().iter().enumerate() {
        let label = Some(LabelId(i as u32));
        let mesh_id = ctx.next_id();

        match (body.distance, body.speed) {
            (Some(distance), Some(speed)) => {
                let pivot_id = ctx.next_id();
                ctx.scene.spawn(Entity::new(pivot_id).with_tag(format!("{}-pivot", body.name)));
                ctx.graph.register(pivot_id);

                ctx.scene.spawn(
                    Entity::new(mesh_id)
                        .with_tag(body.name.as_str())
                        .with_pos(Vec3::new(distance, 0.0, 0.0))
                        .with_mesh(planet_mesh(body)),
                );
                ctx.graph.register_with(mesh_id, LocalTransform::new().with_offset(Vec3::new(distance, 0.0, 0.0)));
                ctx.graph.set_parent(mesh_id, Some(pivot_id));

                rings.push(OrbitRing::new(distance, config.ring_segments));
                objects.push(CelestialObject {
                    body: BodyIndex(i),
                    mesh: mesh_id,
                    pivot: Some(pivot_id),
                    speed,
                    orbit_angle: 0.0,
                    spin_angle: 0.0,
                    label,
                });
            }
            _ => {
                ctx.scene.spawn(
                    Entity::new(mesh_id)
                        .with_tag(body.name.as_str())
                        .with_mesh(sun_mesh(body)),
                );
                ctx.graph.register(mesh_id);
                ctx.lights.add(PointLight::white(Vec3::ZERO, SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE));

                objects.push(CelestialObject {
                    body: BodyIndex(i),
                    mesh: mesh_id,
                    pivot: None,
                    speed: 0.0,
                    orbit_angle: 0.0,
                    spin_angle: 0.0,
                    label,
                });
            }
        }
    }

    ctx.lights.set_ambient_hex(AMBIENT_HEX, AMBIENT_INTENSITY);

    let stars = &config.starfield;
    let mut rng = Rng::new(stars.seed);
    ctx.point_clouds.push(PointCloud::scattered(stars.count, stars.spread, stars.size, &mut rng));

    ctx.propagate_transforms();
    log::info!(
        "scene built: {} bodies, {} orbit rings, {} stars",
        objects.len(),
        rings.len(),
        stars.count
    );

    SolarScene { objects, rings }
}

/// Write orbit and spin angles into the transform graph.
pub fn apply_angles(object: &CelestialObject, graph: &mut TransformGraph) {
    if let Some(pivot) = object.pivot {
        graph.set_rotation(pivot, Quat::from_rotation_y(object.orbit_angle));
    }
    graph.set_rotation(object.mesh, Quat::from_rotation_y(object.spin_angle));
}
