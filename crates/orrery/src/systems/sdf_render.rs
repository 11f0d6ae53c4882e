use crate::components::entity::Entity;
use crate::renderer::camera::{PerspectiveCamera, Viewport};
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};
use crate::systems::lighting::LightState;
use glam::{EulerRot, Vec2};

/// Build the SDF instance buffer from entities with mesh components.
///
/// Spheres are projected through `camera`, culled when their center is not in
/// front of the near plane, and sorted far to near so the host can draw them
/// in order with plain alpha blending. Past the buffer's capacity the
/// farthest spheres are dropped.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &PerspectiveCamera,
    viewport: Viewport,
    lights: &LightState,
    buffer: &mut SDFBuffer,
) {
    buffer.clear();
    let max = buffer.max_instances();
    let view = camera.view_matrix();
    let key_light = lights.key_light();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let depth = camera.view_depth(entity.pos);
        if depth <= camera.near {
            continue;
        }
        let ndc = camera.project(entity.pos);
        if ndc.z >= 1.0 {
            continue;
        }
        let screen = viewport.ndc_to_screen(ndc);
        let radius = camera.projected_radius(entity.pos, mesh.shape.radius() * entity.scale.max_element(), viewport);

        let light_dir = match key_light {
            Some(light) if !mesh.unlit && light.reaches(entity.pos) => {
                let towards = view.transform_vector3(light.position - entity.pos).normalize_or_zero();
                Vec2::new(towards.x, -towards.y)
            }
            _ => Vec2::ZERO,
        };

        let (spin, _, _) = entity.rotation.to_euler(EulerRot::YXZ);

        buffer.push(SDFInstance {
            x: screen.x,
            y: screen.y,
            radius,
            rotation: spin,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            shininess: mesh.shininess,
            emissive: mesh.emissive,
            depth,
            light_x: light_dir.x,
            light_y: light_dir.y,
        });
    }

    let instances = buffer.instances_mut();
    instances.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let excess = instances.len().saturating_sub(max);
    if excess > 0 {
        log::debug!("sdf buffer full: dropping {} farthest of {} spheres", excess, instances.len());
        instances.drain(..excess);
    }
}
