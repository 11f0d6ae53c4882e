use bytemuck::{Pod, Zeroable};

/// Per-instance SDF render data for the sphere pipeline.
/// Written to the shared buffer for the host's SDF renderer.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    /// Screen position in pixels (origin top-left).
    pub x: f32,
    pub y: f32,
    /// Screen radius in pixels.
    pub radius: f32,
    /// Surface spin about the body's own axis, radians.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    pub emissive: f32,
    /// View-space depth; instances arrive sorted far to near.
    pub depth: f32,
    /// Screen-plane components (Y down) of the unit view-space direction
    /// towards the key light. Both zero for unlit meshes.
    pub light_x: f32,
    pub light_y: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of SDF instances for the sphere rendering pipeline.
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
    max: usize,
}

impl SDFBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SDFInstance) {
        self.instances.push(instance);
    }

    /// Most instances the host will read per frame.
    pub fn max_instances(&self) -> usize {
        self.max
    }

    pub fn instances(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub(crate) fn instances_mut(&mut self) -> &mut Vec<SDFInstance> {
        &mut self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for SDFBuffer {
    fn default() -> Self {
        Self::new()
    }
}
