use bytemuck::{Pod, Zeroable};

/// Per-symbol render data read by the host renderer straight out of wasm memory.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SymbolInstance {
    /// X of the image's top-left corner, relative to the reel area.
    pub x: f32,
    /// Y of the image's top-left corner, relative to the viewport top.
    pub y: f32,
    /// Rendered width in pixels.
    pub width: f32,
    /// Rendered height in pixels.
    pub height: f32,
    /// Atlas column.
    pub sprite_col: f32,
    /// Atlas row.
    pub atlas_row: f32,
    /// Atlas index.
    pub atlas: f32,
    /// Reel index the symbol belongs to.
    pub reel: f32,
}

impl SymbolInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing every symbol that intersects the viewport.
pub struct RenderBuffer {
    pub instances: Vec<SymbolInstance>,
    /// Viewport the instances are clipped against.
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SymbolInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from the JS side.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<SymbolInstance>(), SymbolInstance::STRIDE_BYTES);
        assert_eq!(SymbolInstance::FLOATS, 8);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(SymbolInstance::default());
        buf.push(SymbolInstance { reel: 1.0, ..Default::default() });
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 16);
        assert_eq!(buf.as_floats()[15], 1.0);
    }
}
