use bytemuck::{Pod, Zeroable};
use glam::Mat4;

pub const SHADER_SOURCE: &str = include_str!("swarm.wgsl");

/// Bytes per particle in the position and colour vertex buffers.
pub const VERTEX_STRIDE: u64 = 12;

/// Vertices per particle sprite (two triangles).
pub const QUAD_VERTICES: u32 = 6;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub point_scale: [f32; 2],
    pub viewport: [f32; 2],
}

impl Uniforms {
    pub fn new(view: Mat4, projection: Mat4, point_size: f32, width: u32, height: u32) -> Self {
        Self {
            view_proj: (projection * view).to_cols_array_2d(),
            point_scale: [
                point_size * projection.x_axis.x,
                point_size * projection.y_axis.y,
            ],
            viewport: [width as f32, height as f32],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_shader_is_valid_wgsl() {
        validate_wgsl(SHADER_SOURCE).unwrap();
    }

    #[test]
    fn test_shader_has_entry_points() {
        assert!(SHADER_SOURCE.contains("fn vs_main"));
        assert!(SHADER_SOURCE.contains("fn fs_main"));
    }

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // mat4x4 (64) + vec2 (8) + vec2 (8), already 16-byte aligned.
        assert_eq!(std::mem::size_of::<Uniforms>(), 80);
    }

    #[test]
    fn test_point_scale_uses_focal_terms() {
        let projection = Mat4::perspective_rh(90.0_f32.to_radians(), 2.0, 0.1, 100.0);
        let u = Uniforms::new(Mat4::IDENTITY, projection, 0.5, 800, 400);
        assert!((u.point_scale[1] - 0.5).abs() < 1e-6);
        assert!((u.point_scale[0] - 0.25).abs() < 1e-6);
        assert_eq!(u.viewport, [800.0, 400.0]);
    }
}
