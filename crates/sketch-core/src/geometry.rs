use crate::constants::{PLANE_HEIGHT, PLANE_SEGMENTS, PLANE_WIDTH};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat rectangle in the XY plane facing +Z, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self::new(PLANE_WIDTH, PLANE_HEIGHT, PLANE_SEGMENTS, PLANE_SEGMENTS)
    }
}

impl PlaneGeometry {
    /// Segment counts below 1 are raised to 1.
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            width,
            height,
            width_segments: width_segments.max(1),
            height_segments: height_segments.max(1),
        }
    }

    pub fn vertex_count(&self) -> usize {
        ((self.width_segments + 1) * (self.height_segments + 1)) as usize
    }

    pub fn index_count(&self) -> usize {
        (self.width_segments * self.height_segments * 6) as usize
    }

    /// Grid vertices row by row from the top edge; `uv.y` is 1 along the top.
    pub fn vertices(&self) -> Vec<Vertex> {
        let grid_x = self.width_segments;
        let grid_y = self.height_segments;
        let seg_w = self.width / grid_x as f32;
        let seg_h = self.height / grid_y as f32;
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;

        let mut out = Vec::with_capacity(self.vertex_count());
        for iy in 0..=grid_y {
            let y = iy as f32 * seg_h - half_h;
            for ix in 0..=grid_x {
                let x = ix as f32 * seg_w - half_w;
                out.push(Vertex {
                    position: [x, -y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                });
            }
        }
        out
    }

    /// Two counter-clockwise triangles per grid cell.
    pub fn indices(&self) -> Vec<u32> {
        let grid_x = self.width_segments;
        let row = grid_x + 1;
        let mut out = Vec::with_capacity(self.index_count());
        for iy in 0..self.height_segments {
            for ix in 0..grid_x {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                out.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_quad() {
        let g = PlaneGeometry::default();
        let v = g.vertices();
        assert_eq!(v.len(), 4);
        assert_eq!(g.indices(), vec![0, 2, 1, 2, 3, 1]);
        assert_eq!(v[0].position, [-0.5, 0.5, 0.0]);
        assert_eq!(v[0].uv, [0.0, 1.0]);
        assert_eq!(v[3].position, [0.5, -0.5, 0.0]);
        assert_eq!(v[3].uv, [1.0, 0.0]);
    }

    #[test]
    fn winding_faces_positive_z() {
        let g = PlaneGeometry::new(2.0, 1.0, 3, 2);
        let v = g.vertices();
        let idx = g.indices();
        assert_eq!(v.len(), g.vertex_count());
        assert_eq!(idx.len(), g.index_count());
        for tri in idx.chunks(3) {
            let p = |i: u32| glam::Vec3::from(v[i as usize].position);
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.z > 0.0);
        }
    }

    #[test]
    fn zero_segments_clamped() {
        let g = PlaneGeometry::new(1.0, 1.0, 0, 0);
        assert_eq!(g.width_segments, 1);
        assert_eq!(g.indices().len(), 6);
    }
}
