//! Perspective camera for the 3-D effects.
//!
//! Looks down -Z from `(0, 0, distance)`. Projection depends only on the
//! surface size passed in, so resizing never touches camera state.

/// A projected point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Surface pixels per world unit at this depth.
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_deg: f32,
    pub distance: f32,
    pub near: f32,
}

impl Camera {
    pub const DEFAULT_FOV_DEG: f32 = 75.0;
    pub const DEFAULT_DISTANCE: f32 = 5.0;

    fn focal(&self) -> f32 {
        1.0 / (self.fov_deg.to_radians() / 2.0).tan()
    }

    /// Project a world-space point; `None` when it is behind the near plane.
    pub fn project(&self, point: [f32; 3], (width, height): (u32, u32)) -> Option<Projected> {
        let depth = self.distance - point[2];
        if depth <= self.near || height == 0 {
            return None;
        }
        let (w, h) = (width as f32, height as f32);
        let aspect = w / h;
        let f = self.focal();
        let ndc_x = point[0] * f / (aspect * depth);
        let ndc_y = point[1] * f / depth;
        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * w,
            y: (1.0 - ndc_y) * 0.5 * h,
            scale: f / depth * h * 0.5,
        })
    }

    /// World-space XY where the ray through a surface pixel meets `z = 0`.
    pub fn unproject_to_plane(&self, x: f32, y: f32, (width, height): (u32, u32)) -> [f32; 2] {
        if width == 0 || height == 0 {
            return [0.0, 0.0];
        }
        let (w, h) = (width as f32, height as f32);
        let ndc_x = 2.0 * x / w - 1.0;
        let ndc_y = 1.0 - 2.0 * y / h;
        let f = self.focal();
        [
            ndc_x * (w / h) * self.distance / f,
            ndc_y * self.distance / f,
        ]
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_deg: Self::DEFAULT_FOV_DEG,
            distance: Self::DEFAULT_DISTANCE,
            near: 0.1,
        }
    }
}

/// Rotate about the X axis, then the Y axis.
pub fn rotate(point: [f32; 3], rx: f32, ry: f32) -> [f32; 3] {
    let [x, y, z] = point;
    let (sx, cx) = rx.sin_cos();
    let (y, z) = (y * cx - z * sx, y * sx + z * cx);
    let (sy, cy) = ry.sin_cos();
    [x * cy + z * sy, y, -x * sy + z * cy]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: (u32, u32) = (800, 600);

    #[test]
    fn origin_projects_to_center() {
        let p = Camera::default().project([0.0, 0.0, 0.0], SIZE).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
        assert!(p.scale > 0.0);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let camera = Camera::default();
        assert!(camera.project([0.0, 0.0, 5.0], SIZE).is_none());
        assert!(camera.project([0.0, 0.0, 7.5], SIZE).is_none());
    }

    #[test]
    fn unproject_inverts_project_on_plane() {
        let camera = Camera::default();
        let p = camera.project([1.25, -0.75, 0.0], SIZE).unwrap();
        let [x, y] = camera.unproject_to_plane(p.x, p.y, SIZE);
        assert!((x - 1.25).abs() < 1e-3);
        assert!((y + 0.75).abs() < 1e-3);
    }

    #[test]
    fn nearer_points_appear_larger() {
        let camera = Camera::default();
        let far = camera.project([0.0, 0.0, -3.0], SIZE).unwrap();
        let near = camera.project([0.0, 0.0, 3.0], SIZE).unwrap();
        assert!(near.scale > far.scale);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = [1.0, 2.0, -3.0];
        let r = rotate(p, 0.7, -1.3);
        let len = |v: [f32; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len(p) - len(r)).abs() < 1e-4);
    }
}
