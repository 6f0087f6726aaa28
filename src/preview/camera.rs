use glam::{Mat4, Vec2, Vec3};

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Pixel coordinates, origin top-left.
    pub position: Vec2,
    /// Distance along the view direction.
    pub depth: f32,
}

/// Right-handed perspective camera (y up) used to look at a generated field.
#[derive(Debug, Clone)]
pub struct PreviewCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PreviewCamera {
    fn default() -> Self {
        Self::new(Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO, 1.0)
    }
}

impl PreviewCamera {
    pub fn new(position: Vec3, target: Vec3, aspect_ratio: f32) -> Self {
        PreviewCamera {
            position,
            target,
            up: Vec3::Y,
            fov: 75.0,
            aspect_ratio,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Pulls the camera back along its current direction so a sphere of `radius`
    /// around the target fits the vertical field of view.
    pub fn frame_radius(&mut self, radius: f32) {
        let mut dir = (self.position - self.target).normalize_or_zero();
        if dir == Vec3::ZERO {
            dir = Vec3::Z;
        }
        let distance = radius / (self.fov.to_radians() / 2.0).sin();
        self.position = self.target + dir * distance;
        self.far = self.far.max(distance + radius * 2.0);
    }

    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height;
    }

    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Pixels per world unit at a view depth of 1.
    pub fn focal_length(&self, screen_height: usize) -> f32 {
        screen_height as f32 / (2.0 * (self.fov.to_radians() / 2.0).tan())
    }

    /// Projects a world point to pixel space, `None` when it falls outside the frustum.
    pub fn project_point(
        &self,
        view_proj: &Mat4,
        point: Vec3,
        screen_width: usize,
        screen_height: usize,
    ) -> Option<ProjectedPoint> {
        let clip = *view_proj * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.x)
            || !(-1.0..=1.0).contains(&ndc.y)
            || !(0.0..=1.0).contains(&ndc.z)
        {
            return None;
        }
        let x = (ndc.x + 1.0) * 0.5 * screen_width as f32;
        let y = (1.0 - ndc.y) * 0.5 * screen_height as f32;
        Some(ProjectedPoint {
            position: Vec2::new(x, y),
            depth: clip.w,
        })
    }
}
