use nalgebra::{Point3, Vector3};

use crate::tracer::ray::Ray;

/// 가로 시야각. 대략 pi/4
pub const BASE_FOV: f32 = 0.7845;

/// 핀홀 카메라. 원점에서 -z 쪽을 바라봄
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,

    // 시야각
    pub fov_w: f32,
    pub fov_h: f32,
    pub tan_fov_w: f32,
    pub tan_fov_h: f32,
}

impl Camera {
    /// `aspect_ratio`는 세로 / 가로
    pub fn new(aspect_ratio: f32) -> Self {
        let fov_w = BASE_FOV;
        let fov_h = aspect_ratio * fov_w;

        Self {
            position: Point3::origin(),
            forward: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::y(),
            fov_w,
            fov_h,
            tan_fov_w: fov_w.tan(),
            tan_fov_h: fov_h.tan(),
        }
    }

    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self::new(height as f32 / width as f32)
    }

    /// 픽셀 (u, v)를 지나는 광선. v = 0이 버퍼의 첫 줄
    pub fn primary_ray(&self, u: u32, v: u32, width: u32, height: u32) -> Ray {
        let (width, height) = (width as f32, height as f32);
        let x = (2.0 * u as f32 - width) / width * self.tan_fov_w;
        let y = (2.0 * v as f32 - height) / height * self.tan_fov_h;

        // z 성분이 0이 아니니 길이가 0이 될 일은 없음
        let target = Vector3::new(x, y, self.forward.z).normalize();

        Ray::new(self.position, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fov_from_aspect_ratio() {
        let camera = Camera::for_viewport(600, 400);
        assert_relative_eq!(camera.fov_w, BASE_FOV);
        assert_relative_eq!(camera.fov_h, BASE_FOV * 400.0 / 600.0, epsilon = 1e-6);
        assert_relative_eq!(camera.tan_fov_h, (BASE_FOV * 2.0 / 3.0).tan(), epsilon = 1e-6);
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let camera = Camera::for_viewport(600, 400);
        let ray = camera.primary_ray(300, 200, 600, 400);

        assert_eq!(ray.origin, Point3::origin());
        assert_relative_eq!(ray.direction, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_corner_pixel_spans_fov() {
        let camera = Camera::for_viewport(600, 400);
        let ray = camera.primary_ray(0, 0, 600, 400);

        let expected = Vector3::new(-camera.tan_fov_w, -camera.tan_fov_h, -1.0).normalize();
        assert_relative_eq!(ray.direction, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_primary_rays_are_unit() {
        let camera = Camera::for_viewport(60, 40);
        for (u, v) in [(0, 0), (59, 0), (0, 39), (59, 39), (17, 23)] {
            let ray = camera.primary_ray(u, v, 60, 40);
            assert_relative_eq!(ray.direction.norm(), 1.0, epsilon = 1e-5);
        }
    }
}
