use log::debug;
use nalgebra::{Point3, Vector3};

use crate::error::{Result, TraceError};
use crate::tracer::ray::Ray;

/// 이보다 가까운 교차점은 무시함. 반사 광선이 출발한 구에 다시 부딪히는걸 막는 용도
pub const MIN_HIT_DISTANCE: f32 = 0.1;

#[derive(Debug, Default, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sphere(&mut self, sphere: Sphere) -> Result<()> {
        sphere.validate()?;
        self.spheres.push(sphere);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) -> Result<()> {
        light.validate()?;
        self.lights.push(light);
        Ok(())
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Result<Self> {
        self.add_sphere(sphere)?;
        Ok(self)
    }

    pub fn with_light(mut self, light: Light) -> Result<Self> {
        self.add_light(light)?;
        Ok(self)
    }

    /// 추가한 순서 그대로. 교차 판정 순서도 이 순서를 따름
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// 조명 4개, 구 10개로 이루어진 기본 장면
    pub fn demo() -> Result<Self> {
        let mut scene = Self::new();

        for (position, color) in [
            (Point3::new(-0.5, -1.0, 0.0), Vector3::new(0.5, 0.5, 1.0)),
            (Point3::new(0.5, 1.0, -1.0), Vector3::new(1.0, 0.5, 1.0)),
            (Point3::new(0.5, 1.5, -1.5), Vector3::new(0.1, 1.0, 0.2)),
            (Point3::new(0.5, -3.0, -2.5), Vector3::new(0.1, 0.0, 0.5)),
        ] {
            scene.add_light(Light {
                position,
                color,
                ..Default::default()
            })?;
        }

        let spheres = [
            Sphere {
                position: Point3::new(0.0, 0.0, -2.5),
                reflectivity: 0.7,
                ..Default::default()
            },
            Sphere {
                position: Point3::new(-0.5, 0.5, -3.5),
                radius: 1.4,
                diffuse: Vector3::new(0.1, 0.8, 0.8),
                ..Default::default()
            },
            Sphere {
                position: Point3::new(0.5, 0.0, -1.0),
                radius: 0.4,
                reflectivity: 0.0,
                ..Default::default()
            },
            Sphere {
                position: Point3::new(-0.5, 0.0, -1.0),
                radius: 0.3,
                reflectivity: 0.3,
                ..Default::default()
            },
            Sphere {
                position: Point3::new(0.1, -0.1, -0.6),
                radius: 0.15,
                diffuse: Vector3::new(1.0, 0.8, 0.5),
                specular: Vector3::new(0.0, 0.8, 1.0),
                ..Default::default()
            },
            Sphere {
                position: Point3::new(4.0, 3.0, -5.0),
                radius: 2.0,
                diffuse: Vector3::new(1.0, 0.3, 0.1),
                specular: Vector3::new(0.0, 0.8, 1.0),
                ..Default::default()
            },
            Sphere {
                position: Point3::new(-10.0, 0.0, -10.0),
                radius: 9.0,
                diffuse: Vector3::new(0.0, 0.6, 0.0),
                specular: Vector3::new(1.0, 0.0, 1.0),
                reflectivity: 0.5,
            },
            Sphere {
                position: Point3::new(0.0, 0.0, 3.0),
                radius: 1.0,
                diffuse: Vector3::new(0.2, 0.0, 0.7),
                specular: Vector3::new(0.0, 0.8, 1.0),
                reflectivity: 0.5,
            },
            Sphere {
                position: Point3::new(1.0, -1.0, 0.0),
                radius: 1.0,
                diffuse: Vector3::new(0.8, 0.0, 0.2),
                specular: Vector3::new(0.7, 0.5, 1.0),
                reflectivity: 0.5,
            },
            Sphere {
                position: Point3::new(-1.0, 3.0, 3.0),
                radius: 1.0,
                diffuse: Vector3::new(0.5, 0.5, 0.0),
                specular: Vector3::new(0.9, 0.5, 0.0),
                reflectivity: 0.5,
            },
        ];
        for sphere in spheres {
            scene.add_sphere(sphere)?;
        }

        debug!(
            "demo scene: {} spheres, {} lights",
            scene.spheres.len(),
            scene.lights.len()
        );

        Ok(scene)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub position: Point3<f32>,
    pub radius: f32,

    // 재질
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    /// 0.0이면 반사 없음, 1.0이면 거울
    pub reflectivity: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            radius: 1.0,
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 0.0, 0.0),
            reflectivity: 0.2,
        }
    }
}

impl Sphere {
    /// `(MIN_HIT_DISTANCE, closest)` 안에 들어오는 가장 가까운 근을 돌려줌.
    /// `closest`는 지금까지 찾은 가장 가까운 교차 거리
    pub fn intersect(&self, ray: &Ray, closest: f32) -> Option<f32> {
        // |origin + t * dir - center|^2 = r^2, dir이 단위 벡터라고 가정해서 a = 1
        let dist = self.position - ray.origin;
        let b = ray.direction.dot(&dist);
        let discriminant = b * b - dist.dot(&dist) + self.radius * self.radius;

        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();

        // t0 <= t1 이므로 먼저 통과하는 쪽이 가장 가까운 근
        [b - root, b + root]
            .into_iter()
            .find(|&t| t > MIN_HIT_DISTANCE && t < closest)
    }

    fn validate(&self) -> Result<()> {
        let radius_ok = self.radius.is_finite() && self.radius > 0.0;
        if !radius_ok || !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(TraceError::InvalidSphere {
                radius: self.radius,
                reflectivity: self.reflectivity,
            });
        }
        Ok(())
    }
}

/// 점광원. 거리에 따른 감쇠 없음
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            color: Vector3::new(1.0, 1.0, 1.0),
            intensity: 0.7,
        }
    }
}

impl Light {
    fn validate(&self) -> Result<()> {
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(TraceError::InvalidLight {
                intensity: self.intensity,
            });
        }
        Ok(())
    }
}
