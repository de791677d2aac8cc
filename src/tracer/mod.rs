use std::time::Instant;

use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::tracer::frame::{write_color, PixelBuffer, CHANNELS};
use crate::tracer::ray::Ray;
use crate::tracer::scene::{Light, Scene, Sphere};
use crate::util::clamp01;

pub mod frame;
pub mod ray;
pub mod scene;

/// 반사 항을 몇 번 더할지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionMode {
    /// 조명 하나당 한 번씩. 기존 렌더 결과와 똑같이 나옴
    PerLight,
    /// 교차점 하나당 한 번
    PerHit,
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub max_depth: u32,
    pub background: Vector3<f32>,
    pub reflection_attenuation: f32,
    pub shininess: f32,
    pub normal_bias: f32,
    pub reflection_mode: ReflectionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: 3,
            background: Vector3::new(0.1, 0.1, 0.1),
            reflection_attenuation: 0.9,
            shininess: 5.0,
            normal_bias: 0.001,
            reflection_mode: ReflectionMode::PerLight,
        }
    }
}

#[derive(Debug, Default)]
pub struct Tracer {
    pub settings: Settings,
}

impl Tracer {
    pub fn new(settings: Settings) -> Self {
        debug!("tracer settings: {:?}", settings);
        Self { settings }
    }

    pub fn render(&self, scene: &Scene, camera: &Camera, width: u32, height: u32) -> PixelBuffer {
        if scene.spheres().is_empty() {
            warn!("scene has no spheres, every pixel will be background");
        }
        info!(
            "rendering {}x{}: {} spheres, {} lights, max depth {}",
            width,
            height,
            scene.spheres().len(),
            scene.lights().len(),
            self.settings.max_depth
        );
        let started = Instant::now();

        let mut buffer = PixelBuffer::new(width, height);

        // 픽셀마다 반사 횟수가 달라서 rayon의 work stealing에 맡김.
        // 각 작업은 서로 겹치지 않는 4칸만 씀
        buffer
            .as_mut_slice()
            .par_chunks_exact_mut(CHANNELS)
            .enumerate()
            .for_each(|(index, pixel)| {
                let u = (index % width as usize) as u32;
                let v = (index / width as usize) as u32;

                let ray = camera.primary_ray(u, v, width, height);
                let color = self.shade(scene, &ray, 0);
                write_color(pixel, &color);
            });

        info!("rendered frame in {:.2?}", started.elapsed());
        buffer
    }

    /// Whitted 방식 셰이딩. 반환값은 아직 자르지 않은 색
    pub fn shade(&self, scene: &Scene, ray: &Ray, depth: u32) -> Vector3<f32> {
        let Some(HitPayload { position, normal, sphere, .. }) = self.trace_ray(ray, scene) else {
            // 배경은 조명을 받지 않음
            return self.settings.background;
        };

        let reflected = self.reflected_color(scene, ray, &position, &normal, sphere, depth);
        let weighted_reflection = reflected * sphere.reflectivity;

        let mut color = Vector3::zeros();
        for light in scene.lights() {
            if let Some(direct) = self.direct_light(ray, &position, &normal, sphere, light) {
                color += direct * (1.0 - sphere.reflectivity);
            }

            if self.settings.reflection_mode == ReflectionMode::PerLight {
                color += weighted_reflection;
            }
        }

        if self.settings.reflection_mode == ReflectionMode::PerHit {
            color += weighted_reflection;
        }

        color
    }

    // 그림자 판정 없음. 모든 조명이 모든 표면을 비춤
    fn direct_light(
        &self,
        ray: &Ray,
        position: &Point3<f32>,
        normal: &Vector3<f32>,
        sphere: &Sphere,
        light: &Light,
    ) -> Option<Vector3<f32>> {
        // 조명 -> 표면 방향. 조명이 교차점 위에 있으면 방향이 없으니 건너뜀
        let light_ray = (*position - light.position).try_normalize(0.0)?;

        let diffuse = sphere.diffuse * clamp01((-light_ray).dot(normal));

        // Blinn 하프 벡터
        let specular = match (-light_ray - ray.direction).try_normalize(0.0) {
            Some(half) => {
                sphere.specular * clamp01(normal.dot(&half)).powf(self.settings.shininess)
            }
            None => Vector3::zeros(),
        };

        Some((light.color * light.intensity).component_mul(&(diffuse + specular)))
    }

    fn reflected_color(
        &self,
        scene: &Scene,
        ray: &Ray,
        position: &Point3<f32>,
        normal: &Vector3<f32>,
        sphere: &Sphere,
        depth: u32,
    ) -> Vector3<f32> {
        if depth >= self.settings.max_depth || sphere.reflectivity <= 0.0 {
            return Vector3::zeros();
        }

        // position이 구 표면 위라서 조금 띄워야 자기 자신과 다시 안 부딪힘
        let origin = *position + *normal * self.settings.normal_bias;
        let bounce = Ray::reflection(ray, normal, origin);
        let Some(direction) = bounce.direction.try_normalize(0.0) else {
            return Vector3::zeros();
        };

        self.shade(scene, &Ray::new(bounce.origin, direction), depth + 1)
            * self.settings.reflection_attenuation
    }

    pub fn closest_hit<'a>(ray: &Ray, distance: f32, sphere: &'a Sphere) -> Option<HitPayload<'a>> {
        let position = ray.at(distance);
        let normal = (position - sphere.position).try_normalize(0.0)?;

        Some(HitPayload {
            distance,
            position,
            normal,
            sphere,
        })
    }

    /// 장면 순서대로 훑으면서 가장 가까운 구를 찾음. 거리가 똑같으면 먼저 나온 구가 이김
    pub fn trace_ray<'a>(&self, ray: &Ray, scene: &'a Scene) -> Option<HitPayload<'a>> {
        let mut closest: Option<(&Sphere, f32)> = None;
        let mut best = f32::INFINITY;

        for sphere in scene.spheres() {
            if let Some(distance) = sphere.intersect(ray, best) {
                best = distance;
                closest = Some((sphere, distance));
            }
        }

        closest.and_then(|(sphere, distance)| Self::closest_hit(ray, distance, sphere))
    }
}

// 교차 정보만 담고, 색은 shade에서 따로 계산함
#[derive(Debug, Clone, Copy)]
pub struct HitPayload<'a> {
    pub distance: f32,
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub sphere: &'a Sphere,
}
