use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::util::{reflect, refract, try_unit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    // 팩토리와 카메라가 만든 광선은 언제나 단위 벡터
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// `start`에서 `end`를 향하는 광선. 두 점이 같으면 방향이 없으니 에러
    pub fn generate(start: Point3<f32>, end: Point3<f32>) -> Result<Self> {
        let direction = try_unit(&(end - start))?;
        Ok(Self::new(start, direction))
    }

    /// 원점을 법선 방향으로 밀어주지 않음. 자기 자신과 다시 부딪히지 않게 하는건 호출하는 쪽 몫
    pub fn reflection(ray: &Ray, normal: &Vector3<f32>, hit_point: Point3<f32>) -> Self {
        Self::new(hit_point, reflect(&ray.direction, normal))
    }

    pub fn refraction(ray: &Ray, normal: &Vector3<f32>, hit_point: Point3<f32>, eta: f32) -> Self {
        Self::new(hit_point, refract(&ray.direction, normal, eta))
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}
