use nalgebra::Vector3;

use crate::error::{Result, TraceError};

/// [0, 1] 범위로 자르기. NaN은 그대로 통과함
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

/// 길이가 0인 벡터는 정규화할 수 없으니 에러로 돌려줌
pub fn try_unit(v: &Vector3<f32>) -> Result<Vector3<f32>> {
    v.try_normalize(0.0).ok_or(TraceError::DegenerateVector)
}

/// I - 2 * dot(I, N) * N, N은 단위 벡터여야 함
pub fn reflect(incident: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * normal.dot(incident))
}

/// 전반사(total internal reflection)일 때는 영벡터
pub fn refract(incident: &Vector3<f32>, normal: &Vector3<f32>, eta: f32) -> Vector3<f32> {
    let cos = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos * cos);
    if k < 0.0 {
        return Vector3::zeros();
    }

    incident * eta - normal * (eta * cos + k.sqrt())
}
