//! 구와 점광원만으로 이루어진 장면을 반사까지 포함해 PNG 한 장으로 그리는 레이 트레이서

use std::path::Path;

use log::info;

pub mod camera;
pub mod error;
pub mod tracer;
pub mod util;

pub use camera::Camera;
pub use error::{Result, TraceError};
pub use tracer::frame::PixelBuffer;
pub use tracer::scene::{Light, Scene, Sphere};
pub use tracer::{ReflectionMode, Settings, Tracer};

// 출력 크기
pub const WIDTH: u32 = 600;
pub const HEIGHT: u32 = 400;

pub const OUTPUT_PATH: &str = "out.png";

pub fn run() -> Result<()> {
    render_to(OUTPUT_PATH)
}

/// 기본 장면을 그려서 `path`에 저장
pub fn render_to<P: AsRef<Path>>(path: P) -> Result<()> {
    let scene = Scene::demo()?;
    let camera = Camera::for_viewport(WIDTH, HEIGHT);
    let tracer = Tracer::new(Settings::default());

    let frame = tracer.render(&scene, &camera, WIDTH, HEIGHT);
    frame.export(&path)?;

    info!("done: {}", path.as_ref().display());
    Ok(())
}
