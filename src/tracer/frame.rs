use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use log::info;
use nalgebra::Vector3;

use crate::error::{Result, TraceError};
use crate::util::clamp01;

/// 픽셀당 float 4개 (R, G, B, A)
pub const CHANNELS: usize = 4;

/// 행 우선, 첫 줄부터 채워지는 RGBA float 버퍼
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn pixel(&self, u: u32, v: u32) -> [f32; 4] {
        let start = (v as usize * self.width as usize + u as usize) * CHANNELS;
        let mut pixel = [0.0; 4];
        pixel.copy_from_slice(&self.data[start..start + CHANNELS]);
        pixel
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        pack_rgba8(self.width, self.height, &self.data)
    }

    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export_image(path, self.width, self.height, &self.data)
    }
}

/// 색을 [0, 1]로 자르고 알파는 언제나 1
pub fn write_color(pixel: &mut [f32], color: &Vector3<f32>) {
    pixel[0] = clamp01(color.x);
    pixel[1] = clamp01(color.y);
    pixel[2] = clamp01(color.z);
    pixel[3] = 1.0;
}

/// PNG는 위에서부터 저장되니 버퍼의 마지막 줄이 이미지의 첫 줄이 됨
fn pack_rgba8(width: u32, height: u32, buffer: &[f32]) -> RgbaImage {
    let quantize = |c: f32| (255.0 * c) as u8;

    RgbaImage::from_fn(width, height, |x, y| {
        let row = (height - 1 - y) as usize;
        let start = (row * width as usize + x as usize) * CHANNELS;
        let p = &buffer[start..start + CHANNELS];
        Rgba([quantize(p[0]), quantize(p[1]), quantize(p[2]), quantize(p[3])])
    })
}

/// RGBA float 버퍼를 8비트 RGBA PNG로 저장
pub fn export_image<P: AsRef<Path>>(path: P, width: u32, height: u32, buffer: &[f32]) -> Result<()> {
    let path = path.as_ref();

    let expected = width as usize * height as usize * CHANNELS;
    if buffer.len() != expected {
        return Err(TraceError::BufferSize {
            expected,
            actual: buffer.len(),
        });
    }

    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Png) => {}
        _ => return Err(TraceError::UnsupportedFormat(path.display().to_string())),
    }

    let image = pack_rgba8(width, height, buffer);
    let mut writer = BufWriter::new(File::create(path)?);
    image.write_to(&mut writer, ImageFormat::Png)?;
    writer.flush()?;

    info!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}
