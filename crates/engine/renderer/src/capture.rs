//! Framebuffer readback for screenshots

use std::path::Path;

use glow::{Context, HasContext};
use image::RgbaImage;

use crate::error::RenderError;

/// Flip rows of a tightly packed RGBA buffer (GL origin is bottom-left)
pub fn flip_rows(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let row = width * 4;
    let mut flipped = vec![0u8; row * height];
    for y in 0..height {
        let src = y * row;
        let dst = (height - 1 - y) * row;
        flipped[dst..dst + row].copy_from_slice(&pixels[src..src + row]);
    }
    flipped
}

/// Read the bound framebuffer into an image
///
/// # Safety
///
/// Must be called with an active GL context on the current thread.
pub unsafe fn capture_framebuffer(
    gl: &Context,
    width: u32,
    height: u32,
) -> Result<RgbaImage, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::Capture(format!(
            "empty framebuffer {}x{}",
            width, height
        )));
    }

    let (w, h) = (width as usize, height as usize);
    let mut pixels = vec![0u8; w * h * 4];

    unsafe {
        gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        gl.read_pixels(
            0,
            0,
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(Some(&mut pixels)),
        );
    }

    RgbaImage::from_raw(width, height, flip_rows(&pixels, w, h))
        .ok_or_else(|| RenderError::Capture("pixel buffer size mismatch".to_string()))
}

/// Read the bound framebuffer and write it to `path`
///
/// # Safety
///
/// Must be called with an active GL context on the current thread.
pub unsafe fn save_framebuffer(
    gl: &Context,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let image = unsafe { capture_framebuffer(gl, width, height)? };
    image.save(path)?;
    tracing::info!("Saved {}x{} capture to {}", width, height, path.display());
    Ok(())
}
