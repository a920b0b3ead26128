use image::RgbaImage;
use lib_wcg::WcgImage;

use crate::error::ToolError;

/// Swaps the B and R bytes of every 4-byte pixel. BGRA <-> RGBA.
pub fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

pub fn wcg_to_rgba(image: WcgImage) -> Result<RgbaImage, ToolError> {
    let WcgImage {
        width,
        height,
        mut bgra_data,
    } = image;
    swap_red_blue(&mut bgra_data);
    RgbaImage::from_raw(width, height, bgra_data).ok_or(ToolError::ImageTooLarge { width, height })
}

/// Row-major BGRA bytes of an RGBA image, as the codec expects them.
pub fn rgba_to_bgra(image: RgbaImage) -> (u32, u32, Vec<u8>) {
    let (width, height) = image.dimensions();
    let mut data = image.into_raw();
    swap_red_blue(&mut data);
    (width, height, data)
}
