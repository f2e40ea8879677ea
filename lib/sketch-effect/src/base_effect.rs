use image::{GrayImage, Luma, RgbImage};

// BT.601 luma weights in 14-bit fixed point: 0.299, 0.587, 0.114
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Convert a color image to a single 8-bit channel using the luma formula
/// `0.299*R + 0.587*G + 0.114*B`, rounded to the nearest integer.
pub fn grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        let luma = LUMA_R * pixel[0] as u32
            + LUMA_G * pixel[1] as u32
            + LUMA_B * pixel[2] as u32
            + (1 << (LUMA_SHIFT - 1));

        Luma([(luma >> LUMA_SHIFT).min(255) as u8])
    })
}

/// Invert the intensities of an image
pub fn invert(image: &GrayImage) -> GrayImage {
    let mut inverted = image.clone();
    for pixel in inverted.pixels_mut() {
        pixel[0] = 255 - pixel[0];
    }

    inverted
}
