use crate::{Effect, SketchEffectError, SketchEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::GrayImage;

/// Darkness adjustment configuration
///
/// Intensities are normalised to `[0, 1]`, multiplied by `factor`, clamped
/// back to `[0, 1]` and truncated to 8 bits. No range check is made on
/// `factor`.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct DarknessConfig {
    #[derivative(Default(value = "1.3"))]
    pub factor: f32,
}

impl DarknessConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for DarknessConfig {
    fn apply(&self, mut image: GrayImage) -> SketchEffectResult<GrayImage> {
        for pixel in image.pixels_mut() {
            let value = (pixel[0] as f32 / 255.0 * self.factor).clamp(0.0, 1.0);
            pixel[0] = (value * 255.0) as u8;
        }

        Ok(image)
    }
}

/// Gamma correction configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GammaCorrectionConfig {
    #[derivative(Default(value = "0.9"))]
    pub gamma: f32,
}

impl GammaCorrectionConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for GammaCorrectionConfig {
    fn apply(&self, mut image: GrayImage) -> SketchEffectResult<GrayImage> {
        GammaLut::new(self.gamma)?.remap_in_place(&mut image);
        Ok(image)
    }
}

/// 256-entry power-law table, `table[i] = round(255 * (i / 255)^(1 / gamma))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaLut {
    table: [u8; 256],
}

impl GammaLut {
    pub fn new(gamma: f32) -> SketchEffectResult<Self> {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(SketchEffectError::InvalidParameter(format!(
                "gamma must be positive, got {gamma}"
            )));
        }

        let inv_gamma = 1.0 / gamma as f64;
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let value = 255.0 * (i as f64 / 255.0).powf(inv_gamma);
            *entry = value.round().clamp(0.0, 255.0) as u8;
        }

        Ok(Self { table })
    }

    #[inline]
    pub fn lookup(&self, value: u8) -> u8 {
        self.table[value as usize]
    }

    pub fn table(&self) -> &[u8; 256] {
        &self.table
    }

    pub fn remap(&self, image: &GrayImage) -> GrayImage {
        let mut remapped = image.clone();
        self.remap_in_place(&mut remapped);
        remapped
    }

    pub fn remap_in_place(&self, image: &mut GrayImage) {
        for pixel in image.pixels_mut() {
            pixel[0] = self.lookup(pixel[0]);
        }
    }
}

/// Apply gamma correction to every pixel through a freshly built [`GammaLut`].
pub fn adjust_gamma(image: &GrayImage, gamma: f32) -> SketchEffectResult<GrayImage> {
    Ok(GammaLut::new(gamma)?.remap(image))
}
