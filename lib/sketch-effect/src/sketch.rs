use crate::{
    Effect, SketchEffect, SketchEffectResult,
    base_effect::grayscale,
    blend_effect::DodgeBlendConfig,
    blur_effect::GaussianBlurConfig,
    tone_effect::{DarknessConfig, GammaCorrectionConfig},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, RgbImage};

/// Gamma applied after the darkness adjustment.
pub const SKETCH_GAMMA: f32 = 0.9;

/// Pencil sketch pipeline configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct PencilSketchConfig {
    pub blur: GaussianBlurConfig,

    pub blend: DodgeBlendConfig,

    #[derivative(Default(value = "1.3"))]
    pub darkness_factor: f32,
}

impl PencilSketchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a color image into a single channel pencil sketch.
    ///
    /// grayscale -> invert -> blur -> invert -> dodge blend -> darkness -> gamma
    pub fn render(&self, image: &RgbImage) -> SketchEffectResult<GrayImage> {
        let gray = grayscale(image);
        log::debug!("grayscale done: {}x{}", gray.width(), gray.height());

        let inverted_blurred = run_stages(
            gray.clone(),
            &[
                SketchEffect::Invert,
                SketchEffect::GaussianBlur(self.blur.clone()),
                SketchEffect::Invert,
            ],
        )?;
        log::debug!("inverted blur done");

        let sketch = self.blend.blend(&gray, &inverted_blurred)?;
        log::debug!("dodge blend done");

        let darkness = DarknessConfig::new().with_factor(self.darkness_factor);
        let gamma = GammaCorrectionConfig::new().with_gamma(SKETCH_GAMMA);
        let corrected = run_stages(
            sketch,
            &[
                SketchEffect::Darkness(darkness),
                SketchEffect::GammaCorrection(gamma),
            ],
        )?;
        log::debug!("tone adjustment done: darkness={}", self.darkness_factor);

        Ok(corrected)
    }
}

/// Feed `image` through `stages` in order, each stage owning the previous
/// stage's output.
pub fn run_stages(image: GrayImage, stages: &[SketchEffect]) -> SketchEffectResult<GrayImage> {
    stages.iter().try_fold(image, |image, stage| stage.apply(image))
}
