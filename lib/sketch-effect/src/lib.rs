pub mod base_effect;
pub mod blend_effect;
pub mod blur_effect;
pub mod convert;
pub mod sink;
pub mod sketch;
pub mod tone_effect;

use image::GrayImage;

pub use convert::{ConvertConfig, convert_to_sketch, convert_to_sketch_with_console};
pub use sink::ResultSink;
pub use sketch::{PencilSketchConfig, run_stages};
pub use tone_effect::adjust_gamma;

pub type SketchEffectResult<T> = Result<T, SketchEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum SketchEffectError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Display error: {0}")]
    Display(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A single-channel stage of the sketch pipeline.
///
/// Stages take ownership of their input and hand back a fresh buffer, so no
/// buffer is shared across stage boundaries.
pub trait Effect {
    fn apply(&self, image: GrayImage) -> SketchEffectResult<GrayImage>;
}

#[derive(Debug, Clone)]
pub enum SketchEffect {
    Invert,
    GaussianBlur(blur_effect::GaussianBlurConfig),
    Darkness(tone_effect::DarknessConfig),
    GammaCorrection(tone_effect::GammaCorrectionConfig),
}

impl Effect for SketchEffect {
    fn apply(&self, image: GrayImage) -> SketchEffectResult<GrayImage> {
        match self {
            SketchEffect::Invert => Ok(base_effect::invert(&image)),
            SketchEffect::GaussianBlur(config) => config.apply(image),
            SketchEffect::Darkness(config) => config.apply(image),
            SketchEffect::GammaCorrection(config) => config.apply(image),
        }
    }
}
