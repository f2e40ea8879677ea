use crate::{SketchEffectError, SketchEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma};

/// Dodge blend configuration
///
/// `out = clamp(round(base * scale / mask), 0, 255)`. A zero mask pixel
/// saturates to 255.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct DodgeBlendConfig {
    #[derivative(Default(value = "256.0"))]
    pub scale: f32,
}

impl DodgeBlendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blend(&self, base: &GrayImage, mask: &GrayImage) -> SketchEffectResult<GrayImage> {
        if base.dimensions() != mask.dimensions() {
            return Err(SketchEffectError::InvalidParameter(format!(
                "dodge blend needs equal sizes, got {:?} and {:?}",
                base.dimensions(),
                mask.dimensions()
            )));
        }

        Ok(GrayImage::from_fn(base.width(), base.height(), |x, y| {
            Luma([dodge(base.get_pixel(x, y)[0], mask.get_pixel(x, y)[0], self.scale)])
        }))
    }
}

#[inline]
fn dodge(base: u8, mask: u8, scale: f32) -> u8 {
    if mask == 0 {
        return u8::MAX;
    }

    (base as f32 * scale / mask as f32).round().clamp(0.0, 255.0) as u8
}
