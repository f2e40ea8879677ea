use crate::SketchEffectResult;
use image::GrayImage;

/// Somewhere to hand a finished sketch after it has been saved, e.g. a
/// window that shows it until a key is pressed.
///
/// Implementations may block the calling thread.
pub trait ResultSink {
    fn present(&self, image: &GrayImage) -> SketchEffectResult<()>;
}

impl<F> ResultSink for F
where
    F: Fn(&GrayImage) -> SketchEffectResult<()>,
{
    fn present(&self, image: &GrayImage) -> SketchEffectResult<()> {
        self(image)
    }
}
