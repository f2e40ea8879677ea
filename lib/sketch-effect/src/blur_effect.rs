use crate::{Effect, SketchEffectError, SketchEffectResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::{GrayImage, Luma};

/// Gaussian blur configuration
///
/// The kernel is applied separably with a fixed square support, mirroring
/// pixels at the border without repeating the edge pixel (reflect-101).
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    #[derivative(Default(value = "21"))]
    pub kernel_size: u32,

    #[derivative(Default(value = "3.0"))]
    pub sigma_x: f32,

    #[derivative(Default(value = "3.0"))]
    pub sigma_y: f32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(&self) -> SketchEffectResult<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(SketchEffectError::InvalidParameter(format!(
                "blur kernel size must be odd and positive, got {}",
                self.kernel_size
            )));
        }

        for sigma in [self.sigma_x, self.sigma_y] {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(SketchEffectError::InvalidParameter(format!(
                    "blur sigma must be positive, got {sigma}"
                )));
            }
        }

        Ok(())
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, image: GrayImage) -> SketchEffectResult<GrayImage> {
        self.validate()?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Ok(image);
        }

        let kernel_x = gaussian_kernel(self.kernel_size, self.sigma_x);
        let kernel_y = gaussian_kernel(self.kernel_size, self.sigma_y);
        let anchor = (self.kernel_size / 2) as i64;
        let (w, h) = (width as usize, height as usize);

        // Horizontal pass
        let mut rows = vec![0f32; w * h];
        for y in 0..h {
            let src = &image.as_raw()[y * w..(y + 1) * w];
            for x in 0..w {
                rows[y * w + x] = kernel_x
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| {
                        let sx = reflect_101(x as i64 + k as i64 - anchor, w);
                        weight * src[sx] as f32
                    })
                    .sum();
            }
        }

        // Vertical pass
        let blurred = GrayImage::from_fn(width, height, |x, y| {
            let (x, y) = (x as usize, y as usize);
            let value: f32 = kernel_y
                .iter()
                .enumerate()
                .map(|(k, weight)| {
                    let sy = reflect_101(y as i64 + k as i64 - anchor, h);
                    weight * rows[sy * w + x]
                })
                .sum();

            Luma([value.round().clamp(0.0, 255.0) as u8])
        });

        log::trace!(
            "gaussian blur {}x{} sigma=({}, {}) on {width}x{height}",
            self.kernel_size,
            self.kernel_size,
            self.sigma_x,
            self.sigma_y
        );

        Ok(blurred)
    }
}

/// Normalised 1D Gaussian weights `exp(-(i - c)^2 / (2 sigma^2))` centred on
/// `c = (size - 1) / 2`.
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let center = (size as f64 - 1.0) / 2.0;
    let denom = 2.0 * sigma as f64 * sigma as f64;

    let weights = (0..size)
        .map(|i| {
            let d = i as f64 - center;
            (-(d * d) / denom).exp()
        })
        .collect::<Vec<f64>>();

    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Map an out-of-range index back into `0..len` by mirroring around the
/// edge pixels, e.g. `-1 -> 1` and `len -> len - 2`.
fn reflect_101(index: i64, len: usize) -> usize {
    if len == 1 {
        return 0;
    }

    let period = 2 * (len as i64 - 1);
    let m = index.rem_euclid(period);
    if m >= len as i64 {
        (period - m) as usize
    } else {
        m as usize
    }
}
