/// Gamma correction example
/// Prints a few table entries and applies the curve to a grayscale test image

use image::ImageReader;
use sketch_effect::{adjust_gamma, tone_effect::GammaLut};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = ImageReader::open("data/test.png")?.decode()?.to_luma8();

    for gamma in [0.5, 0.9, 2.2] {
        let lut = GammaLut::new(gamma)?;
        println!(
            "gamma {gamma}: 64 -> {}, 128 -> {}, 192 -> {}",
            lut.lookup(64),
            lut.lookup(128),
            lut.lookup(192)
        );

        let corrected = adjust_gamma(&img, gamma)?;
        corrected.save(output_dir.join(format!("gamma_{gamma}.png")))?;
    }

    println!("✓ Gamma correction applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
