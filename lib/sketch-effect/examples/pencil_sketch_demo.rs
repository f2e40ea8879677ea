/// Pencil sketch example
/// Renders the test image with several darkness factors

use image::ImageReader;
use sketch_effect::PencilSketchConfig;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)?.decode()?.to_rgb8();

    for darkness in [1.0, 1.3, 1.5, 2.0] {
        let sketch = PencilSketchConfig::new()
            .with_darkness_factor(darkness)
            .render(&img)?;

        let filename = format!("pencil_sketch_d{darkness:.1}.png");
        sketch.save(output_dir.join(&filename))?;
        println!("✓ Generated {}", filename);
    }

    println!("\n✓ All sketches rendered successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}
