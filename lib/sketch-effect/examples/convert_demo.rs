/// File level conversion example
/// Same call the command line tool makes, without a display window

use sketch_effect::{ConvertConfig, convert_to_sketch};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ConvertConfig::new("data/test.png")
        .with_output_folder(PathBuf::from("tmp/sketches"))
        .with_output_name(PathBuf::from("sketch.jpg"))
        .with_show_result(false)
        .with_darkness_factor(1.5);

    if !convert_to_sketch(&config, None)? {
        println!("Conversion failed. Please check the input image path.");
    }

    Ok(())
}
