#[macro_use]
extern crate derivative;

mod cli;
mod config;
mod logger;

#[cfg(feature = "display")]
mod viewer;

use anyhow::Result;
use clap::Parser;
use sketch_effect::{ResultSink, convert_to_sketch};

fn main() -> Result<()> {
    logger::init_logger();

    let args = cli::Args::parse();
    let preset = match &args.config {
        Some(path) => config::Preset::load(path)?,
        None => config::Preset::default(),
    };

    let config = args.to_convert_config(preset);
    log::debug!("{config:?}");

    #[cfg(feature = "display")]
    let viewer = viewer::SketchViewer;
    #[cfg(feature = "display")]
    let sink: Option<&dyn ResultSink> = Some(&viewer);

    #[cfg(not(feature = "display"))]
    let sink: Option<&dyn ResultSink> = {
        if config.show_result {
            log::warn!("built without the `display` feature, the sketch will not be shown");
        }
        None
    };

    if !convert_to_sketch(&config, sink)? {
        println!("Conversion failed. Please check the input image path.");
        std::process::exit(1);
    }

    Ok(())
}
