use crate::config::Preset;
use clap::Parser;
use sketch_effect::ConvertConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Turn a photo into a pencil sketch")]
pub struct Args {
    /// Image to convert
    pub input: PathBuf,

    /// Folder to save the sketch in, created if missing [default: current directory]
    #[arg(short = 'o', long)]
    pub output_folder: Option<PathBuf>,

    /// File name of the sketch, its extension picks the format [default: pencil_sketch.jpg]
    #[arg(short = 'n', long)]
    pub output_name: Option<PathBuf>,

    /// Darkness factor, 1.0 to 2.0 is the useful range [default: 1.3]
    #[arg(short, long)]
    pub darkness: Option<f32>,

    /// Do not open a window with the result
    #[arg(long)]
    pub no_show: bool,

    /// TOML file with conversion defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Command line flags win over the preset.
    pub fn to_convert_config(&self, preset: Preset) -> ConvertConfig {
        let mut config = ConvertConfig::new(&self.input)
            .with_output_name(self.output_name.clone().unwrap_or(preset.output_name))
            .with_show_result(preset.show_result && !self.no_show)
            .with_darkness_factor(self.darkness.unwrap_or(preset.darkness_factor));

        if let Some(folder) = self.output_folder.clone().or(preset.output_folder) {
            config = config.with_output_folder(folder);
        }

        config
    }
}
