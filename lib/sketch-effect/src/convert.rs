//! Load an image from disk, turn it into a pencil sketch and save it.

use crate::{ResultSink, SketchEffectResult, sketch::PencilSketchConfig};
use derivative::Derivative;
use derive_setters::Setters;
use image::{DynamicImage, ImageDecoder, ImageReader, ImageResult};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// File level conversion configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ConvertConfig {
    pub input_path: PathBuf,

    /// `None` writes relative to the current working directory
    #[setters(strip_option)]
    pub output_folder: Option<PathBuf>,

    #[derivative(Default(value = "PathBuf::from(\"pencil_sketch.jpg\")"))]
    pub output_name: PathBuf,

    #[derivative(Default(value = "true"))]
    pub show_result: bool,

    #[derivative(Default(value = "1.3"))]
    pub darkness_factor: f32,
}

impl ConvertConfig {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self::default().with_input_path(input_path.into())
    }
}

/// Convert `config.input_path` into a pencil sketch, printing progress to
/// stdout and load failures to stderr.
///
/// Returns `Ok(false)` when the input image can not be loaded. Failing to
/// create the output folder or to encode the result is an error.
pub fn convert_to_sketch(
    config: &ConvertConfig,
    sink: Option<&dyn ResultSink>,
) -> SketchEffectResult<bool> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    convert_with(config, sink, &mut stdout.lock(), &mut stderr.lock())
}

/// Same as [`convert_to_sketch`], with every console message written to
/// `console`.
pub fn convert_to_sketch_with_console<W: Write>(
    config: &ConvertConfig,
    sink: Option<&dyn ResultSink>,
    console: &mut W,
) -> SketchEffectResult<bool> {
    let mut errors = Vec::new();
    let result = convert_with(config, sink, console, &mut errors);
    console.write_all(&errors)?;
    result
}

fn convert_with(
    config: &ConvertConfig,
    sink: Option<&dyn ResultSink>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> SketchEffectResult<bool> {
    let image = match load_image(&config.input_path) {
        Ok(image) => image.to_rgb8(),
        Err(e) => {
            log::warn!("load {} failed: {e}", config.input_path.display());
            writeln!(
                err,
                "Error: Could not load image from {}",
                config.input_path.display()
            )?;
            return Ok(false);
        }
    };

    log::info!(
        "loaded {} ({}x{})",
        config.input_path.display(),
        image.width(),
        image.height()
    );

    let sketch = PencilSketchConfig::new()
        .with_darkness_factor(config.darkness_factor)
        .render(&image)?;

    let output_path = resolve_output_path(config.output_folder.as_deref(), &config.output_name)?;
    sketch.save(&output_path)?;
    writeln!(out, "Sketch saved to: {}", output_path.display())?;

    match (config.show_result, sink) {
        (true, Some(sink)) => sink.present(&sketch)?,
        (true, None) => log::info!("no display available, skip showing the result"),
        _ => (),
    }

    Ok(true)
}

/// Decode an image, picking the format from the file content rather than the
/// extension, and turn it upright according to its EXIF orientation.
pub fn load_image(path: &Path) -> ImageResult<DynamicImage> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;

    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);

    Ok(image)
}

/// Join `output_name` onto `output_folder`, creating the folder and its
/// parents first. Without a folder the name is used as is.
pub fn resolve_output_path(
    output_folder: Option<&Path>,
    output_name: &Path,
) -> SketchEffectResult<PathBuf> {
    match output_folder {
        Some(folder) if !folder.as_os_str().is_empty() => {
            fs::create_dir_all(folder)?;
            Ok(folder.join(output_name))
        }
        _ => Ok(output_name.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SketchEffectError;
    use image::{GrayImage, Rgb, RgbImage};
    use std::cell::Cell;
    use tempfile::tempdir;

    fn write_test_photo(path: &Path) {
        let image = RgbImage::from_fn(100, 100, |x, y| {
            Rgb([(x * 2) as u8, (y * 2) as u8, ((x + y) % 256) as u8])
        });
        image.save(path).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::new("in.jpg");
        assert_eq!(config.input_path, PathBuf::from("in.jpg"));
        assert_eq!(config.output_folder, None);
        assert_eq!(config.output_name, PathBuf::from("pencil_sketch.jpg"));
        assert!(config.show_result);
        assert_eq!(config.darkness_factor, 1.3);
    }

    #[test]
    fn test_convert_end_to_end() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("photo.jpg");
        write_test_photo(&input);

        let out_dir = temp_dir.path().join("out");
        let config = ConvertConfig::new(&input)
            .with_output_folder(out_dir.clone())
            .with_output_name(PathBuf::from("result.jpg"))
            .with_darkness_factor(1.5)
            .with_show_result(false);

        let mut console = Vec::new();
        let ok = convert_to_sketch_with_console(&config, None, &mut console).unwrap();
        assert!(ok);

        let output = out_dir.join("result.jpg");
        assert!(output.exists());

        let saved = image::open(&output).unwrap();
        assert_eq!((saved.width(), saved.height()), (100, 100));
        assert_eq!(saved.color(), image::ColorType::L8);

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains(&output.display().to_string()));
        assert!(console.contains(&Path::new("out").join("result.jpg").display().to_string()));
    }

    #[test]
    fn test_missing_input() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("missing.jpg");
        let out_dir = temp_dir.path().join("out");

        let config = ConvertConfig::new(&input)
            .with_output_folder(out_dir.clone())
            .with_show_result(false);

        let mut console = Vec::new();
        let ok = convert_to_sketch_with_console(&config, None, &mut console).unwrap();
        assert!(!ok);
        assert!(!out_dir.join("pencil_sketch.jpg").exists());

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Could not load image"));
        assert!(console.contains(&input.display().to_string()));
    }

    #[test]
    fn test_undecodable_input() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("broken.png");
        fs::write(&input, b"definitely not a png").unwrap();

        let config = ConvertConfig::new(&input).with_show_result(false);
        let mut console = Vec::new();
        assert!(!convert_to_sketch_with_console(&config, None, &mut console).unwrap());
    }

    #[test]
    fn test_format_from_content() {
        let temp_dir = tempdir().unwrap();
        let png = temp_dir.path().join("photo.png");
        write_test_photo(&png);

        let no_extension = temp_dir.path().join("photo");
        let wrong_extension = temp_dir.path().join("photo-as.jpg");
        fs::copy(&png, &no_extension).unwrap();
        fs::copy(&png, &wrong_extension).unwrap();

        for input in [no_extension, wrong_extension] {
            let config = ConvertConfig::new(&input)
                .with_output_folder(temp_dir.path().join("out"))
                .with_show_result(false);

            let mut console = Vec::new();
            assert!(
                convert_to_sketch_with_console(&config, None, &mut console).unwrap(),
                "{} should load",
                input.display()
            );
        }
    }

    #[test]
    fn test_tiff_and_webp_input() {
        let temp_dir = tempdir().unwrap();

        for name in ["photo.tiff", "photo.webp"] {
            let input = temp_dir.path().join(name);
            write_test_photo(&input);

            let config = ConvertConfig::new(&input)
                .with_output_folder(temp_dir.path().join("out"))
                .with_show_result(false);

            let mut console = Vec::new();
            assert!(
                convert_to_sketch_with_console(&config, None, &mut console).unwrap(),
                "{name} should load"
            );
        }
    }

    #[test]
    fn test_exif_orientation_applied() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("rotated.jpg");

        // stored as 40x20, EXIF orientation 6 asks for a 90 degree clockwise turn
        let mut encoded = Vec::new();
        RgbImage::from_pixel(40, 20, Rgb([120, 80, 40]))
            .write_to(&mut io::Cursor::new(&mut encoded), image::ImageFormat::Jpeg)
            .unwrap();

        let mut app1 = vec![0xFF, 0xE1, 0x00, 0x22];
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(&[b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08]);
        app1.extend_from_slice(&[0x00, 0x01]);
        app1.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        app1.extend_from_slice(&[0x00, 0x06, 0x00, 0x00]);
        app1.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut tagged = encoded[..2].to_vec();
        tagged.extend_from_slice(&app1);
        tagged.extend_from_slice(&encoded[2..]);
        fs::write(&input, tagged).unwrap();

        let loaded = load_image(&input).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (20, 40));

        let out_dir = temp_dir.path().join("out");
        let config = ConvertConfig::new(&input)
            .with_output_folder(out_dir.clone())
            .with_output_name(PathBuf::from("upright.png"))
            .with_show_result(false);

        let mut console = Vec::new();
        assert!(convert_to_sketch_with_console(&config, None, &mut console).unwrap());

        let saved = image::open(out_dir.join("upright.png")).unwrap();
        assert_eq!((saved.width(), saved.height()), (20, 40));
    }

    #[test]
    fn test_overwrite_same_output() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("photo.png");
        write_test_photo(&input);

        let out_dir = temp_dir.path().join("nested").join("out");
        let config = ConvertConfig::new(&input)
            .with_output_folder(out_dir.clone())
            .with_output_name(PathBuf::from("sketch.png"))
            .with_show_result(false);

        let mut console = Vec::new();
        assert!(convert_to_sketch_with_console(&config, None, &mut console).unwrap());
        let first = fs::read(out_dir.join("sketch.png")).unwrap();

        assert!(convert_to_sketch_with_console(&config, None, &mut console).unwrap());
        let second = fs::read(out_dir.join("sketch.png")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sink_called_only_when_requested() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("photo.png");
        write_test_photo(&input);

        let calls = Cell::new(0);
        let sink = |image: &GrayImage| -> SketchEffectResult<()> {
            assert_eq!(image.dimensions(), (100, 100));
            calls.set(calls.get() + 1);
            Ok(())
        };

        let config = ConvertConfig::new(&input)
            .with_output_folder(temp_dir.path().join("out"))
            .with_show_result(false);

        let mut console = Vec::new();
        convert_to_sketch_with_console(&config, Some(&sink), &mut console).unwrap();
        assert_eq!(calls.get(), 0);

        let config = config.with_show_result(true);
        convert_to_sketch_with_console(&config, Some(&sink), &mut console).unwrap();
        assert_eq!(calls.get(), 1);

        // headless: asking for display without a sink just skips it
        assert!(convert_to_sketch_with_console(&config, None, &mut console).unwrap());
    }

    #[test]
    fn test_sink_error_propagates() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("photo.png");
        write_test_photo(&input);

        let sink = |_: &GrayImage| -> SketchEffectResult<()> {
            Err(SketchEffectError::Display("no window".to_string()))
        };

        let config = ConvertConfig::new(&input).with_output_folder(temp_dir.path().join("out"));
        let mut console = Vec::new();
        assert!(matches!(
            convert_to_sketch_with_console(&config, Some(&sink), &mut console),
            Err(SketchEffectError::Display(_))
        ));
    }

    #[test]
    fn test_resolve_output_path() {
        let temp_dir = tempdir().unwrap();

        let path = resolve_output_path(None, Path::new("a.jpg")).unwrap();
        assert_eq!(path, PathBuf::from("a.jpg"));

        let folder = temp_dir.path().join("x").join("y");
        let path = resolve_output_path(Some(&folder), Path::new("a.jpg")).unwrap();
        assert!(folder.is_dir());
        assert_eq!(path, folder.join("a.jpg"));

        // already exists
        let again = resolve_output_path(Some(&folder), Path::new("a.jpg")).unwrap();
        assert_eq!(path, again);
    }

    #[test]
    fn test_folder_creation_failure() {
        let temp_dir = tempdir().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        let result = resolve_output_path(Some(&blocker.join("sub")), Path::new("a.jpg"));
        assert!(matches!(result, Err(SketchEffectError::Io(_))));
    }
}
