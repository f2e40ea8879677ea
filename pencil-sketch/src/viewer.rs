use image::{DynamicImage, GrayImage};
use sketch_effect::{ResultSink, SketchEffectError, SketchEffectResult};
use slint::{ComponentHandle, Image, PhysicalSize, Rgb8Pixel, SharedPixelBuffer};

slint::slint! {
    export component SketchWindow inherits Window {
        in property <image> sketch;
        callback dismiss();

        title: "Pencil Sketch";
        forward-focus: scope;

        Image {
            source: root.sketch;
            width: parent.width;
            height: parent.height;
            image-fit: contain;
        }

        scope := FocusScope {
            key-pressed(event) => {
                root.dismiss();
                accept
            }
        }
    }
}

/// Shows the sketch in a window and blocks until any key is pressed.
pub struct SketchViewer;

impl ResultSink for SketchViewer {
    fn present(&self, image: &GrayImage) -> SketchEffectResult<()> {
        let rgb = DynamicImage::ImageLuma8(image.clone()).to_rgb8();
        let buffer = SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
        );

        let ui = SketchWindow::new().map_err(|e| SketchEffectError::Display(e.to_string()))?;
        ui.set_sketch(Image::from_rgb8(buffer));
        ui.window().set_size(PhysicalSize::new(rgb.width(), rgb.height()));

        ui.on_dismiss(|| {
            _ = slint::quit_event_loop();
        });

        log::info!("showing sketch, press any key to close");
        ui.run().map_err(|e| SketchEffectError::Display(e.to_string()))
    }
}
