use std::path::{Path, PathBuf};

use log::info;

use super::renderer::{PlotResolution, RenderError};


/// Presents a rendered dashboard. Implementations decide where the pixels
/// go, e.g. a window or a preview file.
pub trait FigureViewer {
    /// # Errors
    ///
    /// Will return `Err` if the figure could not be presented.
    fn show(
        &mut self,
        title: &str,
        rgb: &[u8],
        resolution: PlotResolution
    ) -> Result<(), RenderError>;
}


/// Writes every shown figure to a PNG file.
#[derive(Clone, Debug)]
pub struct PngPreview {
    path: PathBuf,
}

impl PngPreview {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FigureViewer for PngPreview {
    fn show(
        &mut self,
        title: &str,
        rgb: &[u8],
        resolution: PlotResolution
    ) -> Result<(), RenderError> {
        image::save_buffer(
            &self.path,
            rgb,
            resolution.width(),
            resolution.height(),
            image::ColorType::Rgb8
        )?;

        info!("{title}: preview written to {}", self.path.display());

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use super::*;


    #[test]
    fn preview_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let resolution = PlotResolution::new(4, 2);
        let rgb = vec![255; resolution.rgb_buffer_len()];

        PngPreview::new(&path)
            .show("Preview", &rgb, resolution)
            .unwrap();

        let preview = image::open(&path).unwrap();

        assert_eq!(4, preview.width());
        assert_eq!(2, preview.height());
    }
}
