//! The currently displayed image, if any.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::LoadError;

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Source of user-chosen image paths. `None` means the user cancelled.
pub trait ImageDialog {
    fn request_image_path(&mut self) -> Option<PathBuf>;
}

/// Native file picker.
#[derive(Default)]
pub struct RfdDialog;

impl ImageDialog for RfdDialog {
    fn request_image_path(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open Image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
    }
}

pub struct LoadedImage {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

impl LoadedImage {
    pub fn size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }

    /// Natural size multiplied by an integer display scale.
    pub fn scaled_size(&self, scale: u32) -> [u32; 2] {
        let [w, h] = self.size();
        [w.saturating_mul(scale), h.saturating_mul(scale)]
    }
}

/// Reads and decodes `path` into RGBA pixels.
pub fn load_image_bytes(path: &Path) -> Result<LoadedImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LoadedImage {
        path: path.to_path_buf(),
        pixels: decoded.to_rgba8(),
    })
}

#[derive(Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Cancelled,
    Loaded,
}

#[derive(Default)]
pub struct ImageSession {
    current: Option<LoadedImage>,
    /// Bumped whenever `current` changes, so cached textures can be dropped.
    generation: u64,
}

impl ImageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.current.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().map(|img| img.path.as_path())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn replace(&mut self, image: Option<LoadedImage>) {
        self.current = image;
        self.generation += 1;
    }

    /// Asks `dialog` for a path and loads it. Cancelling leaves the session
    /// as it was; a failed load leaves it with no image.
    pub fn open_with(&mut self, dialog: &mut dyn ImageDialog) -> Result<OpenOutcome, LoadError> {
        match dialog.request_image_path() {
            Some(path) => self.load(&path).map(|()| OpenOutcome::Loaded),
            None => {
                log::debug!("image selection cancelled");
                Ok(OpenOutcome::Cancelled)
            }
        }
    }

    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        match load_image_bytes(path) {
            Ok(image) => {
                log::info!(
                    "loaded {} ({}x{})",
                    path.display(),
                    image.pixels.width(),
                    image.pixels.height()
                );
                self.replace(Some(image));
                Ok(())
            }
            Err(e) => {
                self.replace(None);
                Err(e)
            }
        }
    }

    /// Drops the current image. Returns false if there was none.
    pub fn close(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        if let Some(path) = self.path() {
            log::info!("closed {}", path.display());
        }
        self.replace(None);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(Option<PathBuf>);

    impl ImageDialog for Scripted {
        fn request_image_path(&mut self) -> Option<PathBuf> {
            self.0.take()
        }
    }

    fn write_png(dir: &Path, w: u32, h: u32) -> PathBuf {
        let path = dir.join("sprite.png");
        RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn loads_selected_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 4, 3);
        let mut session = ImageSession::new();

        let outcome = session.open_with(&mut Scripted(Some(path.clone()))).unwrap();
        assert_eq!(outcome, OpenOutcome::Loaded);
        assert_eq!(session.path(), Some(path.as_path()));
        let img = session.image().unwrap();
        assert_eq!(img.size(), [4, 3]);
        assert_eq!(img.scaled_size(10), [40, 30]);
    }

    #[test]
    fn cancel_keeps_current_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 2, 2);
        let mut session = ImageSession::new();
        session.load(&path).unwrap();
        let generation = session.generation();

        let outcome = session.open_with(&mut Scripted(None)).unwrap();
        assert_eq!(outcome, OpenOutcome::Cancelled);
        assert!(session.image().is_some());
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn unreadable_path_reverts_to_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), 2, 2);
        let mut session = ImageSession::new();
        session.load(&good).unwrap();

        let missing = dir.path().join("gone.png");
        let err = session.open_with(&mut Scripted(Some(missing))).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(session.image().is_none());
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let mut session = ImageSession::new();
        assert!(matches!(session.load(&path), Err(LoadError::Decode { .. })));
        assert!(session.image().is_none());
    }

    #[test]
    fn close_drops_image_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 1, 1);
        let mut session = ImageSession::new();
        session.load(&path).unwrap();
        assert!(session.close());
        assert!(!session.close());
        assert!(session.path().is_none());
    }
}
