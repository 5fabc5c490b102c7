//! Image asset registry
//!
//! Images are loaded once per distinct path and live for the rest of the
//! process. Lookup is a linear scan; a game this size has a handful of assets.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Index of an image in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// Opaque handle to a decoded bitmap owned by the drawing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// What an `ImageLoader` hands back for a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
}

/// External image decoding collaborator
pub trait ImageLoader {
    fn load_image(&mut self, path: &str) -> Result<LoadedImage, AssetError>;
}

/// A registered image
#[derive(Debug, Clone)]
pub struct Image {
    pub path: String,
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct AssetRegistry {
    images: Vec<Image>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of the image at `path`, loading it on first request.
    ///
    /// A failed load registers nothing.
    pub fn get_or_load_image(
        &mut self,
        path: &str,
        loader: &mut dyn ImageLoader,
    ) -> Result<AssetId, AssetError> {
        if let Some(id) = self.find(path) {
            return Ok(id);
        }

        let loaded = loader.load_image(path)?;
        let id = AssetId(self.images.len() as u32);
        log::debug!(
            "Loaded image {} ({}x{}) as asset {}",
            path,
            loaded.width,
            loaded.height,
            id.0
        );
        self.images.push(Image {
            path: path.to_string(),
            handle: loaded.handle,
            width: loaded.width,
            height: loaded.height,
        });
        Ok(id)
    }

    /// Find an already-registered image by path
    pub fn find(&self, path: &str) -> Option<AssetId> {
        self.images
            .iter()
            .position(|image| image.path == path)
            .map(|index| AssetId(index as u32))
    }

    pub fn image(&self, id: AssetId) -> Option<&Image> {
        self.images.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
