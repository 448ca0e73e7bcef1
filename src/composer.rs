use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, warn};

use crate::error::{ComposeError, ComposeResult, LogoError};
use crate::qr::{EncodeRequest, ModuleRenderer, QrRenderer, RenderError};
use crate::raster;

/// Name of the file written by [`Composer::export`].
pub const EXPORT_FILE_NAME: &str = "qr_code.png";

/// A finished code, ready to preview or save.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeResult {
    pub image: RgbaImage,
    pub png: Vec<u8>,
    pub has_logo: bool,
}

impl CompositeResult {
    pub fn data_uri(&self) -> String {
        raster::data_uri(&self.png)
    }
}

/// Coordinates rendering, logo compositing and export.
///
/// Holds at most one result. It is replaced only when a generate call fully
/// succeeds, so a failed call never disturbs what can be exported.
pub struct Composer<R = ModuleRenderer> {
    renderer: R,
    current: Option<CompositeResult>,
}

impl Composer<ModuleRenderer> {
    pub fn new() -> Self {
        Self::with_renderer(ModuleRenderer)
    }
}

impl Default for Composer<ModuleRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: QrRenderer> Composer<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&CompositeResult> {
        self.current.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some()
    }

    /// Render `text` as a code, optionally with the logo at `logo` centered on it.
    ///
    /// Taking `&mut self` keeps generate calls on one composer strictly
    /// sequential.
    pub fn generate(
        &mut self,
        text: &str,
        logo: Option<&Path>,
    ) -> ComposeResult<&CompositeResult> {
        let text = text.trim();
        if text.is_empty() {
            warn!("refusing to generate a code for empty text");
            return Err(ComposeError::EmptyText);
        }

        let request = EncodeRequest::new(text);
        debug!(
            size = request.size,
            ec = ?request.error_correction,
            "rendering QR code"
        );

        let code = self.renderer.render(&request).map_err(|source| {
            warn!(error = %source, "renderer produced no output");
            ComposeError::RenderingUnavailable { source }
        })?;
        if code.width() == 0 || code.height() == 0 {
            return Err(ComposeError::RenderingUnavailable {
                source: RenderError::ZeroSize,
            });
        }

        let (image, has_logo) = match logo {
            None => (code, false),
            Some(path) => {
                let logo = load_image_file(path)?;
                let placement = raster::logo_placement(code.width(), code.height());
                debug!(
                    x = placement.x,
                    y = placement.y,
                    size = placement.size,
                    "overlaying logo"
                );
                (raster::composite(&code, &logo, placement), true)
            }
        };

        let png = raster::encode_png(&image).map_err(ComposeError::Encode)?;
        info!(
            width = image.width(),
            height = image.height(),
            bytes = png.len(),
            has_logo,
            "QR code ready"
        );

        Ok(&*self.current.insert(CompositeResult {
            image,
            png,
            has_logo,
        }))
    }

    /// Save the current result as `qr_code.png` inside `dir`.
    pub fn export(&self, dir: &Path) -> ComposeResult<PathBuf> {
        let result = self.current.as_ref().ok_or_else(|| {
            warn!("export requested before any code was generated");
            ComposeError::NoResultAvailable
        })?;

        let path = dir.join(EXPORT_FILE_NAME);
        fs::write(&path, &result.png).map_err(|source| ComposeError::Export {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "saved QR code");
        Ok(path)
    }
}

/// Read `path` and decode it as an image, guessing the format from content.
pub fn load_image_file(path: &Path) -> ComposeResult<DynamicImage> {
    let decoded = fs::read(path)
        .map_err(LogoError::from)
        .and_then(|bytes| raster::decode_image_bytes(&bytes).map_err(LogoError::from));

    decoded.map_err(|source| {
        warn!(path = %path.display(), error = %source, "could not load logo");
        ComposeError::LogoDecode {
            path: path.to_path_buf(),
            source,
        }
    })
}
