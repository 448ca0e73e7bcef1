use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use rayon::prelude::*;

/// Side of the rendered code, in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// Largest side `rasterize` will allocate for.
pub const MAX_SIZE: u32 = 4096;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    #[default]
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(v: ErrorCorrection) -> Self {
        match v {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// Everything the renderer needs to produce one code.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeRequest {
    pub text: String,
    pub size: u32,
    pub dark: Rgba<u8>,
    pub light: Rgba<u8>,
    pub error_correction: ErrorCorrection,
}

impl EncodeRequest {
    /// 256x256, black on white, level H.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: DEFAULT_SIZE,
            dark: Rgba([0, 0, 0, 255]),
            light: Rgba([255, 255, 255, 255]),
            error_correction: ErrorCorrection::H,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] QrError),

    #[error("target size must be non-zero")]
    ZeroSize,

    #[error("target size {size}px is smaller than the {modules} modules of the code")]
    TooSmall { size: u32, modules: usize },

    #[error("target size {size}px exceeds the {max}px limit")]
    TooLarge { size: u32, max: u32 },
}

/// Turns an [`EncodeRequest`] into a raster code.
///
/// Returning is the completion signal: the output is fully materialized when
/// `render` gives it back.
pub trait QrRenderer {
    fn render(&self, request: &EncodeRequest) -> Result<RgbaImage, RenderError>;
}

/// Renderer backed by the `qrcode` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModuleRenderer;

impl QrRenderer for ModuleRenderer {
    fn render(&self, request: &EncodeRequest) -> Result<RgbaImage, RenderError> {
        let modules = generate_modules(&request.text, request.error_correction.into())?;
        rasterize(&modules, request.size, request.dark, request.light)
    }
}

/// Module matrix of the code, `true` for dark, indexed `[[y, x]]`.
pub fn generate_modules(text: &str, ec_level: EcLevel) -> Result<Array2<bool>, RenderError> {
    let code = QrCode::with_error_correction_level(text, ec_level)?;
    let width = code.width();

    Ok(Array2::from_shape_fn((width, width), |(y, x)| {
        code[(x, y)] == qrcode::Color::Dark
    }))
}

/// Scale a module matrix to exactly `size x size` pixels.
///
/// Each pixel takes the color of the module it falls in, so the output only
/// ever contains `dark` and `light`.
pub fn rasterize(
    modules: &Array2<bool>,
    size: u32,
    dark: Rgba<u8>,
    light: Rgba<u8>,
) -> Result<RgbaImage, RenderError> {
    let count = modules.nrows();
    if size == 0 {
        return Err(RenderError::ZeroSize);
    }
    if size > MAX_SIZE {
        return Err(RenderError::TooLarge {
            size,
            max: MAX_SIZE,
        });
    }
    if count == 0 || (size as usize) < count {
        return Err(RenderError::TooSmall {
            size,
            modules: count,
        });
    }

    let side = size as usize;
    let raw: Vec<u8> = (0..side * side)
        .into_par_iter()
        .flat_map_iter(|i| {
            let y = i / side;
            let x = i % side;
            let is_dark = modules[[y * count / side, x * count / side]];
            let px = if is_dark { dark } else { light };
            px.0
        })
        .collect();

    ImageBuffer::from_raw(size, size, raw).ok_or(RenderError::TooSmall {
        size,
        modules: count,
    })
}
