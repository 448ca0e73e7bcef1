use std::path::PathBuf;

use crate::qr::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Please enter some text or a URL.")]
    EmptyText,

    #[error("Failed to generate QR code.")]
    RenderingUnavailable {
        #[source]
        source: RenderError,
    },

    #[error("Failed to load or overlay logo image.")]
    LogoDecode {
        path: PathBuf,
        #[source]
        source: LogoError,
    },

    #[error("Failed to encode QR code as PNG.")]
    Encode(#[source] image::ImageError),

    #[error("No QR code to download yet!")]
    NoResultAvailable,

    #[error("Failed to save QR code to {}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a logo file could not become an image.
#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("could not read logo file: {0}")]
    Read(#[from] std::io::Error),

    #[error("logo is not a valid image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type ComposeResult<T> = Result<T, ComposeError>;
