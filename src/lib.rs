pub mod args;
pub mod composer;
pub mod error;
pub mod logging;
pub mod preview;
pub mod qr;
pub mod raster;

pub use composer::{load_image_file, Composer, CompositeResult, EXPORT_FILE_NAME};
pub use error::{ComposeError, ComposeResult, LogoError};
pub use qr::{EncodeRequest, ErrorCorrection, ModuleRenderer, QrRenderer, RenderError};

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Generate, preview and save as the command line asks.
///
/// Returns where the PNG was written, or `None` with `--no-save`.
pub fn run(args: &args::Args) -> Result<Option<PathBuf>> {
    let mut composer = Composer::new();

    let result = composer
        .generate(&args.text, args.logo.as_deref())
        .context("Could not generate the QR code")?;

    if args.preview {
        print!("{}", preview::render_terminal(&result.image, args.preview_width));
    }

    if args.data_uri {
        println!("{}", result.data_uri());
    }

    if args.no_save {
        return Ok(None);
    }

    let path = composer
        .export(&args.out_dir)
        .with_context(|| format!("Could not save to {}", args.out_dir.display()))?;
    Ok(Some(path))
}
