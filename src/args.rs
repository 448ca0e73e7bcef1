use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logo-qr")]
#[command(about = "Generate a 256x256 QR code PNG, optionally with a logo centered on it")]
pub struct Args {
    /// Text or URL to encode in the QR code
    pub text: String,

    /// Logo image to overlay at the center of the code
    #[arg(short, long)]
    pub logo: Option<PathBuf>,

    /// Directory qr_code.png is written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Print a preview of the result to the terminal
    #[arg(short, long)]
    pub preview: bool,

    /// Width of the terminal preview in characters (default: 64)
    #[arg(long, default_value = "64")]
    pub preview_width: u32,

    /// Print the PNG as a data URI on stdout
    #[arg(long)]
    pub data_uri: bool,

    /// Do not write qr_code.png
    #[arg(long)]
    pub no_save: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
