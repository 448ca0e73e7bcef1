use anyhow::Result;
use clap::Parser;
use logo_qr::args::Args;
use logo_qr::logging::init_logging;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(path) = logo_qr::run(&args)? {
        eprintln!("Saved to: {}", path.display());
    }
    Ok(())
}
