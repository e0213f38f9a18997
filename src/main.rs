use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Convert all cube-face panorama sets (`<Base>1..<Base>6` images) in a
/// directory into equirectangular panoramas named after their scene titles,
/// then clean the folder of processed inputs.
#[derive(Parser)]
#[command(name = "cubepano")]
#[command(about = "Convert cube-face export sets into equirectangular panoramas", long_about = None)]
#[command(version)]
struct Cli {
    /// Output panorama width in pixels (height = width / 2)
    #[arg(long, default_value_t = 4096)]
    width: u32,

    /// Directory containing the exported face images
    #[arg(long, default_value = ".")]
    indir: PathBuf,

    /// Optional prefix for output filenames
    #[arg(long, default_value = "")]
    prefix: String,
}

fn main() -> Result<()> {
    cubepano::init_tracing();
    let cli = Cli::parse();
    cubepano::convert::execute(cli.width, &cli.indir, &cli.prefix)
}
