use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Build a static, browsable gallery from generated panorama images into
/// `<indir>/docs/`.
#[derive(Parser)]
#[command(name = "cubepano-site")]
#[command(about = "Build a static viewer site for generated panoramas", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing panorama images and the optional plan image
    #[arg(long, default_value = ".")]
    indir: PathBuf,
}

fn main() -> Result<()> {
    cubepano::init_tracing();
    let cli = Cli::parse();
    cubepano::site::execute(&cli.indir)
}
