use anyhow::Result;
use appicon_gen::icon_set::{self, DuplicatePolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "appicon-gen",
    about = "Draw the Format Finder app icon and write an iOS AppIcon.appiconset"
)]
struct Args {
    /// Output directory, usually `<App>/Assets.xcassets/AppIcon.appiconset`.
    #[clap(short, long, value_name = "DIR", env = "APPICON_OUTPUT_DIR")]
    output: PathBuf,

    /// Render repeated icon names again and list every repeat in Contents.json
    #[clap(long)]
    keep_duplicates: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let policy = if args.keep_duplicates {
        DuplicatePolicy::Keep
    } else {
        DuplicatePolicy::Skip
    };

    println!("Generating app icons...");
    let contents = icon_set::generate(&args.output, policy)?;

    println!("\nAll {} icons generated successfully!", contents.len());
    Ok(())
}
