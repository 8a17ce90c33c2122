use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Replays a recorded bounding-box annotation session and writes the export.
#[derive(Parser)]
#[command(name = "boxmark")]
#[command(version, about)]
struct Cli {
    /// Image to annotate; repeat for several. Falls back to the config file.
    #[arg(long = "image", value_name = "URL")]
    images: Vec<String>,

    /// JSON-lines file of recorded input events.
    #[arg(long, value_name = "FILE")]
    events: PathBuf,

    /// Directory the export file is written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Config file to use instead of the XDG `boxmark/config.json`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let events = cli.events.clone();
    let summary = boxmark::run(boxmark::RunOptions {
        images: cli.images,
        events: cli.events,
        out_dir: cli.out_dir,
        config: cli.config,
    })
    .with_context(|| format!("session replay failed for {}", events.display()))?;

    println!(
        "replayed {} events ({} rejected)",
        summary.events, summary.rejected
    );
    for path in &summary.exports {
        println!("wrote {}", path.display());
    }
    Ok(())
}
