//! Raintex - builds the water and raindrop textures used by the rain shaders.
//!
//! Writes the DuDv map, the night-sky reflection map and the glow sprite under
//! `textures/` (or `--out-dir`).

use clap::Parser;

use raintex::cli::{self, Args};
use raintex::FileSink;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Raintex - rain effect texture generator");
    println!("  Output: {}", args.out_dir.display());
    println!("  Seed: {}\n", args.seed);

    let reports = cli::run(&args, &FileSink)?;

    for report in &reports {
        if report.skipped {
            println!("  {} (exists, skipped)", report.path.display());
            continue;
        }
        println!("  {}", report.path.display());
        println!("    Resolution: {}x{} pixels", report.width, report.height);
        println!("    Format: {}", report.encoding);
        println!("    Time: {:.2}ms", report.elapsed.as_secs_f64() * 1000.0);
    }

    Ok(())
}
