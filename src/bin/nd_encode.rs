//! Preimage encoding utility
//!
//! Digests a static and a dynamic state file and writes both into a
//! preimage store directory, printing the hashes the driver needs.

use std::path::Path;
use std::process::ExitCode;

use nd_preimage::store::write_preimage;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 {
        eprintln!("usage: nd-encode <static-file> <dyn-file> <preimage-dir>");
        return ExitCode::from(2);
    }

    match encode(Path::new(&args[0]), Path::new(&args[1]), Path::new(&args[2])) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nd-encode: {e}");
            ExitCode::FAILURE
        }
    }
}

fn encode(static_path: &Path, dyn_path: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let static_bytes = std::fs::read(static_path)?;
    let dyn_bytes = std::fs::read(dyn_path)?;

    let static_hash = write_preimage(out_dir, &static_bytes)?;
    println!("Static hash: 0x{static_hash}");

    let dyn_hash = write_preimage(out_dir, &dyn_bytes)?;
    println!("Dynamic hash: 0x{dyn_hash}");

    Ok(())
}
