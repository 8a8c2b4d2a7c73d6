use chanvese_solver::{chanvese, utils, SolverConfig};
use log::info;
use std::env;
use std::fs;
use std::path::Path;

fn usage() -> String {
    "Usage: chanvese <input-image|synthetic> <mask-out.png> [config.json] [phi-out.png]".to_string()
}

pub fn load_config(path: &Path) -> Result<SolverConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let input = args.next().ok_or_else(usage)?;
    let mask_out = args.next().ok_or_else(usage)?;
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => SolverConfig::default(),
    };
    let phi_out = args.next();

    let img = if input == "synthetic" {
        utils::synthetic_blobs(256, 128, 30.0, &mut rand::thread_rng())
    } else {
        utils::load_grayscale(&input).map_err(|e| format!("Failed to load {input}: {e}"))?
    };
    let seg = chanvese(&img, None, &config, |_| {}).map_err(|e| e.to_string())?;
    info!(
        "finished after {} iterations, {} foreground pixels",
        seg.iterations,
        seg.partition.iter().filter(|&(_, _, &v)| v).count()
    );

    utils::save_boolgrid(&seg.partition, &mask_out)
        .map_err(|e| format!("Failed to write {mask_out}: {e}"))?;
    if let Some(path) = phi_out {
        utils::save_floatgrid(&seg.phi, &path).map_err(|e| format!("Failed to write {path}: {e}"))?;
    }
    Ok(())
}
