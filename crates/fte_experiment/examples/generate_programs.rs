//! Generate every program of an experiment plan
//!
//! Writes one OpenQASM file per program into an output directory, plus a
//! `programs.json` index with gate counts and parity. The index is what a
//! hardware run needs to later build a recordings file for
//! `RecordedBackend`.
//!
//! Usage: `cargo run --example generate_programs -- [config.json] [out_dir]`

use anyhow::{Context, Result};
use fte_experiment::prelude::*;
use fte_experiment::build_plan;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Serialize)]
struct ProgramEntry {
    realization: Realization,
    file: String,
    parity: bool,
    one_qubit: usize,
    two_qubit: usize,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ExperimentConfig::from_json_file(&path)
            .with_context(|| format!("loading config {}", path))?,
        None => ExperimentConfig::quick(),
    };
    config.validate().context("invalid configuration")?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "programs".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    println!("{}", config);

    let synthesizer = CircuitSynthesizer::new();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(0));
    let mut index = BTreeMap::new();

    for case in build_plan(&config) {
        let program = synthesizer.synthesize(&case.circuit, case.pair, case.version, &mut rng)?;

        for realization in Realization::ALL {
            let p = program.program(realization);
            if index.contains_key(&p.name) {
                continue;
            }

            let file = format!("{:04}.qasm", index.len());
            std::fs::write(out_dir.join(&file), &p.qasm)
                .with_context(|| format!("writing {}", file))?;

            let count = program.count(realization);
            index.insert(
                p.name.clone(),
                ProgramEntry {
                    realization,
                    file,
                    parity: program.parity,
                    one_qubit: count.one_qubit,
                    two_qubit: count.two_qubit,
                },
            );
        }
    }

    let index_path = out_dir.join("programs.json");
    std::fs::write(&index_path, serde_json::to_string_pretty(&index)?)
        .with_context(|| format!("writing {}", index_path.display()))?;

    println!("Wrote {} programs to {}", index.len(), out_dir.display());
    Ok(())
}
