//! Generate a codec module for every schema under `schemas/` into `OUT_DIR`.

use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

use tessel_gen::{generate_schema, GeneratorConfig};

const SCHEMAS: &[&str] = &["kennel"];

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    for name in SCHEMAS {
        let path = manifest_dir.join("schemas").join(format!("{name}.json"));
        println!("cargo:rerun-if-changed={}", path.display());

        let schema = tessel_ir::load_schema(&fs::read_to_string(&path)?)?;
        let unit = generate_schema(&schema, GeneratorConfig::default())
            .map_err(|failed| failed.render())?;
        fs::write(out_dir.join(format!("{name}_codecs.rs")), unit.source())?;
    }
    Ok(())
}
