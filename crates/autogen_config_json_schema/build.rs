use std::env;
use std::fs::File;
use std::io::*;

use linkfeed_lib::config::Config;
use schemars::schema_for;

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=../linkfeed_lib/src/config.rs");

    let out_path = env::current_dir()?.join("schema.json");
    let mut f = File::create(&out_path)?;

    let schema = schema_for!(Config);
    let json = serde_json::to_string_pretty(&schema).map_err(Error::from)?;
    f.write_all(json.as_bytes())?;

    Ok(())
}
