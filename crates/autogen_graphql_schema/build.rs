use std::env;
use std::fs;

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=../linkfeed_lib/src/graphql_api");

    let out_path = env::current_dir()?.join("schema.graphql");
    fs::write(out_path, linkfeed_lib::graphql_api::api_schema_sdl())
}
