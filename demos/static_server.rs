//! Serve a directory over HTTP.
//!
//! Usage: `cargo run --example static_server -- [ADDR] [ROOT]`
//! or `cargo run --example static_server -- --config server.json`.
//!
//! Set `RUST_LOG=debug` to see per-connection diagnostics.

use microserve::{HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.as_slice() {
        [flag, path] if flag == "--config" => ServerConfig::from_json_file(path)?,
        [] => ServerConfig::default(),
        [addr] => ServerConfig::new(addr.parse()?, "."),
        [addr, root, ..] => ServerConfig::new(addr.parse()?, root),
    };

    HttpServer::new(config)?.start().await?;
    Ok(())
}
