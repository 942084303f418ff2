//! Serve command handler

use crate::commands::ServeArgs;
use crate::dev_server::{DevServer, DevServerConfig};
use crate::error::CliResult;
use crate::handlers::render::load_fixtures;

/// Server config from CLI args
#[must_use]
pub fn server_config(args: &ServeArgs) -> DevServerConfig {
    DevServerConfig {
        host: args.host.clone(),
        port: args.port,
        cors: !args.no_cors,
    }
}

/// Loads the fixtures and serves them until the process stops
pub async fn execute_serve(args: &ServeArgs) -> CliResult<()> {
    let store = load_fixtures(&args.fixtures)?;
    let server = DevServer::new(server_config(args), store);
    eprintln!("Serving fixtures at {}", server.http_url());
    eprintln!("  preview: {}/preview?slug=<collection>", server.http_url());
    server.run().await
}
