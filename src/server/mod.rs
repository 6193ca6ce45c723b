pub mod config;
pub mod envelope;
mod http_layers;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{bind, make_app, run_server};
