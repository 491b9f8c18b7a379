//! Transport layer: axum router, HTTP endpoints and the WebSocket
//! connection lifecycle.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
