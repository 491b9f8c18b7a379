//! Event delivery implementations.
//!
//! Concrete implementations of the `EventPusher` trait. Currently only the
//! WebSocket transport; a shared pub/sub backplane would slot in behind the
//! same trait for a multi-process deployment.

pub mod websocket;

pub use websocket::WebSocketEventPusher;
