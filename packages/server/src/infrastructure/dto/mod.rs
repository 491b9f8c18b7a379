//! Wire DTOs for the hub's protocols.
//!
//! - `websocket`: socket event envelopes (client→server and server→client)

pub mod websocket;
