//! Real-time session hub for Rostrum.
//!
//! This library provides the server-side socket hub for a conference
//! application: authenticated WebSocket connections, presence tracking,
//! per-session chat / Q&A / video rooms, event fan-out and WebRTC signaling
//! relay between peers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
