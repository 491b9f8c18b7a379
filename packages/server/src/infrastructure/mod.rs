//! Infrastructure layer: concrete implementations of the domain's trait
//! seams (storage, registries, event delivery, credential verification) and
//! the wire DTOs.

pub mod auth;
pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
