//! In-memory presence and room-membership registries.
//!
//! Process-local state behind the domain's registry traits; a shared
//! external store could replace these for a multi-process deployment
//! without touching the relay logic.

pub mod presence;
pub mod rooms;

pub use presence::InMemoryPresenceRegistry;
pub use rooms::InMemoryRoomRegistry;
