//! In-memory implementations of the storage collaborator traits.
//!
//! The hub treats storage as an external service; these `Mutex<HashMap>`
//! implementations back the dev server and the tests. A document-store
//! implementation would satisfy the same traits.

pub mod messages;
pub mod sessions;
pub mod users;

pub use messages::InMemoryMessageStore;
pub use sessions::InMemorySessionStore;
pub use users::InMemoryUserStore;
