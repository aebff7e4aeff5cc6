//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_role_backend;
mod in_memory_role_backend;
mod in_memory_role_form_session_store;

pub use http_role_backend::HttpRoleBackend;
pub use in_memory_role_backend::InMemoryRoleBackend;
pub use in_memory_role_form_session_store::InMemoryRoleFormSessionStore;
