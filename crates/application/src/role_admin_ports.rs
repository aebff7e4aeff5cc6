mod catalog;
mod roles;
mod sessions;

pub use catalog::PermissionCatalogRepository;
pub use roles::{Role, RoleListQuery, RolePage, RoleRepository, RoleSummary};
pub use sessions::{RoleFormSession, RoleFormSessionStore};
