pub mod health;
pub mod permissions;
pub mod role_form;
pub mod roles;
