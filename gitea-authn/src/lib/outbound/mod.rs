pub mod gitea;
pub mod stores;
