pub mod models;
pub mod resolver;

pub use models::GiteaOrganization;
pub use resolver::GiteaMembershipResolver;
