pub mod config;
pub mod inbound;
pub mod outbound;

use auth::Authenticator;

pub use outbound::gitea;
pub use outbound::stores;

/// Caching authenticator wired to the Gitea API and the configured token store.
pub type GiteaAuthenticator =
    Authenticator<stores::TokenStoreBackend, gitea::GiteaMembershipResolver>;
