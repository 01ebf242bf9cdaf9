pub mod errors;
pub mod models;
pub mod ports;

pub use errors::PrincipalError;
pub use errors::ResolverError;
pub use errors::TokenStoreError;
pub use models::CachedCredential;
pub use models::Labels;
pub use models::Principal;
pub use ports::MembershipResolver;
pub use ports::TokenStore;
