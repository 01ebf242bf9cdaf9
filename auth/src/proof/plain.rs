use std::fmt;

use secrecy::ExposeSecret;
use secrecy::SecretSlice;
use secrecy::SecretString;

/// Unhashed proof of a `(principal, credential)` pair.
///
/// Encoded as the big-endian length of the principal, the principal bytes and then the
/// credential bytes, so two distinct pairs never share an encoding. The bytes are zeroed on drop.
pub struct PlainProof(SecretSlice<u8>);

impl PlainProof {
    /// Build the plain proof for a principal and its raw credential.
    ///
    /// # Arguments
    /// * `principal` - Identity being authenticated
    /// * `credential` - Raw credential supplied by the caller
    ///
    /// # Returns
    /// PlainProof ready to be hashed or verified
    pub fn new(principal: &str, credential: &SecretString) -> Self {
        let credential = credential.expose_secret().as_bytes();

        let mut bytes = Vec::with_capacity(8 + principal.len() + credential.len());
        bytes.extend_from_slice(&(principal.len() as u64).to_be_bytes());
        bytes.extend_from_slice(principal.as_bytes());
        bytes.extend_from_slice(credential);

        Self(SecretSlice::from(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for PlainProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainProof([REDACTED])")
    }
}
