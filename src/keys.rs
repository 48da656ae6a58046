use crate::derivation::{DerivationError, DerivationPath, ExtendedKey};
use ed25519_dalek::{PublicKey, SecretKey};
use std::fmt;
use std::error::Error;

#[derive(Debug)]
pub enum KeyPairError {
    DerivationError(DerivationError),
    InvalidSeed,
}

impl fmt::Display for KeyPairError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyPairError::DerivationError(e) => write!(f, "Derivation error: {}", e),
            KeyPairError::InvalidSeed => write!(f, "Invalid signing seed"),
        }
    }
}

impl Error for KeyPairError {}

impl From<DerivationError> for KeyPairError {
    fn from(err: DerivationError) -> Self {
        KeyPairError::DerivationError(err)
    }
}

/// An ed25519 key pair in the byte layout Solana tooling expects:
/// the 64-byte secret key is the 32-byte signing seed followed by the
/// 32-byte public key.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Keypair {
    pub public_key: [u8; 32],
    pub secret_key: [u8; 64],
}

impl Keypair {
    // Create a key pair from a 32-byte signing seed
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, KeyPairError> {
        let secret = SecretKey::from_bytes(seed).map_err(|_| KeyPairError::InvalidSeed)?;
        let public = PublicKey::from(&secret);

        let mut secret_key = [0u8; 64];
        secret_key[..32].copy_from_slice(seed);
        secret_key[32..].copy_from_slice(public.as_bytes());

        Ok(Keypair {
            public_key: public.to_bytes(),
            secret_key,
        })
    }

    // Derive the key pair sitting at a path under a 64-byte master seed
    pub fn from_path(seed: &[u8; 64], path: &DerivationPath) -> Result<Self, KeyPairError> {
        let root = ExtendedKey::from_seed(seed)?;
        let derived = path.derive(&root)?;
        Self::from_seed(&derived.key)
    }

    // The signing seed half (for re-derivation checks and export)
    pub fn signing_seed(&self) -> [u8; 32] {
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&self.secret_key[..32]);
        seed
    }
}
