use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;

type HmacSha512 = Hmac<Sha512>;

const HARDENED_BIT: u32 = 0x80000000;

// Domain-separation key for the SLIP-0010 ed25519 master key
const MASTER_HMAC_KEY: &[u8] = b"ed25519 seed";

#[derive(Debug, PartialEq, Eq)]
pub enum DerivationError {
    InvalidPath,
    InvalidChildNumber,
    NonHardenedChild,
    HmacError,
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DerivationError::InvalidPath => write!(f, "Invalid derivation path"),
            DerivationError::InvalidChildNumber => write!(f, "Invalid child number"),
            DerivationError::NonHardenedChild => {
                write!(f, "ed25519 derivation only supports hardened children")
            }
            DerivationError::HmacError => write!(f, "HMAC operation failed"),
        }
    }
}

impl std::error::Error for DerivationError {}

/// A SLIP-0010 extended key: the running 32-byte key and chain code.
///
/// Unlike the secp256k1 flavor there is no public key mid-chain; every
/// child is hardened, so derivation only ever touches the private half.
#[derive(Clone, Debug)]
pub struct ExtendedKey {
    pub key: [u8; 32],
    pub chain_code: [u8; 32],
    pub depth: u8,
    pub child_number: u32,
}

impl ExtendedKey {
    /// Creates the master key from a seed
    pub fn from_seed(seed: &[u8]) -> Result<Self, DerivationError> {
        // HMAC-SHA512 with key "ed25519 seed"
        let mut hmac = HmacSha512::new_from_slice(MASTER_HMAC_KEY)
            .map_err(|_| DerivationError::HmacError)?;

        hmac.update(seed);
        let result = hmac.finalize().into_bytes();

        // Split the result into left and right halves
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&result[0..32]);
        chain_code.copy_from_slice(&result[32..64]);

        Ok(ExtendedKey {
            key,
            chain_code,
            depth: 0,
            child_number: 0,
        })
    }

    /// Derives a hardened child key for the provided index
    pub fn derive_child(&self, index: u32) -> Result<Self, DerivationError> {
        if index & HARDENED_BIT == 0 {
            return Err(DerivationError::NonHardenedChild);
        }

        // Prepare the data for HMAC: 0x00 || parent key || index
        let mut data = Vec::with_capacity(37);
        data.push(0);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&index.to_be_bytes());

        // HMAC-SHA512 keyed by the parent chain code
        let mut hmac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|_| DerivationError::HmacError)?;

        hmac.update(&data);
        let result = hmac.finalize().into_bytes();

        // Split the result into left and right halves
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&result[0..32]);
        chain_code.copy_from_slice(&result[32..64]);

        Ok(ExtendedKey {
            key,
            chain_code,
            depth: self.depth + 1,
            child_number: index,
        })
    }
}

/// Represents a BIP32-style derivation path of hardened indices
#[derive(Debug, Clone)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    /// Creates a new derivation path from a string
    pub fn from_str(path: &str) -> Result<Self, DerivationError> {
        let mut components = path.split('/');

        if components.next() != Some("m") {
            return Err(DerivationError::InvalidPath);
        }

        let indices: Result<Vec<u32>, _> = components
            .filter(|s| !s.is_empty())
            .map(|component| {
                let hardened = component.ends_with('\'') || component.ends_with('h');
                if !hardened {
                    return Err(DerivationError::NonHardenedChild);
                }

                let index_str = &component[..component.len() - 1];
                match index_str.parse::<u32>() {
                    Ok(index) if index < HARDENED_BIT => Ok(index | HARDENED_BIT),
                    _ => Err(DerivationError::InvalidChildNumber),
                }
            })
            .collect();

        indices.map(|indices| DerivationPath { indices })
    }

    /// Derives a key following this path
    pub fn derive(&self, root: &ExtendedKey) -> Result<ExtendedKey, DerivationError> {
        let mut key = root.clone();

        for &index in &self.indices {
            key = key.derive_child(index)?;
        }

        Ok(key)
    }

    /// Walks the whole path from a seed and returns the 32-byte leaf key
    pub fn derive_from_seed(&self, seed: &[u8]) -> Result<[u8; 32], DerivationError> {
        let root = ExtendedKey::from_seed(seed)?;
        Ok(self.derive(&root)?.key)
    }
}

/// Utility functions for common derivation paths
pub mod paths {
    use super::DerivationPath;

    /// Solana - Coin type 501
    pub const SOLANA: u32 = 501;

    /// BIP44 account path for Solana, every level hardened as SLIP-0010 requires
    /// Format: m/44'/501'/account'/0'
    pub fn solana_account(account: u32) -> String {
        format!("m/44'/{}'/{}'/0'", SOLANA, account)
    }

    /// BIP44 - Multi-Account Hierarchy, hardened throughout
    /// Format: m/44'/coin_type'/account'/change'
    pub fn bip44(coin_type: u32, account: u32, change: u32) -> DerivationPath {
        let path = format!("m/44'/{}'/{}'/{}'", coin_type, account, change);
        DerivationPath::from_str(&path).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SLIP-0010 ed25519 test vector 1, seed 000102030405060708090a0b0c0d0e0f
    const TEST_SEED: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
        0x0e, 0x0f,
    ];

    #[test]
    fn master_key_matches_slip10_vector() {
        let master = ExtendedKey::from_seed(&TEST_SEED).unwrap();
        assert_eq!(
            hex::encode(master.key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
        assert_eq!(master.depth, 0);
    }

    #[test]
    fn child_chain_matches_slip10_vector() {
        let master = ExtendedKey::from_seed(&TEST_SEED).unwrap();

        let child = master.derive_child(0 | HARDENED_BIT).unwrap();
        assert_eq!(
            hex::encode(child.key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
        assert_eq!(child.depth, 1);
        assert_eq!(child.child_number, 0 | HARDENED_BIT);

        let grandchild = child.derive_child(1 | HARDENED_BIT).unwrap();
        assert_eq!(
            hex::encode(grandchild.key),
            "b1d0bad404bf35da785a64ca1ac54b2617211d2777696fbffaf208f746ae84f2"
        );
        assert_eq!(
            hex::encode(grandchild.chain_code),
            "a320425f77d1b5c2505a6b1b27382b37368ee640e3557c315416801243552f14"
        );
    }

    #[test]
    fn path_walk_matches_slip10_vector() {
        let path = DerivationPath::from_str("m/0'/1'/2'").unwrap();
        let leaf = path.derive_from_seed(&TEST_SEED).unwrap();
        assert_eq!(
            hex::encode(leaf),
            "92a5b23c0b8a99e37d07df3fb9966917f5d06e02ddbd909c7e184371463e9fc9"
        );
    }

    #[test]
    fn root_only_path_yields_master_key() {
        let master = ExtendedKey::from_seed(&TEST_SEED).unwrap();
        let path = DerivationPath::from_str("m").unwrap();
        assert_eq!(path.derive_from_seed(&TEST_SEED).unwrap(), master.key);
    }

    #[test]
    fn rejects_non_hardened_segment() {
        assert_eq!(
            DerivationPath::from_str("m/44'/501'/0'/0").unwrap_err(),
            DerivationError::NonHardenedChild
        );

        let master = ExtendedKey::from_seed(&TEST_SEED).unwrap();
        assert_eq!(
            master.derive_child(5).unwrap_err(),
            DerivationError::NonHardenedChild
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(
            DerivationPath::from_str("44'/501'").unwrap_err(),
            DerivationError::InvalidPath
        );
        assert_eq!(
            DerivationPath::from_str("n/44'").unwrap_err(),
            DerivationError::InvalidPath
        );
        assert_eq!(
            DerivationPath::from_str("m/abc'").unwrap_err(),
            DerivationError::InvalidChildNumber
        );
        // 2^31 already carries the hardened bit
        assert_eq!(
            DerivationPath::from_str("m/2147483648'").unwrap_err(),
            DerivationError::InvalidChildNumber
        );
    }

    #[test]
    fn accepts_h_as_hardened_marker() {
        let apostrophe = DerivationPath::from_str("m/44'/501'/0'/0'").unwrap();
        let suffix_h = DerivationPath::from_str("m/44h/501h/0h/0h").unwrap();
        assert_eq!(
            apostrophe.derive_from_seed(&TEST_SEED).unwrap(),
            suffix_h.derive_from_seed(&TEST_SEED).unwrap()
        );
    }

    #[test]
    fn solana_path_format() {
        assert_eq!(paths::solana_account(0), "m/44'/501'/0'/0'");
        assert_eq!(paths::solana_account(7), "m/44'/501'/7'/0'");
    }

    #[test]
    fn bip44_helper_matches_parsed_path() {
        let helper = paths::bip44(paths::SOLANA, 3, 0);
        let parsed = DerivationPath::from_str("m/44'/501'/3'/0'").unwrap();
        assert_eq!(
            helper.derive_from_seed(&TEST_SEED).unwrap(),
            parsed.derive_from_seed(&TEST_SEED).unwrap()
        );
    }
}
