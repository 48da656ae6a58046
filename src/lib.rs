pub mod mnemonic;
pub mod derivation;
pub mod keys;
pub mod encoding;
pub mod wallet;
pub mod storage;

pub use mnemonic::{
    MnemonicStrength,
    MnemonicError,
    SecureMnemonic,
    generate_entropy,
};
pub use derivation::{paths, DerivationError, DerivationPath, ExtendedKey};
pub use keys::{KeyPairError, Keypair};
pub use encoding::{
    decode_private_key, decode_public_key, encode_private_key, encode_public_key,
    EncodingError, PrivateKeyFormat,
};
pub use wallet::{derive_account, derive_batch, WalletError, WalletIter, WalletRecord};
pub use storage::{SecureStorage, StorageError};

/// Generates a fresh 12-word mnemonic phrase.
pub fn generate_mnemonic() -> Result<String, MnemonicError> {
    Ok(SecureMnemonic::generate(MnemonicStrength::Words12)?.phrase())
}

/// Validates a phrase and derives `count` wallets at m/44'/501'/0'/0'
/// onward, with Base58-encoded private keys.
pub fn derive_wallets(mnemonic: &str, count: u32) -> Result<Vec<WalletRecord>, WalletError> {
    let mnemonic = SecureMnemonic::from_phrase(mnemonic)?;
    derive_batch(&mnemonic, count, 0, PrivateKeyFormat::Base58).collect()
}
