use crate::derivation::{paths, DerivationError, DerivationPath};
use crate::encoding::{encode_private_key, encode_public_key, PrivateKeyFormat};
use crate::keys::{KeyPairError, Keypair};
use crate::mnemonic::{MnemonicError, SecureMnemonic};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::error::Error;
use zeroize::Zeroize;

#[derive(Debug)]
pub enum WalletError {
    MnemonicError(MnemonicError),
    DerivationError(DerivationError),
    KeyPairError(KeyPairError),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalletError::MnemonicError(e) => write!(f, "Mnemonic error: {}", e),
            WalletError::DerivationError(e) => write!(f, "Derivation error: {}", e),
            WalletError::KeyPairError(e) => write!(f, "Key pair error: {}", e),
        }
    }
}

impl Error for WalletError {}

impl From<MnemonicError> for WalletError {
    fn from(err: MnemonicError) -> Self {
        WalletError::MnemonicError(err)
    }
}

impl From<DerivationError> for WalletError {
    fn from(err: DerivationError) -> Self {
        WalletError::DerivationError(err)
    }
}

impl From<KeyPairError> for WalletError {
    fn from(err: KeyPairError) -> Self {
        WalletError::KeyPairError(err)
    }
}

/// A derived wallet as handed to the caller: the phrase it came from,
/// the path it sits at, and the encoded key pair. The caller owns the
/// record and decides retention and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    pub mnemonic: String,
    pub path: String,
    pub public_key: String,
    pub private_key: String,
}

/// Derives the wallet at m/44'/501'/<account>'/0'
pub fn derive_account(
    mnemonic: &SecureMnemonic,
    account: u32,
    format: PrivateKeyFormat,
) -> Result<WalletRecord, WalletError> {
    let mut seed = mnemonic.to_seed("");
    let record = derive_from_seed(&seed, &mnemonic.phrase(), account, format);
    seed.zeroize();
    record
}

fn derive_from_seed(
    seed: &[u8; 64],
    phrase: &str,
    account: u32,
    format: PrivateKeyFormat,
) -> Result<WalletRecord, WalletError> {
    let path = paths::solana_account(account);
    let derivation_path = DerivationPath::from_str(&path)?;
    let keypair = Keypair::from_path(seed, &derivation_path)?;

    Ok(WalletRecord {
        mnemonic: phrase.to_string(),
        path,
        public_key: encode_public_key(&keypair.public_key),
        private_key: encode_private_key(&keypair.secret_key, format),
    })
}

/// Lazy iterator over consecutive account indices. The 64-byte seed is
/// stretched once and shared read-only across the batch; every element
/// is still a pure function of (seed, index), so a batch can be
/// restarted from any start index.
pub struct WalletIter {
    seed: [u8; 64],
    phrase: String,
    format: PrivateKeyFormat,
    next_account: u32,
    remaining: u32,
}

impl Iterator for WalletIter {
    type Item = Result<WalletRecord, WalletError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let record = derive_from_seed(&self.seed, &self.phrase, self.next_account, self.format);
        self.next_account += 1;
        self.remaining -= 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl Drop for WalletIter {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

pub fn derive_batch(
    mnemonic: &SecureMnemonic,
    count: u32,
    start_index: u32,
    format: PrivateKeyFormat,
) -> WalletIter {
    WalletIter {
        seed: mnemonic.to_seed(""),
        phrase: mnemonic.phrase(),
        format,
        next_account: start_index,
        remaining: count,
    }
}
