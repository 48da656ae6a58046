use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::error::Error;
use std::fmt;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce
};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;
use rand::{rngs::OsRng, RngCore};

use crate::wallet::WalletRecord;

// Fixed file names, mirroring the key-value slots the UI layer expects
const MNEMONIC_FILE: &str = "mnemonic.key";
const RECORDS_FILE: &str = "wallets.json.enc";

#[derive(Debug)]
pub enum StorageError {
    IoError(std::io::Error),
    EncryptionError,
    DecryptionError,
    PasswordError,
    InvalidFormat,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
            StorageError::EncryptionError => write!(f, "Failed to encrypt data"),
            StorageError::DecryptionError => write!(f, "Failed to decrypt data"),
            StorageError::PasswordError => write!(f, "Invalid password"),
            StorageError::InvalidFormat => write!(f, "Invalid keystore format"),
        }
    }
}

impl Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::IoError(err)
    }
}

pub struct SecureStorage {
    storage_dir: PathBuf,
}

impl SecureStorage {
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> Result<Self, StorageError> {
        let path = storage_dir.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;

        Ok(SecureStorage {
            storage_dir: path,
        })
    }

    pub fn store_mnemonic(&self, phrase: &str, password: &str) -> Result<(), StorageError> {
        self.write_encrypted(MNEMONIC_FILE, phrase.as_bytes(), password)
    }

    pub fn retrieve_mnemonic(&self, password: &str) -> Result<String, StorageError> {
        let plaintext = self.read_encrypted(MNEMONIC_FILE, password)?;
        String::from_utf8(plaintext).map_err(|_| StorageError::InvalidFormat)
    }

    pub fn store_records(
        &self,
        records: &[WalletRecord],
        password: &str,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_vec(records).map_err(|_| StorageError::InvalidFormat)?;
        self.write_encrypted(RECORDS_FILE, &json, password)
    }

    pub fn load_records(&self, password: &str) -> Result<Vec<WalletRecord>, StorageError> {
        let plaintext = self.read_encrypted(RECORDS_FILE, password)?;
        serde_json::from_slice(&plaintext).map_err(|_| StorageError::InvalidFormat)
    }

    pub fn has_mnemonic(&self) -> bool {
        self.storage_dir.join(MNEMONIC_FILE).exists()
    }

    pub fn has_records(&self) -> bool {
        self.storage_dir.join(RECORDS_FILE).exists()
    }

    // Removes the stored mnemonic and wallet list; irreversible
    pub fn clear_all(&self) -> Result<(), StorageError> {
        for name in [MNEMONIC_FILE, RECORDS_FILE] {
            let file_path = self.storage_dir.join(name);
            if file_path.exists() {
                fs::remove_file(file_path)?;
            }
        }
        Ok(())
    }

    fn write_encrypted(
        &self,
        name: &str,
        plaintext: &[u8],
        password: &str,
    ) -> Result<(), StorageError> {
        let mut salt = [0u8; 16];
        OsRng.fill_bytes(&mut salt);

        // Generate encryption key from password
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, 10_000, &mut key);

        // Generate nonce
        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        // Encrypt the payload
        let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| StorageError::EncryptionError)?;
        let ciphertext = cipher.encrypt(nonce, plaintext)
            .map_err(|_| StorageError::EncryptionError)?;

        // Format for storage: salt + nonce + ciphertext
        let mut data = Vec::with_capacity(salt.len() + nonce_bytes.len() + ciphertext.len());
        data.extend_from_slice(&salt);
        data.extend_from_slice(&nonce_bytes);
        data.extend_from_slice(&ciphertext);

        // Write to file
        let file_path = self.storage_dir.join(name);
        let mut file = File::create(file_path)?;
        file.write_all(&data)?;

        // Clean up sensitive data
        key.zeroize();

        Ok(())
    }

    fn read_encrypted(&self, name: &str, password: &str) -> Result<Vec<u8>, StorageError> {
        let file_path = self.storage_dir.join(name);
        let mut file = File::open(file_path)?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        if data.len() < 28 { // 16 (salt) + 12 (nonce) + min ciphertext
            return Err(StorageError::InvalidFormat);
        }

        // Extract salt, nonce, and ciphertext
        let salt = &data[0..16];
        let nonce_bytes = &data[16..28];
        let ciphertext = &data[28..];

        // Generate decryption key from password
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, 10_000, &mut key);

        // Decrypt the payload
        let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| StorageError::DecryptionError)?;
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher.decrypt(nonce, ciphertext)
            .map_err(|_| StorageError::PasswordError)?;

        // Clean up sensitive data
        key.zeroize();

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn temp_storage(test_name: &str) -> SecureStorage {
        let dir = std::env::temp_dir().join(format!(
            "sol-vault-{}-{}",
            test_name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        SecureStorage::new(dir).unwrap()
    }

    #[test]
    fn mnemonic_round_trip() {
        let storage = temp_storage("mnemonic");
        storage.store_mnemonic(TEST_MNEMONIC, "hunter2").unwrap();

        assert!(storage.has_mnemonic());
        assert_eq!(storage.retrieve_mnemonic("hunter2").unwrap(), TEST_MNEMONIC);

        storage.clear_all().unwrap();
    }

    #[test]
    fn wrong_password_is_rejected() {
        let storage = temp_storage("password");
        storage.store_mnemonic(TEST_MNEMONIC, "correct").unwrap();

        match storage.retrieve_mnemonic("wrong") {
            Err(StorageError::PasswordError) => {}
            other => panic!("expected PasswordError, got {:?}", other.map(|_| ())),
        }

        storage.clear_all().unwrap();
    }

    #[test]
    fn records_round_trip() {
        let storage = temp_storage("records");
        let records = vec![WalletRecord {
            mnemonic: TEST_MNEMONIC.to_string(),
            path: "m/44'/501'/0'/0'".to_string(),
            public_key: "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk".to_string(),
            private_key: "secret".to_string(),
        }];

        storage.store_records(&records, "hunter2").unwrap();
        assert!(storage.has_records());
        assert_eq!(storage.load_records("hunter2").unwrap(), records);

        storage.clear_all().unwrap();
    }

    #[test]
    fn clear_all_removes_everything() {
        let storage = temp_storage("clear");
        storage.store_mnemonic(TEST_MNEMONIC, "pw").unwrap();
        storage.store_records(&[], "pw").unwrap();

        storage.clear_all().unwrap();
        assert!(!storage.has_mnemonic());
        assert!(!storage.has_records());

        // Clearing an already-empty store is a no-op
        storage.clear_all().unwrap();
    }
}
