use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use std::error::Error as StdError;

pub enum MnemonicStrength {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl MnemonicStrength {
    fn to_entropy_bits(&self) -> usize {
        match self {
            MnemonicStrength::Words12 => 128,
            MnemonicStrength::Words15 => 160,
            MnemonicStrength::Words18 => 192,
            MnemonicStrength::Words21 => 224,
            MnemonicStrength::Words24 => 256,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MnemonicError {
    InvalidWord(String),
    InvalidWordCount(usize),
    ChecksumMismatch,
    EntropyGenerationFailed,
}

impl fmt::Display for MnemonicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MnemonicError::InvalidWord(word) => write!(f, "Word not in the BIP-39 list: {}", word),
            MnemonicError::InvalidWordCount(count) => write!(f, "Invalid word count: {}", count),
            MnemonicError::ChecksumMismatch => write!(f, "Mnemonic checksum does not match"),
            MnemonicError::EntropyGenerationFailed => write!(f, "Failed to generate entropy"),
        }
    }
}

impl StdError for MnemonicError {}

#[derive(Debug)]
pub struct SecureMnemonic {
    mnemonic: Mnemonic,
}

impl SecureMnemonic {
    pub fn generate(strength: MnemonicStrength) -> Result<Self, MnemonicError> {
        let entropy_bits = strength.to_entropy_bits();
        let entropy_bytes = entropy_bits / 8;

        let entropy = generate_entropy(entropy_bytes)?;

        match Mnemonic::from_entropy(&entropy) {
            Ok(mnemonic) => Ok(Self { mnemonic }),
            Err(_) => Err(MnemonicError::EntropyGenerationFailed),
        }
    }

    /// Validates a candidate phrase word by word so the caller can report
    /// the first offending word, then the word count, then the checksum.
    pub fn from_phrase(phrase: &str) -> Result<Self, MnemonicError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();

        let language = Language::English;
        for word in &words {
            let listed = language.words_by_prefix(word).iter().any(|entry| entry == word);
            if !listed {
                return Err(MnemonicError::InvalidWord((*word).to_string()));
            }
        }

        if !matches!(words.len(), 12 | 15 | 18 | 21 | 24) {
            return Err(MnemonicError::InvalidWordCount(words.len()));
        }

        // Words and count are valid, so the only thing left to fail is the checksum
        match Mnemonic::parse_normalized(&words.join(" ")) {
            Ok(mnemonic) => Ok(Self { mnemonic }),
            Err(_) => Err(MnemonicError::ChecksumMismatch),
        }
    }

    pub fn phrase(&self) -> String {
        let mut result = String::new();
        for (i, word) in self.mnemonic.word_iter().enumerate() {
            if i > 0 {
                result.push(' ');
            }
            result.push_str(word);
        }
        result
    }

    pub fn word_count(&self) -> usize {
        self.mnemonic.word_iter().count()
    }

    pub fn to_seed(&self, passphrase: &str) -> [u8; 64] {
        let seed_bytes = self.mnemonic.to_seed(passphrase);
        let mut seed = [0u8; 64];
        seed.copy_from_slice(&seed_bytes[..64]);
        seed
    }
}

pub fn generate_entropy(byte_length: usize) -> Result<Vec<u8>, MnemonicError> {
    let mut bytes = vec![0u8; byte_length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| MnemonicError::EntropyGenerationFailed)?;
    Ok(bytes)
}
