use std::fmt;
use std::error::Error;

/// Encoding used for exported private keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKeyFormat {
    Base58,
    Base64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum EncodingError {
    InvalidEncoding,
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodingError::InvalidEncoding => {
                write!(f, "Input is not valid for the requested encoding")
            }
            EncodingError::InvalidLength { expected, actual } => {
                write!(f, "Decoded {} bytes, expected {}", actual, expected)
            }
        }
    }
}

impl Error for EncodingError {}

/// Raw Base58 with the Bitcoin alphabet, no checksum and no version byte,
/// which is the standard Solana address format.
pub fn encode_public_key(key: &[u8; 32]) -> String {
    bs58::encode(key).into_string()
}

pub fn decode_public_key(encoded: &str) -> Result<[u8; 32], EncodingError> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| EncodingError::InvalidEncoding)?;
    to_array(bytes)
}

pub fn encode_private_key(secret_key: &[u8; 64], format: PrivateKeyFormat) -> String {
    match format {
        PrivateKeyFormat::Base58 => bs58::encode(secret_key).into_string(),
        PrivateKeyFormat::Base64 => base64::encode(secret_key),
    }
}

pub fn decode_private_key(
    encoded: &str,
    format: PrivateKeyFormat,
) -> Result<[u8; 64], EncodingError> {
    let bytes = match format {
        PrivateKeyFormat::Base58 => bs58::decode(encoded)
            .into_vec()
            .map_err(|_| EncodingError::InvalidEncoding)?,
        PrivateKeyFormat::Base64 => {
            base64::decode(encoded).map_err(|_| EncodingError::InvalidEncoding)?
        }
    };
    to_array(bytes)
}

fn to_array<const N: usize>(bytes: Vec<u8>) -> Result<[u8; N], EncodingError> {
    if bytes.len() != N {
        return Err(EncodingError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}
