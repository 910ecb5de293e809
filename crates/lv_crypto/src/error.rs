use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("AES key must be exactly 32 bytes, got {0}")]
    KeyLength(usize),

    #[error("AES IV must be exactly 16 bytes, got {0}")]
    IvLength(usize),

    #[error("Missing secret: {0} is not set")]
    MissingSecret(&'static str),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Block decryption failed (corrupt ciphertext or wrong key)")]
    Decrypt,

    #[error("Decrypted bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
