//! Token identifiers and the allow-list

use heapless::Vec;

/// Longest ISO 14443-A UID (triple size)
pub const MAX_TOKEN_LEN: usize = 10;

/// Maximum number of authorized tokens
pub const MAX_TOKENS: usize = 8;

/// Errors when building a token identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TokenIdError {
    /// Not a single (4), double (7) or triple (10) size UID
    InvalidLength,
    /// Non-hex character or odd digit count
    InvalidHex,
}

/// Fixed-length token identifier (NFC UID)
///
/// Equality is exact: same length and same bytes. A 4-byte UID never
/// matches the prefix of a 7-byte one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TokenId {
    bytes: Vec<u8, MAX_TOKEN_LEN>,
}

impl TokenId {
    /// Build from raw UID bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenIdError> {
        if !matches!(bytes.len(), 4 | 7 | 10) {
            return Err(TokenIdError::InvalidLength);
        }
        let bytes = Vec::from_slice(bytes).map_err(|_| TokenIdError::InvalidLength)?;
        Ok(Self { bytes })
    }

    /// Parse a hex string such as `04:A3:1B:22` or `04a31b22`
    ///
    /// `:`, `-` and spaces between bytes are ignored.
    pub fn parse_hex(s: &str) -> Result<Self, TokenIdError> {
        let mut bytes: Vec<u8, MAX_TOKEN_LEN> = Vec::new();
        let mut high: Option<u8> = None;

        for c in s.trim().chars() {
            if matches!(c, ':' | '-' | ' ') {
                if high.is_some() {
                    return Err(TokenIdError::InvalidHex);
                }
                continue;
            }
            let nibble = c.to_digit(16).ok_or(TokenIdError::InvalidHex)? as u8;
            match high.take() {
                None => high = Some(nibble),
                Some(h) => bytes
                    .push((h << 4) | nibble)
                    .map_err(|_| TokenIdError::InvalidLength)?,
            }
        }

        if high.is_some() {
            return Err(TokenIdError::InvalidHex);
        }
        Self::from_bytes(&bytes)
    }

    /// UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

}

/// Set of authorized tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AllowList {
    tokens: Vec<TokenId, MAX_TOKENS>,
}

impl AllowList {
    /// Empty allow-list (authorizes nothing)
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Add a token; returns it back if the list is full
    pub fn push(&mut self, token: TokenId) -> Result<(), TokenId> {
        if self.contains(&token) {
            return Ok(());
        }
        self.tokens.push(token)
    }

    /// Check if the token is authorized
    pub fn contains(&self, token: &TokenId) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Number of authorized tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if nothing is authorized
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
