use std::fmt;
use std::hash::{Hash, Hasher};

/// A metadata token identifying a method definition within its module (`mdMethodDef`).
///
/// Tokens consist of a 32-bit value where:
/// - The high byte (bits 24-31) indicates the metadata table
/// - The low 24 bits (bits 0-23) indicate the row index within that table
///
/// Method enumerators carry `MethodDef` tokens (table `0x06`), but any token value is
/// stored unchanged.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Table index of the `MethodDef` table
    pub const METHOD_DEF_TABLE: u8 = 0x06;

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a `MethodDef` token for the given row
    #[must_use]
    pub const fn method_def(row: u32) -> Self {
        Token(((Self::METHOD_DEF_TABLE as u32) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table type from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if this token refers to the `MethodDef` table
    #[must_use]
    pub fn is_method_def(&self) -> bool {
        self.table() == Self::METHOD_DEF_TABLE
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
