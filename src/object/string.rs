//! PDF String object.

/// A PDF string object, which can be either literal or hexadecimal.
///
/// Literal strings are enclosed in parentheses: (Hello)
/// Hexadecimal strings are enclosed in angle brackets: <48656C6C6F>
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfString {
    /// A literal string enclosed in parentheses.
    Literal(Vec<u8>),
    /// A hexadecimal string enclosed in angle brackets.
    Hex(Vec<u8>),
}

impl PdfString {
    /// Creates a new literal string from text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into().into_bytes())
    }

    /// Creates a new literal string from bytes.
    pub fn literal_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Literal(bytes.into())
    }

    /// Creates a new hexadecimal string from bytes.
    pub fn hex(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Hex(bytes.into())
    }

    /// Creates a hexadecimal string from text.
    pub fn hex_from_text(text: impl Into<String>) -> Self {
        Self::Hex(text.into().into_bytes())
    }

    /// Returns the raw bytes of the string.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Literal(bytes) | Self::Hex(bytes) => bytes,
        }
    }

    /// Serializes the string to PDF format.
    pub fn to_pdf_string(&self) -> String {
        match self {
            Self::Literal(bytes) => Self::escape_literal(bytes),
            Self::Hex(bytes) => Self::encode_hex(bytes),
        }
    }

    /// Escapes a literal string for PDF output.
    fn escape_literal(bytes: &[u8]) -> String {
        let mut result = String::with_capacity(bytes.len() + 10);
        result.push('(');

        for &byte in bytes {
            match byte {
                b'\\' => result.push_str("\\\\"),
                b'(' => result.push_str("\\("),
                b')' => result.push_str("\\)"),
                b'\n' => result.push_str("\\n"),
                b'\r' => result.push_str("\\r"),
                b'\t' => result.push_str("\\t"),
                b'\x08' => result.push_str("\\b"),
                b'\x0C' => result.push_str("\\f"),
                0..=31 | 127..=255 => {
                    // Use octal escape for non-printable characters
                    result.push_str(&format!("\\{:03o}", byte));
                }
                _ => result.push(byte as char),
            }
        }

        result.push(')');
        result
    }

    /// Encodes bytes as a hexadecimal string.
    fn encode_hex(bytes: &[u8]) -> String {
        let mut result = String::with_capacity(bytes.len() * 2 + 2);
        result.push('<');

        for byte in bytes {
            result.push_str(&format!("{:02X}", byte));
        }

        result.push('>');
        result
    }

    /// Attempts to convert the string to a UTF-8 string.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    /// Creates a text string for human-facing dictionary entries (titles, authors, ...).
    ///
    /// Strings entirely within the PDFDocEncoding-compatible subset (here approximated,
    /// as the corpus does, by the Latin-1 range `U+0000..=U+00FF`) are emitted as literal
    /// byte strings. Strings containing characters outside that range are emitted as
    /// UTF-16BE with the `FE FF` byte-order mark prepended, still as a literal string.
    pub fn text(s: impl AsRef<str>) -> Self {
        let s = s.as_ref();
        if s.chars().all(|c| (c as u32) <= 0xFF) {
            return Self::Literal(s.chars().map(|c| c as u8).collect());
        }

        let mut bytes = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Self::Literal(bytes)
    }
}

impl From<&str> for PdfString {
    fn from(s: &str) -> Self {
        Self::literal(s)
    }
}

impl From<String> for PdfString {
    fn from(s: String) -> Self {
        Self::literal(s)
    }
}
