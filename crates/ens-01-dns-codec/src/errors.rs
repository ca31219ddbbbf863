use thiserror::Error;

/// Errors raised by the DNS wire-format codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DnsError {
    /// A label is longer than the 63 bytes a length prefix may announce.
    #[error("label too long: {label:?} is {len} bytes, max 63")]
    LabelTooLong { label: String, len: usize },

    /// Wire data ended before a label or the terminating zero byte.
    #[error("truncated wire name at offset {offset}")]
    Truncated { offset: usize },

    /// Bytes follow the terminating zero byte.
    #[error("{count} trailing bytes after terminating label")]
    TrailingBytes { count: usize },

    /// A length prefix announces more than 63 bytes (compression pointers are not supported).
    #[error("invalid label length {len} at offset {offset}")]
    InvalidLabelLength { len: u8, offset: usize },

    /// A label is not valid UTF-8.
    #[error("label at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },
}
