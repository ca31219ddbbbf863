//! DNS wire format: each label is prefixed by its length byte and the name
//! ends with a zero-length label.

use crate::errors::DnsError;

/// Largest label a single length byte may announce.
pub const MAX_LABEL_LEN: usize = 63;

/// Encode a dotted name into DNS wire format.
///
/// Empty labels (leading, trailing or repeated dots) are skipped.
///
/// # Errors
/// * `DnsError::LabelTooLong` - a label exceeds 63 bytes
pub fn encode(name: &str) -> Result<Vec<u8>, DnsError> {
    let mut out = Vec::with_capacity(name.len() + 2);

    for label in name.split('.').filter(|l| !l.is_empty()) {
        let len = label.len();
        if len > MAX_LABEL_LEN {
            return Err(DnsError::LabelTooLong {
                label: label.to_string(),
                len,
            });
        }
        // len <= 63 fits a single byte
        out.push(len as u8);
        out.extend_from_slice(label.as_bytes());
    }

    out.push(0);
    Ok(out)
}

/// Decode DNS wire format back into a dotted name.
///
/// The root name (a single zero byte) decodes to the empty string.
pub fn decode(wire: &[u8]) -> Result<String, DnsError> {
    let mut labels: Vec<&str> = Vec::new();
    let mut offset = 0;

    loop {
        let len = *wire.get(offset).ok_or(DnsError::Truncated { offset })?;
        if len == 0 {
            offset += 1;
            break;
        }
        if usize::from(len) > MAX_LABEL_LEN {
            return Err(DnsError::InvalidLabelLength { len, offset });
        }

        let start = offset + 1;
        let end = start + usize::from(len);
        let raw = wire
            .get(start..end)
            .ok_or(DnsError::Truncated { offset: wire.len() })?;
        let label = std::str::from_utf8(raw).map_err(|_| DnsError::InvalidUtf8 { offset: start })?;

        labels.push(label);
        offset = end;
    }

    if offset < wire.len() {
        return Err(DnsError::TrailingBytes {
            count: wire.len() - offset,
        });
    }

    Ok(labels.join("."))
}
