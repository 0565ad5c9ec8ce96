/// Prefix carried by keys that were scanned from a QR code.
pub const QRX_PREFIX: &str = "qrx:";

/// Turn a raw path segment into the lookup key.
///
/// Trims, percent-decodes and strips one leading `qrx:`. A segment that does
/// not decode cleanly is used as-is (after trimming); an unusable key simply
/// matches nothing downstream.
pub fn normalize_qrx_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let decoded = percent_decode(trimmed).unwrap_or_else(|| trimmed.to_string());
    match decoded.strip_prefix(QRX_PREFIX) {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Strict percent-decoding: every `%` must start a two-digit hex escape and
/// the decoded bytes must be UTF-8.
fn percent_decode(value: &str) -> Option<String> {
    if has_malformed_escape(value) {
        return None;
    }
    urlencoding::decode(value).ok().map(|v| v.into_owned())
}

fn has_malformed_escape(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return true;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    false
}
