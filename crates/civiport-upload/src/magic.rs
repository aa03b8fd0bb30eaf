//! Magic-byte verification against the declared content type.

/// A known binary signature: the declared type it confirms, the byte
/// offset it starts at, and the bytes themselves.
struct Signature {
    mime: &'static str,
    offset: usize,
    bytes: &'static [u8],
}

/// Leading-byte signatures for the accepted formats. WebP needs two
/// entries because the format tag sits after the RIFF chunk size.
const SIGNATURES: &[Signature] = &[
    Signature {
        mime: "image/png",
        offset: 0,
        bytes: &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
    },
    Signature {
        mime: "image/jpeg",
        offset: 0,
        bytes: &[0xFF, 0xD8, 0xFF],
    },
    Signature {
        mime: "image/gif",
        offset: 0,
        bytes: b"GIF87a",
    },
    Signature {
        mime: "image/gif",
        offset: 0,
        bytes: b"GIF89a",
    },
    Signature {
        mime: "image/webp",
        offset: 0,
        bytes: b"RIFF",
    },
    Signature {
        mime: "image/webp",
        offset: 8,
        bytes: b"WEBP",
    },
    Signature {
        mime: "application/pdf",
        offset: 0,
        bytes: b"%PDF-",
    },
];

/// Checks whether the data's leading bytes confirm the declared type.
///
/// A declared type with no signature entry cannot be confirmed and is
/// treated as a mismatch; the accepted-type list lives in the extension
/// allow-list, and the two are kept in step.
pub fn matches_declared_type(data: &[u8], declared_type: &str) -> bool {
    let declared = declared_type.trim();
    let mut found_any = false;
    let mut gif_or_webp_alternative = false;

    for sig in SIGNATURES.iter().filter(|s| s.mime.eq_ignore_ascii_case(declared)) {
        found_any = true;
        let end = sig.offset + sig.bytes.len();
        let hit = data.len() >= end && &data[sig.offset..end] == sig.bytes;

        match declared {
            // GIF variants: either signature is enough.
            t if t.eq_ignore_ascii_case("image/gif") => {
                if hit {
                    return true;
                }
            }
            // WebP: both the RIFF header and the WEBP tag must be present.
            t if t.eq_ignore_ascii_case("image/webp") => {
                if !hit {
                    return false;
                }
                gif_or_webp_alternative = true;
            }
            _ => return hit,
        }
    }

    if !found_any {
        return false;
    }
    gif_or_webp_alternative
}

/// The confirmed content type for the data, when the leading bytes match
/// any known signature.
pub fn detect(data: &[u8]) -> Option<&'static str> {
    for mime in ["image/png", "image/jpeg", "image/gif", "image/webp", "application/pdf"] {
        if matches_declared_type(data, mime) {
            return Some(mime);
        }
    }
    None
}
