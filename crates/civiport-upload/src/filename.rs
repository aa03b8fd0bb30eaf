//! Filename sanitization for display.
//!
//! The sanitized name is only ever shown to users; storage always uses a
//! generated name. Sanitization is idempotent: applying it to its own
//! output changes nothing.

use crate::error::UploadError;

/// Windows device names that must not appear as a filename stem.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Decode/strip passes stop after this many rounds regardless of progress.
const MAX_PASSES: usize = 8;

/// A sanitized display filename plus the transformations applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFilename {
    /// The cleaned name.
    pub name: String,
    /// One warning per transformation that changed the input.
    pub warnings: Vec<String>,
}

/// Sanitizes a client-supplied filename.
///
/// Percent-decoding and character stripping repeat until the name stops
/// changing, so nested URL-encoding cannot smuggle a character past a
/// single pass. Transformations are warnings, not rejections; only an
/// empty or extension-only result, or a reserved device name, rejects.
pub fn sanitize(original: &str, max_length: usize) -> Result<SanitizedFilename, UploadError> {
    let mut warnings = Vec::new();
    let mut name = original.trim().to_string();

    // Decode and strip to a fixed point.
    for _ in 0..MAX_PASSES {
        let decoded = percent_decode(&name);
        if decoded != name {
            push_once(&mut warnings, "percent-encoded sequences were decoded");
        }

        let stripped = strip_unsafe(&decoded);
        if stripped != decoded {
            push_once(&mut warnings, "unsafe characters were removed");
        }

        if stripped == name {
            break;
        }
        name = stripped;
    }

    let name = name.trim().to_string();

    // Nothing left, or only an extension left. Leading dots alone do not
    // count as a name.
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name.as_str(),
    };
    if !stem.chars().any(char::is_alphanumeric) {
        return Err(UploadError::InvalidFilename);
    }

    let leading = stem.split('.').find(|s| !s.trim().is_empty()).unwrap_or("");
    if RESERVED_NAMES.contains(&leading.trim().to_uppercase().as_str()) {
        return Err(UploadError::InvalidFilename);
    }

    let name = truncate_preserving_extension(&name, max_length, &mut warnings);

    Ok(SanitizedFilename { name, warnings })
}

/// Decodes `%XX` sequences for printable ASCII bytes. Non-ASCII targets
/// are left encoded so the result stays valid UTF-8.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            if let Ok(value) = u8::from_str_radix(&input[i + 1..i + 3], 16) {
                if value < 0x80 {
                    out.push(value as char);
                    i += 3;
                    continue;
                }
            }
        }
        // Safe: we only ever advance on char boundaries here.
        let ch = input[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

/// Removes path separators, control characters, Windows-illegal
/// characters, and Unicode direction-override characters.
fn strip_unsafe(input: &str) -> String {
    input
        .chars()
        .filter(|&c| {
            !matches!(c, '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0')
                && !c.is_control()
                && !is_bidi_override(c)
        })
        .collect()
}

/// Direction-control characters used for right-to-left extension spoofing
/// (`invoice\u{202E}gpj.exe` renders as `invoiceexe.jpg`).
fn is_bidi_override(c: char) -> bool {
    matches!(
        c,
        '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Truncates to `max_length` characters, keeping the final extension.
fn truncate_preserving_extension(name: &str, max_length: usize, warnings: &mut Vec<String>) -> String {
    if name.chars().count() <= max_length {
        return name.to_string();
    }
    push_once(warnings, "filename was truncated");

    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => {
            let keep = max_length.saturating_sub(ext.chars().count() + 1).max(1);
            let stem: String = stem.chars().take(keep).collect();
            format!("{stem}.{ext}")
        }
        _ => name.chars().take(max_length).collect(),
    }
}

fn push_once(warnings: &mut Vec<String>, message: &str) {
    if !warnings.iter().any(|w| w == message) {
        warnings.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_passes_unchanged() {
        let result = sanitize("report-2026.pdf", 120).unwrap();
        assert_eq!(result.name, "report-2026.pdf");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_path_separators_removed() {
        let result = sanitize("../../etc/passwd.png", 120).unwrap();
        assert!(!result.name.contains('/'));
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_nested_percent_encoding_decoded() {
        // %252e decodes to %2e, which decodes to a dot.
        let result = sanitize("a%252e%252e%252fb.jpg", 120).unwrap();
        assert!(!result.name.contains('/'));
        assert!(!result.name.contains('%'));
    }

    #[test]
    fn test_bidi_override_stripped() {
        let result = sanitize("invoice\u{202E}gpj.png", 120).unwrap();
        assert_eq!(result.name, "invoicegpj.png");
    }

    #[test]
    fn test_reserved_device_name_rejected() {
        assert_eq!(sanitize("CON.png", 120).unwrap_err(), UploadError::InvalidFilename);
        assert_eq!(sanitize("nul.jpg", 120).unwrap_err(), UploadError::InvalidFilename);
    }

    #[test]
    fn test_empty_and_extension_only_rejected() {
        assert_eq!(sanitize("", 120).unwrap_err(), UploadError::InvalidFilename);
        assert_eq!(sanitize(".jpg", 120).unwrap_err(), UploadError::InvalidFilename);
        assert_eq!(sanitize("///", 120).unwrap_err(), UploadError::InvalidFilename);
    }

    #[test]
    fn test_leading_dots_survive_when_a_name_remains() {
        // Stripping traversal separators leaves dots; the name still counts.
        let result = sanitize("../../shadow.png", 120).unwrap();
        assert_eq!(result.name, "....shadow.png");
    }

    #[test]
    fn test_truncation_preserves_extension() {
        let long = format!("{}.jpeg", "a".repeat(200));
        let result = sanitize(&long, 50).unwrap();
        assert_eq!(result.name.chars().count(), 50);
        assert!(result.name.ends_with(".jpeg"));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "../..%2fshadow.png",
            "a%252e%252e.jpg",
            "normal photo.jpg",
            "invoice\u{202E}gpj.png",
        ] {
            let once = sanitize(input, 120).unwrap();
            let twice = sanitize(&once.name, 120).unwrap();
            assert_eq!(twice.name, once.name);
            assert!(twice.warnings.is_empty());
        }
    }
}
