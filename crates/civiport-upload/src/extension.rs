//! Extension checks: a blocklist applied to every dot-separated segment
//! and an allow-list tied to the declared content type.

use crate::error::UploadError;

/// Extensions that are never acceptable anywhere in a filename. Checking
/// every segment defeats double-extension tricks like `shell.php.jpg`.
const BLOCKED_SEGMENTS: &[&str] = &[
    // Server-side scripts
    "php", "php3", "php4", "php5", "php7", "phtml", "phar", "asp", "aspx", "jsp", "jspx", "cgi",
    "pl", "py", "rb",
    // Executables and installers
    "exe", "dll", "so", "bin", "com", "msi", "scr", "app", "deb", "rpm", "jar",
    // Shell and batch
    "sh", "bash", "zsh", "bat", "cmd", "ps1", "psm1",
    // Client-side script
    "js", "mjs", "vbs", "vbe", "wsf", "hta",
    // Config and system
    "htaccess", "htpasswd", "ini", "cfg", "conf", "sys", "reg",
    // Archives (nested content cannot be validated)
    "zip", "rar", "7z", "tar", "gz", "bz2", "xz", "iso",
];

/// Final extensions accepted per declared content type.
const ALLOWED_EXTENSIONS: &[(&str, &[&str])] = &[
    ("image/png", &["png"]),
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
    ("application/pdf", &["pdf"]),
];

/// Validates every dot-separated segment of the filename against the
/// blocklist, then the final segment against the allow-list for the
/// declared content type.
pub fn check(filename: &str, declared_type: &str) -> Result<(), UploadError> {
    // The stem (everything before the first dot) is deliberately exempt:
    // it is a name, not an extension, and no server dispatches on it. A
    // file called `php.jpg` is fine; `shell.php.jpg` is not.
    let segments: Vec<&str> = filename
        .split('.')
        .skip(1)
        .filter(|s| !s.is_empty())
        .collect();

    for segment in &segments {
        let lowered = segment.to_lowercase();
        if BLOCKED_SEGMENTS.contains(&lowered.as_str()) {
            return Err(UploadError::InvalidExtension { segment: lowered });
        }
    }

    let Some(last) = segments.last() else {
        // No extension at all: nothing to match against the declared type.
        return Err(UploadError::InvalidExtension {
            segment: String::new(),
        });
    };
    let last = last.to_lowercase();

    let allowed = ALLOWED_EXTENSIONS
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(declared_type.trim()))
        .map(|(_, exts)| *exts)
        .unwrap_or(&[]);

    if allowed.contains(&last.as_str()) {
        Ok(())
    } else {
        Err(UploadError::InvalidExtension { segment: last })
    }
}

/// The final extension of a filename, lower-cased, if any.
pub fn final_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_extension_blocked() {
        // The php segment is refused even though .jpg trails it.
        let err = check("shell.php.jpg", "image/jpeg").unwrap_err();
        assert_eq!(
            err,
            UploadError::InvalidExtension {
                segment: "php".to_string()
            }
        );
    }

    #[test]
    fn test_stem_is_exempt_from_the_blocklist() {
        assert!(check("php.jpg", "image/jpeg").is_ok());
        assert!(check("exe.png", "image/png").is_ok());
    }

    #[test]
    fn test_case_insensitive_blocklist() {
        assert!(check("evil.PHP.jpg", "image/jpeg").is_err());
        assert!(check("run.ExE", "image/png").is_err());
    }

    #[test]
    fn test_allowed_type_passes() {
        assert!(check("photo.jpg", "image/jpeg").is_ok());
        assert!(check("photo.jpeg", "image/jpeg").is_ok());
        assert!(check("scan.pdf", "application/pdf").is_ok());
    }

    #[test]
    fn test_extension_must_match_declared_type() {
        assert!(check("photo.png", "image/jpeg").is_err());
        assert!(check("doc.pdf", "image/png").is_err());
    }

    #[test]
    fn test_unknown_declared_type_has_no_allowed_extensions() {
        assert!(check("file.txt", "text/plain").is_err());
    }

    #[test]
    fn test_no_extension_is_rejected() {
        assert!(check("README", "image/png").is_err());
    }

    #[test]
    fn test_final_extension() {
        assert_eq!(final_extension("a.b.PNG"), Some("png".to_string()));
        assert_eq!(final_extension("noext"), None);
        assert_eq!(final_extension("trailing."), None);
    }
}
