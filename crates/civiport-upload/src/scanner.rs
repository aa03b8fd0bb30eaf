//! Content threat scan over the leading bytes of an upload.

use std::sync::LazyLock;

use regex::Regex;

/// Only this many leading bytes are scanned. Threat markers in image and
/// PDF polyglots sit at the front; scanning whole files would make upload
/// cost proportional to size for no additional coverage.
const SCAN_WINDOW: usize = 10 * 1024;

/// Minimum run of printable text after a null byte before the file is
/// flagged as a possible polyglot.
const POLYGLOT_TEXT_RUN: usize = 16;

/// A named threat pattern.
struct ThreatPattern {
    /// Short name reported in warnings and rejections.
    name: &'static str,
    /// The compiled pattern.
    regex: Regex,
}

impl ThreatPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            // Patterns are fixed strings in this file; a failure to
            // compile is a programming error caught by the tests.
            regex: Regex::new(pattern).expect("invalid threat pattern"),
        }
    }
}

/// Patterns that indicate embedded executable or injected content.
static THREAT_PATTERNS: LazyLock<Vec<ThreatPattern>> = LazyLock::new(|| {
    vec![
        ThreatPattern::new("script_tag", r"(?i)<\s*script[\s>]"),
        ThreatPattern::new("php_open_tag", r"<\?php|<\?="),
        ThreatPattern::new(
            "event_handler",
            r"(?i)\bon(load|error|click|mouseover|focus|submit)\s*=",
        ),
        ThreatPattern::new(
            "eval_call",
            r"(?i)\b(eval|exec|system|passthru|shell_exec|base64_decode)\s*\(",
        ),
        ThreatPattern::new("template_injection", r"\{\{[^}]*\}\}|\$\{[^}]*\}|<%[^%]*%>"),
        ThreatPattern::new("entity_injection", r"(?i)<!(ENTITY|DOCTYPE[^>]*\[)"),
        // ImageTragick-style MVG/MSL payloads inside image files.
        ThreatPattern::new(
            "image_exploit",
            r"(?i)push\s+graphic-context|<\s*msl\s*>|\bfill\s+'?url\(",
        ),
    ]
});

/// Scans the leading window of the data and returns the names of every
/// matched threat pattern. Also flags a null byte followed by a run of
/// readable text, the shape of binary/script polyglot files.
pub fn scan(data: &[u8]) -> Vec<&'static str> {
    let window = &data[..data.len().min(SCAN_WINDOW)];
    let text = String::from_utf8_lossy(window);

    let mut findings: Vec<&'static str> = THREAT_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(&text))
        .map(|p| p.name)
        .collect();

    if has_text_after_null(window) {
        findings.push("possible_polyglot");
    }

    findings
}

/// True when a null byte is followed by `POLYGLOT_TEXT_RUN` consecutive
/// printable ASCII bytes somewhere in the window.
fn has_text_after_null(window: &[u8]) -> bool {
    let Some(null_pos) = window.iter().position(|&b| b == 0) else {
        return false;
    };

    let mut run = 0usize;
    for &b in &window[null_pos + 1..] {
        if b.is_ascii_graphic() || b == b' ' {
            run += 1;
            if run >= POLYGLOT_TEXT_RUN {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
