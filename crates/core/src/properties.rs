//! Java-properties file decoding and `local.properties` loading
//!
//! Android projects keep machine-local secrets (SDK paths, API keys) in a
//! `local.properties` file that is never committed. This module decodes the
//! conventional properties format and exposes the loaded entries as an
//! immutable [`PropertySet`].
//!
//! The decoder follows `java.util.Properties.load` semantics:
//! comment lines (`#`/`!`), backslash line continuations, `=`/`:`/whitespace
//! key terminators, and `\t`/`\n`/`\r`/`\f`/`\\`/`\uXXXX` escapes. A malformed
//! `\u` sequence is a parse error; everything else decodes.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// An immutable set of key-value pairs loaded from a properties file
///
/// Duplicate keys in the source resolve last-one-wins, matching the
/// underlying file format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: HashMap<String, String>,
}

impl PropertySet {
    /// Create an empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode properties-format text into a set
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = HashMap::new();

        let mut logical = String::new();
        let mut logical_start = 0usize;
        let mut continuing = false;

        for (idx, natural) in input.lines().enumerate() {
            let line_no = idx + 1;

            if !continuing {
                let trimmed = natural.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                logical.clear();
                logical_start = line_no;
                logical.push_str(trimmed);
            } else {
                // Continuation lines contribute data even if they start with '#'
                logical.push_str(natural.trim_start());
            }

            if ends_with_continuation(&logical) {
                logical.pop();
                continuing = true;
                continue;
            }
            continuing = false;

            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key, logical_start)?;
            let value = unescape(raw_value, logical_start)?;
            entries.insert(key, value);
        }

        // Input ending mid-continuation: the assembled prefix is still an entry
        if continuing && !logical.is_empty() {
            let (raw_key, raw_value) = split_key_value(&logical);
            let key = unescape(raw_key, logical_start)?;
            let value = unescape(raw_value, logical_start)?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the set contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted for deterministic reporting
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Loader for the project's optional `local.properties` file
pub struct LocalProperties;

impl LocalProperties {
    /// Load a properties file, treating a missing file as an empty set
    ///
    /// Builds must keep working on machines without secrets configured, so
    /// file-not-found is not an error here. Syntax errors in an existing
    /// file do propagate.
    pub fn load(path: &Path) -> Result<PropertySet> {
        if !path.exists() {
            return Ok(PropertySet::empty());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_context(format!("While reading {}", path.display()))
        })?;

        PropertySet::parse(&content)
            .map_err(|e| e.with_context(format!("While decoding {}", path.display())))
    }
}

/// A logical line continues when it ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still-escaped) key and value parts
///
/// The key ends at the first unescaped `=`, `:`, or whitespace; a single
/// `=`/`:` following whitespace is consumed as the separator; the value is
/// the remainder with leading whitespace skipped and trailing whitespace kept.
fn split_key_value(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut key_end = bytes.len();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' | b':' | b' ' | b'\t' | b'\x0C' => {
                key_end = i;
                break;
            }
            _ => i += 1,
        }
    }

    let key = &line[..key_end.min(line.len())];
    let mut rest = i.min(bytes.len());

    // Skip whitespace between key and separator
    while rest < bytes.len() && matches!(bytes[rest], b' ' | b'\t' | b'\x0C') {
        rest += 1;
    }
    // Consume at most one explicit separator
    if rest < bytes.len() && matches!(bytes[rest], b'=' | b':') {
        rest += 1;
        while rest < bytes.len() && matches!(bytes[rest], b' ' | b'\t' | b'\x0C') {
            rest += 1;
        }
    }

    (key, &line[rest..])
}

/// Decode backslash escapes in a raw key or value
fn unescape(raw: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(Error::properties_parse(line_no, "malformed \\uxxxx encoding"));
                }
                let code = u32::from_str_radix(&hex, 16).map_err(|_| {
                    Error::properties_parse(line_no, format!("malformed \\u{} encoding", hex))
                })?;
                let ch = char::from_u32(code).ok_or_else(|| {
                    Error::properties_parse(line_no, format!("\\u{} is not a valid character", hex))
                })?;
                out.push(ch);
            }
            // Any other escaped character stands for itself
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic_pair() {
        let props = PropertySet::parse("google.maps.apiKey=ABC123\n").unwrap();
        assert_eq!(props.get("google.maps.apiKey"), Some("ABC123"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_parse_colon_separator() {
        let props = PropertySet::parse("sdk.dir: /opt/android-sdk").unwrap();
        assert_eq!(props.get("sdk.dir"), Some("/opt/android-sdk"));
    }

    #[test]
    fn test_parse_whitespace_separator() {
        let props = PropertySet::parse("flavor beta").unwrap();
        assert_eq!(props.get("flavor"), Some("beta"));
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let input = "# sdk location\n! legacy comment\n\nsdk.dir=/opt/sdk\n";
        let props = PropertySet::parse(input).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("sdk.dir"), Some("/opt/sdk"));
    }

    #[test]
    fn test_parse_leading_whitespace_before_key() {
        let props = PropertySet::parse("   indented=yes").unwrap();
        assert_eq!(props.get("indented"), Some("yes"));
    }

    #[test]
    fn test_parse_line_continuation() {
        let input = "fruits=apple, banana, \\\n       pear\n";
        let props = PropertySet::parse(input).unwrap();
        assert_eq!(props.get("fruits"), Some("apple, banana, pear"));
    }

    #[test]
    fn test_parse_escaped_trailing_backslash_is_not_continuation() {
        // Even backslash count: the line is complete and decodes to one backslash
        let props = PropertySet::parse("path=C\\:\\\\\nnext=1\n").unwrap();
        assert_eq!(props.get("path"), Some("C:\\"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_parse_escaped_separator_in_key() {
        let props = PropertySet::parse("a\\=b=c").unwrap();
        assert_eq!(props.get("a=b"), Some("c"));
    }

    #[test]
    fn test_parse_character_escapes() {
        let props = PropertySet::parse("message=line1\\nline2\\tend").unwrap();
        assert_eq!(props.get("message"), Some("line1\nline2\tend"));
    }

    #[test]
    fn test_parse_unicode_escape() {
        let props = PropertySet::parse("letter=\\u0041").unwrap();
        assert_eq!(props.get("letter"), Some("A"));
    }

    #[test]
    fn test_parse_malformed_unicode_escape() {
        let err = PropertySet::parse("ok=1\nbad=\\u00").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::PropertiesParseError);
        assert!(err.message.contains("line 2"));
    }

    #[test]
    fn test_parse_non_hex_unicode_escape() {
        let err = PropertySet::parse("bad=\\uZZZZ").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::PropertiesParseError);
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let props = PropertySet::parse("k=first\nk=second\n").unwrap();
        assert_eq!(props.get("k"), Some("second"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_parse_preserves_trailing_whitespace_in_value() {
        let props = PropertySet::parse("k=value  ").unwrap();
        assert_eq!(props.get("k"), Some("value  "));
    }

    #[test]
    fn test_parse_key_without_value() {
        let props = PropertySet::parse("standalone\nexplicit=\n").unwrap();
        assert_eq!(props.get("standalone"), Some(""));
        assert_eq!(props.get("explicit"), Some(""));
    }

    #[test]
    fn test_parse_idempotent() {
        let input = "google.maps.apiKey=ABC123\nsdk.dir=/opt/sdk\n";
        let first = PropertySet::parse(input).unwrap();
        let second = PropertySet::parse(input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keys_sorted() {
        let props = PropertySet::parse("b=2\na=1\nc=3\n").unwrap();
        assert_eq!(props.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.properties");

        let props = LocalProperties::load(&path).unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.properties");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# local secrets").unwrap();
        writeln!(file, "google.maps.apiKey=ABC123").unwrap();

        let props = LocalProperties::load(&path).unwrap();
        assert_eq!(props.get("google.maps.apiKey"), Some("ABC123"));
    }

    #[test]
    fn test_load_propagates_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.properties");
        std::fs::write(&path, "bad=\\u12").unwrap();

        let err = LocalProperties::load(&path).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::PropertiesParseError);
        assert!(err.context.unwrap().contains("local.properties"));
    }
}
