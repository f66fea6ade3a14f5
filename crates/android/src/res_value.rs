//! Maps API-key resolution and generated string resources
//!
//! The Carrot manifest references `@string/google_maps_key` as a placeholder.
//! That resource is not checked in: it is generated at build time from the
//! `google.maps.apiKey` entry of `local.properties`. A missing file or key
//! produces an empty value instead of failing the build, so machines without
//! secrets configured still build (with a non-functional maps view).

use carrot_core::error::{Error, Result};
use carrot_core::properties::PropertySet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Property key consumed from `local.properties`
pub const MAPS_API_KEY_PROPERTY: &str = "google.maps.apiKey";

/// Name of the generated string resource
pub const MAPS_KEY_RESOURCE: &str = "google_maps_key";

/// File the generated resources are written to, under `res/values/`
pub const GENERATED_FILE_NAME: &str = "generated.xml";

/// A generated Android resource value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResValue {
    /// Resource type (`string` for everything generated here)
    pub res_type: &'static str,
    /// Resource name
    pub name: String,
    /// Resource value
    pub value: String,
}

impl ResValue {
    /// Create a string resource value
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            res_type: "string",
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolve the maps-key resource from a loaded property set
///
/// The lookup is an explicit `Option`: a missing key is not an error, it
/// substitutes the empty string.
pub fn resolve_maps_key(props: &PropertySet) -> ResValue {
    let value: Option<&str> = props.get(MAPS_API_KEY_PROPERTY);
    let value = value.unwrap_or("");
    ResValue::string(MAPS_KEY_RESOURCE, value)
}

/// Render resource values as a `res/values` XML document
pub fn render_values_xml(values: &[ResValue]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");
    for value in values {
        xml.push_str(&format!(
            "    <{} name=\"{}\" translatable=\"false\">{}</{}>\n",
            value.res_type,
            escape_xml(&value.name),
            escape_xml(&value.value),
            value.res_type,
        ));
    }
    xml.push_str("</resources>\n");
    xml
}

/// Write resource values to `<res_dir>/values/generated.xml`
///
/// Creates the `values` directory if needed and overwrites any previous
/// generated file. Same inputs produce byte-identical output.
pub fn write_values_file(res_dir: &Path, values: &[ResValue]) -> Result<PathBuf> {
    let values_dir = res_dir.join("values");
    std::fs::create_dir_all(&values_dir)
        .map_err(|e| Error::resource_write(&values_dir, e))?;

    let out_path = values_dir.join(GENERATED_FILE_NAME);
    let xml = render_values_xml(values);
    std::fs::write(&out_path, xml).map_err(|e| Error::resource_write(&out_path, e))?;

    Ok(out_path)
}

/// Escape XML-significant characters in resource names and values
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrot_core::properties::{LocalProperties, PropertySet};

    #[test]
    fn test_resolve_key_present() {
        let props = PropertySet::parse("google.maps.apiKey=ABC123\n").unwrap();
        let res = resolve_maps_key(&props);
        assert_eq!(res.name, "google_maps_key");
        assert_eq!(res.value, "ABC123");
        assert_eq!(res.res_type, "string");
    }

    #[test]
    fn test_resolve_key_value_not_trimmed() {
        // Standard properties decoding only: trailing whitespace survives
        let props = PropertySet::parse("google.maps.apiKey=abc ").unwrap();
        assert_eq!(resolve_maps_key(&props).value, "abc ");
    }

    #[test]
    fn test_resolve_missing_key_is_empty() {
        let props = PropertySet::parse("sdk.dir=/opt/sdk\n").unwrap();
        let res = resolve_maps_key(&props);
        assert_eq!(res.value, "");
    }

    #[test]
    fn test_resolve_empty_set_is_empty() {
        let res = resolve_maps_key(&PropertySet::empty());
        assert_eq!(res.value, "");
    }

    #[test]
    fn test_resolve_missing_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let props = LocalProperties::load(&dir.path().join("local.properties")).unwrap();
        let res = resolve_maps_key(&props);
        assert_eq!(res.name, "google_maps_key");
        assert_eq!(res.value, "");
    }

    #[test]
    fn test_resolve_idempotent() {
        let props = PropertySet::parse("google.maps.apiKey=ABC123\n").unwrap();
        assert_eq!(resolve_maps_key(&props), resolve_maps_key(&props));
    }

    #[test]
    fn test_render_values_xml() {
        let values = vec![ResValue::string("google_maps_key", "ABC123")];
        let xml = render_values_xml(&values);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains(
            "<string name=\"google_maps_key\" translatable=\"false\">ABC123</string>"
        ));
        assert!(xml.trim_end().ends_with("</resources>"));
    }

    #[test]
    fn test_render_escapes_xml_characters() {
        let values = vec![ResValue::string("google_maps_key", "a&b<c>\"d'")];
        let xml = render_values_xml(&values);
        assert!(xml.contains("a&amp;b&lt;c&gt;&quot;d&apos;"));
    }

    #[test]
    fn test_write_values_file() {
        let dir = tempfile::tempdir().unwrap();
        let res_dir = dir.path().join("app/src/main/res");
        let values = vec![ResValue::string("google_maps_key", "ABC123")];

        let path = write_values_file(&res_dir, &values).unwrap();
        assert!(path.ends_with("values/generated.xml"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("ABC123"));
    }

    #[test]
    fn test_write_values_file_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let res_dir = dir.path().to_path_buf();
        let values = vec![ResValue::string("google_maps_key", "ABC123")];

        let first = write_values_file(&res_dir, &values).unwrap();
        let first_bytes = std::fs::read(&first).unwrap();
        let second = write_values_file(&res_dir, &values).unwrap();
        let second_bytes = std::fs::read(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }
}
