//! Zone template with named placeholders.
//!
//! Placeholders are written `{{name}}`. The text is split into literal and
//! field segments once, when the template is loaded, so rendering never
//! searches the output for marker text.

use std::fmt::Write as _;
use std::path::Path;

use subzone_core::{Result, SubzoneError};

/// Built-in template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = "$ORIGIN {{origin}}
$TTL 60

@       3600    SOA     ns1.{{origin}} hostmaster.{{origin}} (
                        {{serial}}      ; serial
                        1800            ; refresh
                        7200            ; retry
                        1209600         ; expire
                        3600 )          ; negative

                NS      ns1.{{origin}}
                NS      ns2.{{origin}}

                MX      0 mail.{{origin}}

@       3600    A       192.0.2.10

ns1     3600    A       192.0.2.10
ns2     3600    A       192.0.2.11
mail    3600    A       192.0.2.12
";

/// Named values a template can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// SOA serial number
    Serial,
    /// Absolute zone origin, e.g. `hosts.example.org.`
    Origin,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "serial" => Some(Self::Serial),
            "origin" => Some(Self::Origin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed zone template bound to its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTemplate {
    segments: Vec<Segment>,
    origin: String,
}

impl ZoneTemplate {
    /// Parse template text. The origin is made absolute.
    ///
    /// Fails on an unterminated or unknown placeholder, or when the text has
    /// no `{{serial}}` placeholder at all.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = text;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                SubzoneError::Template(format!(
                    "unterminated placeholder at byte {}",
                    text.len() - rest.len() + start
                ))
            })?;
            let name = after[..end].trim();
            let field = Field::from_name(name)
                .ok_or_else(|| SubzoneError::Template(format!("unknown field {{{{{name}}}}}")))?;
            segments.push(Segment::Field(field));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        if !segments.contains(&Segment::Field(Field::Serial)) {
            return Err(SubzoneError::Template(
                "template has no {{serial}} placeholder".into(),
            ));
        }

        Ok(Self {
            segments,
            origin: absolute(origin),
        })
    }

    /// The built-in template for `origin`.
    pub fn builtin(origin: &str) -> Result<Self> {
        Self::parse(DEFAULT_TEMPLATE, origin)
    }

    /// Read and parse a template file.
    pub async fn load(path: &Path, origin: &str) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            SubzoneError::Template(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&text, origin)
    }

    /// Absolute origin the template renders with.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Render with the given serial.
    #[must_use]
    pub fn render(&self, serial: u32) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(Field::Serial) => {
                    let _ = write!(out, "{serial}");
                }
                Segment::Field(Field::Origin) => out.push_str(&self.origin),
            }
        }
        out
    }
}

fn absolute(origin: &str) -> String {
    if origin.ends_with('.') {
        origin.to_string()
    } else {
        format!("{origin}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_renders_serial_and_origin() {
        let template = ZoneTemplate::builtin("hosts.example.org").unwrap();
        assert_eq!(template.origin(), "hosts.example.org.");

        let text = template.render(2_016_040_713);
        assert!(text.starts_with("$ORIGIN hosts.example.org.\n"));
        assert!(text.contains("2016040713      ; serial"));
        assert!(text.contains("NS      ns2.hosts.example.org."));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_literal_marker_words_are_untouched() {
        let template = ZoneTemplate::parse("; serial SERIALXXXX\n{{serial}} ; serial\n", ".").unwrap();
        assert_eq!(template.render(7), "; serial SERIALXXXX\n7 ; serial\n");
    }

    #[test]
    fn test_whitespace_inside_placeholder() {
        let template = ZoneTemplate::parse("{{ serial }}", "a.b.").unwrap();
        assert_eq!(template.render(42), "42");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ZoneTemplate::parse("{{serial}} {{ttl}}", "a.b.").unwrap_err();
        assert!(err.to_string().contains("{{ttl}}"));
    }

    #[test]
    fn test_unterminated_placeholder_rejected() {
        let err = ZoneTemplate::parse("{{serial}} {{origin", "a.b.").unwrap_err();
        assert!(matches!(err, SubzoneError::Template(_)));
    }

    #[test]
    fn test_serial_placeholder_required() {
        assert!(ZoneTemplate::parse("$ORIGIN {{origin}}\n", "a.b.").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone.tmpl");
        std::fs::write(&path, "@ SOA ns. host. ( {{serial}} ; serial\n").unwrap();

        let template = ZoneTemplate::load(&path, "x.org").await.unwrap();
        assert_eq!(template.render(1), "@ SOA ns. host. ( 1 ; serial\n");

        assert!(ZoneTemplate::load(&dir.path().join("missing"), "x.org")
            .await
            .is_err());
    }
}
