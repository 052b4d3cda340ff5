//! Zone compiler: replayed submissions in, zone text out.
//!
//! Only the most recent submission per identity survives; a later, shorter
//! host list drops the earlier extra aliases. Identities are emitted in
//! lexicographic order so the same log always yields the same zone.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use subzone_core::SubmissionEvent;

use super::template::ZoneTemplate;

/// A fully rendered zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDocument {
    text: String,
    serial: u32,
    identities: usize,
    records: usize,
}

impl ZoneDocument {
    /// Complete zone file text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Serial embedded in the SOA record.
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Number of identities with published aliases.
    pub const fn identities(&self) -> usize {
        self.identities
    }

    /// Number of alias records emitted.
    pub const fn records(&self) -> usize {
        self.records
    }

    /// Consume the document, keeping the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Reduce events to the latest host list per identity.
///
/// Identities are keyed lowercase, so older mixed-case lines merge with the
/// block they would collide with in the zone.
#[must_use]
pub fn latest_hosts(events: &[SubmissionEvent]) -> BTreeMap<String, &[String]> {
    let mut latest = BTreeMap::new();
    for event in events {
        latest.insert(event.identity.to_ascii_lowercase(), event.hosts.as_slice());
    }
    latest
}

/// Render the zone for `events` with the given serial.
#[must_use]
pub fn compile(events: &[SubmissionEvent], template: &ZoneTemplate, serial: u32) -> ZoneDocument {
    let latest = latest_hosts(events);

    let mut text = template.render(serial);
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }

    let mut records = 0;
    for (identity, hosts) in &latest {
        for (idx, host) in hosts.iter().enumerate() {
            let host = host.strip_suffix('.').unwrap_or(host);
            let _ = writeln!(text, "server{idx}.{identity}\t\tCNAME\t{host}.");
            records += 1;
        }
    }

    ZoneDocument {
        text,
        serial,
        identities: latest.len(),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(identity: &str, hosts: &[&str]) -> SubmissionEvent {
        SubmissionEvent::new(identity, hosts.iter().map(ToString::to_string).collect())
    }

    fn template() -> ZoneTemplate {
        ZoneTemplate::parse("@ SOA ns1. hostmaster. ( {{serial}} ; serial )\n", "example.org.")
            .unwrap()
    }

    fn alias_lines(doc: &ZoneDocument) -> Vec<&str> {
        doc.text().lines().filter(|l| l.contains("CNAME")).collect()
    }

    #[test]
    fn test_last_write_wins() {
        let events = vec![
            event("alice", &["a.com"]),
            event("alice", &["b.com", "c.com"]),
        ];
        let doc = compile(&events, &template(), 1);
        assert_eq!(
            alias_lines(&doc),
            vec!["server0.alice\t\tCNAME\tb.com.", "server1.alice\t\tCNAME\tc.com."]
        );
        assert!(!doc.text().contains("a.com"));
        assert_eq!(doc.identities(), 1);
        assert_eq!(doc.records(), 2);
    }

    #[test]
    fn test_shorter_list_drops_old_aliases() {
        let events = vec![
            event("bob", &["x.com", "y.com", "z.com"]),
            event("bob", &["w.com"]),
        ];
        let doc = compile(&events, &template(), 1);
        assert_eq!(alias_lines(&doc), vec!["server0.bob\t\tCNAME\tw.com."]);
    }

    #[test]
    fn test_identities_sorted() {
        let events = vec![
            event("zed", &["z.com"]),
            event("alice", &["a.com"]),
            event("mallory", &["m.com"]),
        ];
        let doc = compile(&events, &template(), 1);
        let names: Vec<_> = alias_lines(&doc)
            .iter()
            .map(|l| l.split('\t').next().unwrap())
            .collect();
        assert_eq!(names, vec!["server0.alice", "server0.mallory", "server0.zed"]);
    }

    #[test]
    fn test_identity_case_folds_into_one_block() {
        let events = vec![event("Alice", &["a.com", "b.com"]), event("alice", &["c.com"])];
        let doc = compile(&events, &template(), 1);
        assert_eq!(alias_lines(&doc), vec!["server0.alice\t\tCNAME\tc.com."]);
        assert_eq!(doc.identities(), 1);
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let events = vec![
            event("bob", &["b.com"]),
            event("alice", &["a.com.", "c.com"]),
            event("bob", &["d.com"]),
        ];
        let first = compile(&events, &template(), 2_016_040_800);
        let second = compile(&events, &template(), 2_016_040_800);
        assert_eq!(first.text().as_bytes(), second.text().as_bytes());
    }

    #[test]
    fn test_trailing_dot_not_doubled() {
        let events = vec![event("carol", &["c.example.com.", "d.example.com"])];
        let doc = compile(&events, &template(), 1);
        assert_eq!(
            alias_lines(&doc),
            vec![
                "server0.carol\t\tCNAME\tc.example.com.",
                "server1.carol\t\tCNAME\td.example.com.",
            ]
        );
    }

    #[test]
    fn test_serial_substituted() {
        let doc = compile(&[], &template(), 2_016_040_713);
        assert_eq!(doc.text(), "@ SOA ns1. hostmaster. ( 2016040713 ; serial )\n");
        assert_eq!(doc.serial(), 2_016_040_713);
        assert_eq!(doc.records(), 0);
    }

    #[test]
    fn test_newline_inserted_after_template() {
        let template = ZoneTemplate::parse("{{serial}} ; serial", "example.org.").unwrap();
        let doc = compile(&[event("a", &["a.com"])], &template, 3);
        assert_eq!(doc.into_text(), "3 ; serial\nserver0.a\t\tCNAME\ta.com.\n");
    }

    #[test]
    fn test_builtin_template_zone() {
        let template = ZoneTemplate::builtin("hosts.example.org.").unwrap();
        let doc = compile(&[event("abc123", &["node.example.net"])], &template, 10);
        assert!(doc.text().starts_with("$ORIGIN hosts.example.org.\n"));
        assert!(doc
            .text()
            .ends_with("mail    3600    A       192.0.2.12\nserver0.abc123\t\tCNAME\tnode.example.net.\n"));
    }
}
