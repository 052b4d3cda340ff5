//! SOA serial management.
//!
//! The serial of the zone currently published is read back from its text:
//! the first line whose `;` comment starts with the word `serial` carries
//! the value as its first token (`2016040799 ; serial`). The next zone gets
//! that value plus one.

use subzone_core::{Result, SubzoneError};
use tracing::warn;

/// Serial used when no previous value can be recovered.
pub const DEFAULT_SERIAL: u32 = 2_016_040_712;

/// Comment word identifying the serial line inside the SOA record.
const SERIAL_MARKER: &str = "serial";

/// True if the line's comment is the serial annotation. Owner names and
/// the origin may contain the word too, so only the comment is inspected.
fn is_serial_line(line: &str) -> bool {
    line.split_once(';')
        .and_then(|(_, comment)| comment.split_whitespace().next())
        .is_some_and(|word| word.eq_ignore_ascii_case(SERIAL_MARKER))
}

/// Why no serial could be read from an existing zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialLookup {
    /// A value was found
    Found(u32),
    /// No line carries the marker
    NoMarker,
    /// The marker line's first token is not a serial
    Unparseable(String),
}

/// Locate the serial in a zone's text.
#[must_use]
pub fn current_serial(zone_text: &str) -> SerialLookup {
    let Some(line) = zone_text.lines().find(|l| is_serial_line(l)) else {
        return SerialLookup::NoMarker;
    };
    let token = line.split_whitespace().next().unwrap_or_default();
    token
        .parse::<u32>()
        .map_or_else(|_| SerialLookup::Unparseable(line.trim().to_string()), SerialLookup::Found)
}

/// Compute the serial for the next zone.
///
/// `None` means there is no previously published zone; the default is
/// returned unchanged. A zone whose serial cannot be read also degrades to
/// the default, with a warning. A readable serial is always incremented.
pub fn next_serial(current_zone_text: Option<&str>, default_serial: u32) -> Result<u32> {
    let Some(text) = current_zone_text else {
        return Ok(default_serial);
    };

    match current_serial(text) {
        SerialLookup::Found(serial) => serial
            .checked_add(1)
            .ok_or(SubzoneError::SerialExhausted(serial)),
        SerialLookup::NoMarker => {
            warn!(default = default_serial, "no serial line in current zone, using default");
            Ok(default_serial)
        }
        SerialLookup::Unparseable(line) => {
            warn!(%line, default = default_serial, "unparseable serial in current zone, using default");
            Ok(default_serial)
        }
    }
}
