//! Parser for the IEEE OUI registry plaintext format.
//!
//! A record spans five lines:
//!
//! ```text
//! 00-22-72   (hex)                American Micro-Fuel Device Corp.
//! 002272     (base 16)            American Micro-Fuel Device Corp.
//!                                 2181 Buchanan Loop
//!                                 Ferndale  WA  98248
//!                                 US
//! ```
//!
//! Only the header line is inspected for structure. The four lines after it
//! are taken positionally (separator, street, district, country) whatever
//! they contain. Anything that does not fit is skipped; a truncated record
//! at end of input is dropped.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{OuiError, Result};
use crate::model::{OuiEntry, Organization};
use crate::validation::canonical_prefix;

/// Marker that identifies a record header.
pub const HEX_MARKER: &str = "(hex)";

/// Number of leading header characters holding the prefix.
const PREFIX_WIDTH: usize = 8;

/// Position of the cursor within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Looking for the next `(hex)` header.
    Seeking,
    /// Header consumed, next line is the separator.
    AfterHeader,
    Street,
    District,
    Country,
}

/// Fields collected so far for the record being read.
#[derive(Debug, Default)]
struct PendingRecord {
    prefix: String,
    name: String,
    street: String,
    district: String,
}

impl PendingRecord {
    fn finish(self, country: &str) -> Option<OuiEntry> {
        let organization = (!self.name.is_empty()).then(|| Organization {
            name: self.name,
            street: non_empty(self.street),
            district: non_empty(self.district),
            country: non_empty(country.to_string()),
        });
        OuiEntry::new(&self.prefix, organization)
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// Split a header line into (canonical prefix, organization name).
fn split_header(line: &str) -> Option<(String, String)> {
    let (_, name) = line.split_once(HEX_MARKER)?;
    let head: String = line.chars().take(PREFIX_WIDTH).collect();
    let prefix = canonical_prefix(head.trim())?;
    Some((prefix, name.trim().to_string()))
}

/// Streaming iterator of registry entries over a buffered reader.
///
/// Yields entries in file order. The only items that can be errors are
/// read failures, after which iteration stops.
pub struct Entries<R> {
    reader: R,
    source: PathBuf,
    buf: String,
    line_no: usize,
    state: ParseState,
    pending: Option<PendingRecord>,
    done: bool,
}

impl<R: BufRead> Entries<R> {
    pub fn new(reader: R) -> Self {
        Self::with_source(reader, PathBuf::from("<stream>"))
    }

    /// Like [`Entries::new`], naming `source` in read errors.
    pub fn with_source(reader: R, source: PathBuf) -> Self {
        Self {
            reader,
            source,
            buf: String::new(),
            line_no: 0,
            state: ParseState::Seeking,
            pending: None,
            done: false,
        }
    }

    /// Advance the state machine by one line, returning a finished entry
    /// when the country line closes a record.
    fn step(&mut self, line: &str) -> Option<OuiEntry> {
        match self.state {
            ParseState::Seeking => {
                if let Some((prefix, name)) = split_header(line) {
                    self.pending = Some(PendingRecord {
                        prefix,
                        name,
                        ..Default::default()
                    });
                    self.state = ParseState::AfterHeader;
                }
                None
            }
            ParseState::AfterHeader => {
                self.state = ParseState::Street;
                None
            }
            ParseState::Street => {
                if let Some(p) = self.pending.as_mut() {
                    p.street = line.trim().to_string();
                }
                self.state = ParseState::District;
                None
            }
            ParseState::District => {
                if let Some(p) = self.pending.as_mut() {
                    p.district = line.trim().to_string();
                }
                self.state = ParseState::Country;
                None
            }
            ParseState::Country => {
                self.state = ParseState::Seeking;
                self.pending.take().and_then(|p| p.finish(line.trim()))
            }
        }
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<OuiEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    // Whatever is pending is a truncated record.
                    self.done = true;
                    self.pending = None;
                }
                Ok(_) => {
                    self.line_no += 1;
                    let line = std::mem::take(&mut self.buf);
                    let entry = self.step(line.trim_end_matches(['\n', '\r']));
                    self.buf = line;
                    if entry.is_some() {
                        return entry.map(Ok);
                    }
                }
                Err(e) => {
                    self.done = true;
                    let err = if e.kind() == ErrorKind::InvalidData {
                        OuiError::Decoding {
                            line: self.line_no + 1,
                            source: e,
                        }
                    } else {
                        OuiError::SourceUnreadable {
                            path: self.source.clone(),
                            source: e,
                        }
                    };
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

/// Parse every entry from a buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<OuiEntry>> {
    Entries::new(reader).collect()
}

/// Parse a registry file.
///
/// # Errors
/// [`OuiError::SourceUnreadable`] if the file cannot be opened or read,
/// [`OuiError::Decoding`] if it is not valid UTF-8.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<OuiEntry>> {
    let path = path.as_ref();
    debug!("Parsing entries from {:?}", path);

    let file = File::open(path).map_err(|source| OuiError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = Entries::with_source(BufReader::new(file), path.to_path_buf())
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Parse registry text already held in memory.
pub fn parse_str(content: &str) -> Vec<OuiEntry> {
    // Reading from a &str cannot fail, so no item is an error.
    Entries::new(content.as_bytes())
        .filter_map(|r| r.ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
00-22-72   (hex)\t\tAmerican Micro-Fuel Device Corp.
002272     (base 16)\t\tAmerican Micro-Fuel Device Corp.
\t\t\t\t2181 Buchanan Loop
\t\t\t\tFerndale  WA  98248
\t\t\t\tUS

BC-23-92   (hex)\t\tBYD Precision Manufacture Company Ltd.

\t\t\t\tBuilding 1
\t\t\t\tShenzhen, Guangdong 518000
\t\t\t\tCN
";

    #[test]
    fn test_parse_two_records() {
        let entries = parse_str(SAMPLE);
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.prefix(), "00:22:72");
        let org = first.organization().unwrap();
        assert_eq!(org.name, "American Micro-Fuel Device Corp.");
        assert_eq!(org.street.as_deref(), Some("2181 Buchanan Loop"));
        assert_eq!(org.district.as_deref(), Some("Ferndale  WA  98248"));
        assert_eq!(org.country.as_deref(), Some("US"));

        assert_eq!(entries[1].prefix(), "BC:23:92");
        assert_eq!(entries[1].country(), Some("CN"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_str("").is_empty());
    }

    #[test]
    fn test_parse_no_markers() {
        assert!(parse_str("this is not a valid OUI file\nnor is this\n").is_empty());
    }

    #[test]
    fn test_truncated_record_dropped() {
        let content = "\
00-22-72   (hex)   Complete Corp.

1 Street
Town
US
AA-BB-CC   (hex)   Truncated Inc.

2 Street
";
        let entries = parse_str(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].organization_name(), Some("Complete Corp."));
    }

    #[test]
    fn test_marker_inside_record_is_text() {
        let content = "\
00-22-72   (hex)   First Corp.

Unit 5 (hex) Building
Town
US
";
        let entries = parse_str(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].organization().unwrap().street.as_deref(),
            Some("Unit 5 (hex) Building")
        );
    }

    #[test]
    fn test_header_as_address_line_is_swallowed() {
        // A header arriving while a record is open is consumed positionally.
        let content = "\
00-22-72   (hex)   First Corp.

AA-BB-CC   (hex)   Second Corp.
Town
US
";
        let entries = parse_str(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prefix(), "00:22:72");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "00-22-72   (hex)   Acme\r\n\r\n1 Road\r\nTown\r\nDE\r\n";
        let entries = parse_str(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].country(), Some("DE"));
        assert_eq!(entries[0].organization_name(), Some("Acme"));
    }

    #[test]
    fn test_invalid_prefix_header_skipped() {
        let content = "\
garbage!   (hex)   Nobody

x
y
z
00-22-72   (hex)   Acme

1 Road
Town
US
";
        let entries = parse_str(content);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prefix(), "00:22:72");
    }

    #[test]
    fn test_empty_name_has_no_organization() {
        let content = "00-22-72   (hex)\n\n1 Road\nTown\nUS\n";
        let entries = parse_str(content);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].organization().is_none());
    }

    #[test]
    fn test_decoding_error() {
        let mut bytes = b"00-22-72   (hex)   Acme\n\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let result = parse_reader(Cursor::new(bytes));
        match result {
            Err(OuiError::Decoding { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected decoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/definitely/not/here/oui.txt");
        assert!(matches!(result, Err(OuiError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("oui.txt");
        std::fs::write(&path, SAMPLE).unwrap();
        let entries = parse_file(&path).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
