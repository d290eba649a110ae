//! Queryable registry index.
//!
//! [`OuiIndex`] is built once from parsed entries and is read-only from then
//! on. Prefix and country lookups go through hash maps built at construction;
//! organization search is a linear scan.
//!
//! Every query returns a [`Matches`] iterator borrowing the index. A
//! `Matches` can be walked once; clone it, or call the query again, to walk
//! the same results another time. Results always come back in file order.

use std::collections::HashMap;
use std::io::BufRead;
use std::iter::FusedIterator;
use std::path::Path;

use tracing::{debug, warn};

use crate::country::CountryResolver;
use crate::error::Result;
use crate::model::OuiEntry;
use crate::parser;
use crate::validation::{canonical_country_code, canonical_prefix, mac_oui};

/// In-memory index over a parsed registry.
#[derive(Debug, Default)]
pub struct OuiIndex {
    entries: Vec<OuiEntry>,
    /// Canonical prefix -> positions in `entries`.
    prefixes: HashMap<String, Vec<usize>>,
    /// Uppercase country code -> positions in `entries`.
    countries: HashMap<String, Vec<usize>>,
    resolver: CountryResolver,
}

impl OuiIndex {
    /// Build the index in a single pass over `entries`.
    pub fn from_entries(entries: Vec<OuiEntry>) -> Self {
        let mut prefixes: HashMap<String, Vec<usize>> = HashMap::new();
        let mut countries: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, entry) in entries.iter().enumerate() {
            prefixes.entry(entry.prefix().to_string()).or_default().push(i);

            if let Some(cc) = entry.country().filter(|cc| !cc.is_empty()) {
                countries.entry(cc.to_uppercase()).or_default().push(i);
            }
        }

        debug!(
            "Indexed {} entries ({} prefixes, {} countries)",
            entries.len(),
            prefixes.len(),
            countries.len()
        );

        Self {
            entries,
            prefixes,
            countries,
            resolver: CountryResolver::new(),
        }
    }

    /// Parse and index a registry file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        parser::parse_file(path).map(Self::from_entries)
    }

    /// Parse and index a registry from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        parser::parse_reader(reader).map(Self::from_entries)
    }

    /// Parse and index registry text held in memory.
    pub fn from_text(content: &str) -> Self {
        Self::from_entries(parser::parse_str(content))
    }

    /// Entries sharing exactly this 24-bit prefix.
    ///
    /// Accepts `AA:BB:CC`, `AA-BB-CC` or `AABBCC` in any case. Malformed
    /// input is logged and yields nothing.
    pub fn by_prefix(&self, prefix: &str) -> Matches<'_> {
        match canonical_prefix(prefix) {
            Some(p) => self.bucket(&self.prefixes, &p),
            None => {
                if !prefix.is_empty() {
                    warn!("Invalid MAC prefix: {}", prefix);
                }
                Matches::empty()
            }
        }
    }

    /// Entries whose prefix is the OUI of a full MAC address.
    ///
    /// This is an exact match on the first three octets, never a
    /// longest-prefix match.
    pub fn by_mac(&self, mac: &str) -> Matches<'_> {
        match mac_oui(mac) {
            Some(p) => self.bucket(&self.prefixes, &p),
            None => {
                if !mac.is_empty() {
                    warn!("Invalid MAC address: {}", mac);
                }
                Matches::empty()
            }
        }
    }

    /// Entries whose organization name contains `name`, ignoring case.
    pub fn by_organization(&self, name: &str) -> Matches<'_> {
        if name.is_empty() {
            return Matches::empty();
        }
        Matches {
            inner: Inner::Scan {
                entries: self.entries.iter(),
                needle: name.to_lowercase(),
            },
        }
    }

    /// Entries registered to a two-letter country code (any case).
    pub fn by_country_code(&self, code: &str) -> Matches<'_> {
        match canonical_country_code(code) {
            Some(cc) => self.bucket(&self.countries, &cc),
            None => Matches::empty(),
        }
    }

    /// Entries registered to a country given by name, e.g. "Germany".
    ///
    /// Names that cannot be resolved yield nothing.
    pub fn by_country_name(&self, name: &str) -> Matches<'_> {
        match self.resolver.resolve(name) {
            Some(cc) => self.by_country_code(cc),
            None => Matches::empty(),
        }
    }

    /// Total number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[OuiEntry] {
        &self.entries
    }

    fn bucket<'a>(&'a self, map: &'a HashMap<String, Vec<usize>>, key: &str) -> Matches<'a> {
        match map.get(key) {
            Some(ids) => Matches {
                inner: Inner::Indexed {
                    entries: &self.entries,
                    ids: ids.iter(),
                },
            },
            None => Matches::empty(),
        }
    }
}

impl FromIterator<OuiEntry> for OuiIndex {
    fn from_iter<I: IntoIterator<Item = OuiEntry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

/// Lazy query result over an [`OuiIndex`].
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    inner: Inner<'a>,
}

#[derive(Debug, Clone)]
enum Inner<'a> {
    Empty,
    Indexed {
        entries: &'a [OuiEntry],
        ids: std::slice::Iter<'a, usize>,
    },
    Scan {
        entries: std::slice::Iter<'a, OuiEntry>,
        needle: String,
    },
}

impl<'a> Matches<'a> {
    fn empty() -> Self {
        Self { inner: Inner::Empty }
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a OuiEntry;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Empty => None,
            Inner::Indexed { entries, ids } => {
                let entries: &'a [OuiEntry] = *entries;
                ids.next().map(|&i| &entries[i])
            }
            Inner::Scan { entries, needle } => entries.find(|e| {
                e.organization_name()
                    .is_some_and(|n| n.to_lowercase().contains(needle.as_str()))
            }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Empty => (0, Some(0)),
            Inner::Indexed { ids, .. } => ids.size_hint(),
            Inner::Scan { entries, .. } => (0, Some(entries.len())),
        }
    }
}

impl FusedIterator for Matches<'_> {}
