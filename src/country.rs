//! Country name resolution.
//!
//! Free-text country names ("United States", "germany", "Côte d'Ivoire")
//! are matched against the ISO 3166-1 list and mapped to their alpha-2
//! code. Lookups are memoized per resolver.

use dashmap::DashMap;
use deunicode::deunicode;
use isocountry::CountryCode;
use tracing::debug;

/// Shortest query allowed to match by containment.
const MIN_PARTIAL_LEN: usize = 3;

/// A country with its name already normalized for matching.
type Row = (&'static CountryCode, String);

/// Transliterate to ASCII, lowercase, and collapse punctuation/whitespace
/// runs to a single space.
fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in deunicode(s).chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

fn contains_words(haystack: &str, needle: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

fn table() -> Vec<Row> {
    CountryCode::iter().map(|c| (c, normalize(c.name()))).collect()
}

/// Resolve a free-text country name to an ISO 3166-1 alpha-2 code.
///
/// Tried in order, first hit wins:
/// 1. exact match on alpha-2, alpha-3 or name (ignoring case, accents, punctuation);
/// 2. the query appears as whole words inside a name (shortest name wins);
/// 3. a name appears as whole words inside the query (longest name wins);
/// 4. the query is a plain substring of a name (shortest name wins).
///
/// Steps 2-4 require at least three characters.
///
/// # Examples
/// ```
/// use ouilookup::country::search_fuzzy;
/// assert_eq!(search_fuzzy("United States"), Some("US"));
/// assert_eq!(search_fuzzy("germany"), Some("DE"));
/// assert_eq!(search_fuzzy("XXX"), None);
/// ```
pub fn search_fuzzy(query: &str) -> Option<&'static str> {
    let q = normalize(query);
    if q.is_empty() {
        return None;
    }

    let rows = table();
    let exact = rows.iter().find(|(c, name)| {
        q == c.alpha2().to_ascii_lowercase() || q == c.alpha3().to_ascii_lowercase() || *name == q
    });
    if let Some((c, _)) = exact {
        return Some(c.alpha2());
    }

    if q.len() < MIN_PARTIAL_LEN {
        return None;
    }

    best(&rows, false, |n| contains_words(n, &q))
        .or_else(|| best(&rows, true, |n| contains_words(&q, n)))
        .or_else(|| best(&rows, false, |n| n.contains(q.as_str())))
        .map(|(c, _)| c.alpha2())
}

/// Matching row with the shortest name, or the longest if `longest`.
fn best(rows: &[Row], longest: bool, pred: impl Fn(&str) -> bool) -> Option<&Row> {
    let hits = rows.iter().filter(|(_, n)| pred(n));
    if longest {
        hits.max_by_key(|(_, n)| n.len())
    } else {
        hits.min_by_key(|(_, n)| n.len())
    }
}

/// Memoizing front end for [`search_fuzzy`].
///
/// Keyed by the exact query string, including unresolvable ones. Safe to
/// share between threads.
#[derive(Debug, Default)]
pub struct CountryResolver {
    cache: DashMap<String, Option<&'static str>>,
}

impl CountryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alpha-2 code for `name`, or `None` if no country matches.
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        if name.trim().is_empty() {
            return None;
        }
        if let Some(hit) = self.cache.get(name) {
            return *hit;
        }

        let code = search_fuzzy(name);
        match code {
            Some(cc) => debug!("Resolved country {:?} -> {}", name, cc),
            None => debug!("Could not resolve country {:?}", name),
        }
        self.cache.insert(name.to_string(), code);
        code
    }

    /// Number of distinct queries memoized so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
