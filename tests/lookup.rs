//! Lookup behavior over a small registry file.

mod common;

use ouilookup::{OuiEntry, OuiIndex};
use tempfile::TempDir;

fn sample_index() -> OuiIndex {
    let dir = TempDir::new().unwrap();
    let path = common::write_sample(dir.path());
    OuiIndex::from_path(&path).unwrap()
}

fn prefixes<'a>(it: impl Iterator<Item = &'a OuiEntry>) -> Vec<&'a str> {
    it.map(|e| e.prefix()).collect()
}

#[test]
fn test_has_entries() {
    assert_eq!(sample_index().size(), 4);
}

#[test]
fn test_by_prefix() {
    let index = sample_index();
    let entry = index.by_prefix("00:22:72").next().unwrap();
    assert_eq!(
        entry.organization_name(),
        Some("American Micro-Fuel Device Corp.")
    );
}

#[test]
fn test_prefix_separators_are_equivalent() {
    let index = sample_index();
    let colon = prefixes(index.by_prefix("00:22:72"));
    assert_eq!(prefixes(index.by_prefix("00-22-72")), colon);
    assert_eq!(prefixes(index.by_prefix("002272")), colon);
    assert_eq!(prefixes(index.by_prefix("de:ad:be")), vec!["DE:AD:BE"]);
}

#[test]
fn test_by_mac() {
    let index = sample_index();
    let mac = "BC:23:92:42:42:42";
    let entry = index.by_mac(mac).next().unwrap();
    assert!(mac.starts_with(entry.prefix()));
    assert_eq!(
        entry.organization_name(),
        Some("BYD Precision Manufacture Company Ltd.")
    );
}

#[test]
fn test_mac_matches_its_prefix() {
    let index = sample_index();
    for mac in ["00:22:72:00:00:01", "aa-bb-cc-dd-ee-ff", "DEADBEEF0001", "11:22:33:44:55:66"] {
        let oui: String = mac
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .take(6)
            .collect();
        assert_eq!(
            prefixes(index.by_mac(mac)),
            prefixes(index.by_prefix(&oui)),
            "mismatch for {}",
            mac
        );
    }
}

#[test]
fn test_by_organization() {
    let index = sample_index();
    let entry = index.by_organization("national security").next().unwrap();
    let org = entry.organization().unwrap();
    assert_eq!(org.street.as_deref(), Some("9800 SAVAGE ROAD"));

    let found: Vec<_> = index
        .by_organization("security")
        .filter_map(|e| e.organization_name())
        .collect();
    assert_eq!(found, vec!["National Security Agency"]);
}

#[test]
fn test_by_country_code() {
    let index = sample_index();
    assert_eq!(prefixes(index.by_country_code("US")), vec!["00:22:72", "AA:BB:CC"]);
    assert_eq!(index.by_country_code("us").count(), 2);
    assert_eq!(index.by_country_code("XX").count(), 0);

    let names: Vec<_> = index
        .by_country_code("DE")
        .filter_map(|e| e.organization_name())
        .collect();
    assert!(names.contains(&"Deutsche Beispiel GmbH"));
}

#[test]
fn test_by_country_name() {
    let index = sample_index();
    assert_eq!(
        prefixes(index.by_country_name("United States")),
        prefixes(index.by_country_code("US"))
    );
    assert_eq!(index.by_country_name("Germany").count(), 1);
    assert_eq!(index.by_country_name("china").count(), 1);
    assert_eq!(index.by_country_name("XXX").count(), 0);
}

#[test]
fn test_invalid_queries_are_empty() {
    let index = sample_index();
    assert_eq!(index.by_mac("invalid").count(), 0);
    assert_eq!(index.by_prefix("inv").count(), 0);
    assert_eq!(index.by_prefix("").count(), 0);
    assert_eq!(index.by_country_code("USA").count(), 0);
}

#[test]
fn test_queries_restart() {
    let index = sample_index();
    let mut first = index.by_country_code("US");
    first.next();
    first.next();
    assert!(first.next().is_none());
    assert_eq!(index.by_country_code("US").count(), 2);
}

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    let index = OuiIndex::from_path(&path).unwrap();
    assert_eq!(index.size(), 0);
    assert!(index.is_empty());
    assert_eq!(index.by_organization("").count(), 0);
    assert_eq!(index.by_country_code("US").count(), 0);
}

#[test]
fn test_malformed_file() {
    let index = OuiIndex::from_text("this is not a valid OUI file");
    assert_eq!(index.size(), 0);
}

#[test]
fn test_missing_file() {
    let err = OuiIndex::from_path("/nonexistent/oui.txt").unwrap_err();
    assert!(matches!(err, ouilookup::OuiError::SourceUnreadable { .. }));
}

#[test]
fn test_compact_layout_without_blank_lines() {
    let text = common::SAMPLE
        .lines()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let index = OuiIndex::from_text(&text);
    assert_eq!(index.size(), 4);
    assert_eq!(index.by_country_code("DE").count(), 1);
}

#[test]
fn test_truncated_last_record_is_dropped() {
    let cut = common::SAMPLE.rfind("\t\t\t\tDE").unwrap();
    let index = OuiIndex::from_text(&common::SAMPLE[..cut]);
    assert_eq!(index.size(), 3);
    assert_eq!(index.by_prefix("DE:AD:BE").count(), 0);
}

#[test]
fn test_duplicate_prefixes_are_kept() {
    let text = format!("{}{}", common::SAMPLE, common::SAMPLE);
    let index = OuiIndex::from_text(&text);
    assert_eq!(index.size(), 8);
    assert_eq!(index.by_prefix("00:22:72").count(), 2);
}
