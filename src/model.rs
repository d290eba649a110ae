//! Record types produced by the parser and served by the index.

use serde::Serialize;

use crate::validation::canonical_prefix;

/// The organization an OUI block is assigned to.
///
/// Fields are stored exactly as given; the parser trims them before
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub name: String,
    pub street: Option<String>,
    pub district: Option<String>,
    /// Two-letter country code as it appears in the registry.
    pub country: Option<String>,
}

impl Organization {
    /// Organization without address lines.
    ///
    /// `name` must not be empty; records without a name carry no
    /// organization at all.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.trim().is_empty(), "organization name must not be empty");
        Self {
            name,
            street: None,
            district: None,
            country: None,
        }
    }

    pub fn with_address(
        name: impl Into<String>,
        street: impl Into<String>,
        district: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let name = name.into();
        debug_assert!(!name.trim().is_empty(), "organization name must not be empty");
        Self {
            name,
            street: Some(street.into()),
            district: Some(district.into()),
            country: Some(country.into()),
        }
    }
}

/// A single registry assignment: a 24-bit prefix and its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OuiEntry {
    prefix: String,
    organization: Option<Organization>,
}

impl OuiEntry {
    /// Build an entry, canonicalizing the prefix to `XX:XX:XX`.
    ///
    /// Accepts the same spellings as [`canonical_prefix`]; anything else
    /// returns `None`.
    pub fn new(prefix: &str, organization: Option<Organization>) -> Option<Self> {
        let prefix = canonical_prefix(prefix)?;
        Some(Self {
            prefix,
            organization,
        })
    }

    /// Canonical `XX:XX:XX` prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    /// Organization name, if the record carried one.
    pub fn organization_name(&self) -> Option<&str> {
        self.organization.as_ref().map(|o| o.name.as_str())
    }

    /// Country code of the owning organization, if any.
    pub fn country(&self) -> Option<&str> {
        self.organization
            .as_ref()
            .and_then(|o| o.country.as_deref())
    }
}
