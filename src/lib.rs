//! # ouilookup - IEEE OUI registry lookup
//!
//! Parses the IEEE MA-L registry (`oui.txt`), indexes it in memory and answers
//! lookups by prefix, MAC address, organization name, country code and
//! country name.
//!
//! ## Features
//!
//! - **Tolerant parser** - Streams `oui.txt`, skipping malformed records
//! - **Indexed lookups** - Constant-time prefix, MAC and country code queries
//! - **Fuzzy countries** - Country names resolved to codes, results cached
//! - **Cached downloads** - Local copy refreshed only when stale, written atomically
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ouilookup                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap) + Config (serde_yaml)                           │
//! │    └── Output: log, json, csv, table                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Loader                                                     │
//! │    ├── Staleness check on the local copy                    │
//! │    └── Fetcher (reqwest blocking + rustls)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Parser                                                     │
//! │    └── oui.txt records -> OuiEntry                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  OuiIndex                                                   │
//! │    ├── prefix / country code hash indexes                   │
//! │    └── CountryResolver (fuzzy name -> code, cached)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use ouilookup::OuiIndex;
//!
//! let text = "00-22-72   (hex)\t\tAmerican Micro-Fuel Device Corp.\n\
//!             002272     (base 16)\t\tAmerican Micro-Fuel Device Corp.\n\
//!             \t\t\t\t123 Main St\n\
//!             \t\t\t\tAnytown, CA 90210\n\
//!             \t\t\t\tUS\n";
//! let index = OuiIndex::from_text(text);
//!
//! let entry = index.by_mac("00:22:72:12:34:56").next().unwrap();
//! assert_eq!(entry.organization_name(), Some("American Micro-Fuel Device Corp."));
//! assert_eq!(index.by_country_name("United States").count(), 1);
//! ```
//!
//! Fetching the registry:
//!
//! ```no_run
//! use ouilookup::{Loader, LoaderConfig};
//!
//! fn main() -> ouilookup::Result<()> {
//!     let index = Loader::new(LoaderConfig::default())?.index()?;
//!     for entry in index.by_organization("cisco") {
//!         println!("{} {:?}", entry.prefix(), entry.organization_name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod country;
pub mod error;
pub mod fetcher;
pub mod index;
pub mod loader;
pub mod model;
pub mod output;
pub mod parser;
pub mod validation;

pub use config::Config;
pub use error::{OuiError, Result};
pub use index::{Matches, OuiIndex};
pub use loader::{LoadOutcome, Loader, LoaderConfig};
pub use model::{Organization, OuiEntry};
