//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Four complete records, laid out like the registry file.
pub const SAMPLE: &str = "\
00-22-72   (hex)\t\tAmerican Micro-Fuel Device Corp.
002272     (base 16)\t\tAmerican Micro-Fuel Device Corp.
\t\t\t\t123 Main St
\t\t\t\tAnytown, CA 90210
\t\t\t\tUS

BC-23-92   (hex)\t\tBYD Precision Manufacture Company Ltd.
BC2392     (base 16)\t\tBYD Precision Manufacture Company Ltd.
\t\t\t\tBuilding 1
\t\t\t\tShenzhen, Guangdong 518000
\t\t\t\tCN

AA-BB-CC   (hex)\t\tNational Security Agency
AABBCC     (base 16)\t\tNational Security Agency
\t\t\t\t9800 SAVAGE ROAD
\t\t\t\tFort Meade, MD 20755
\t\t\t\tUS

DE-AD-BE   (hex)\t\tDeutsche Beispiel GmbH
DEADBE     (base 16)\t\tDeutsche Beispiel GmbH
\t\t\t\tMusterstraße 1
\t\t\t\t12345 Musterstadt
\t\t\t\tDE
";

/// Write [`SAMPLE`] to `dir/oui.txt` and return its path.
pub fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("oui.txt");
    std::fs::write(&path, SAMPLE).unwrap();
    path
}
