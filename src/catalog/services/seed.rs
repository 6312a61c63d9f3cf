//! Default catalog contents for a fresh installation.

use serde::{Deserialize, Serialize};

/// Section entry of a [`SeedPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSection {
    /// External code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Technician entry of a [`SeedPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTechnician {
    /// Display name.
    pub name: String,
    /// Optional role label.
    #[serde(default)]
    pub role: Option<String>,
}

/// Catalog rows registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPlan {
    /// Sections to register by code.
    #[serde(default)]
    pub sections: Vec<SeedSection>,
    /// Technicians to add when no one with the same name exists.
    #[serde(default)]
    pub technicians: Vec<SeedTechnician>,
}

/// Counts of rows created by [`super::CatalogService::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Sections inserted.
    pub sections_added: usize,
    /// Technicians inserted.
    pub technicians_added: usize,
}

const DEFAULT_LINE: [(&str, &str, &str); 9] = [
    ("DUMPER", "Bin dumper", "Fruit bin dumper"),
    ("ELEVATOR", "Fruit elevator", "Elevator from the dumper to accumulation"),
    ("ACCUMULATION", "Accumulation", "Fruit accumulation bed"),
    ("SINGULATION", "Singulation", "Fruit singulator"),
    ("ACCELERATION", "Acceleration", "Acceleration module"),
    ("TECHMODULE", "Tech module", "Camera, LEDs and computer (optical module)"),
    ("SELECTIONMODULE", "Selection module", "Selection module and ejectors"),
    ("CHAINS", "Chains and rollers", "Chains, rollers and drive train"),
    ("PANELS", "Electrical panels", "Electrical panels and components"),
];

const DEFAULT_CREW: [(&str, &str); 3] = [
    ("Walker", "Technician"),
    ("Jose", "Technician"),
    ("Ignacio", "Line lead"),
];

impl SeedPlan {
    /// Returns the sections of a standard fruit-sorting line and its
    /// starting crew.
    #[must_use]
    pub fn default_line() -> Self {
        Self {
            sections: DEFAULT_LINE
                .iter()
                .map(|(code, name, description)| SeedSection {
                    code: (*code).to_owned(),
                    name: (*name).to_owned(),
                    description: (*description).to_owned(),
                })
                .collect(),
            technicians: DEFAULT_CREW
                .iter()
                .map(|(name, role)| SeedTechnician {
                    name: (*name).to_owned(),
                    role: Some((*role).to_owned()),
                })
                .collect(),
        }
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::default_line()
    }
}
