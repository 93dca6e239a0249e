//! The mask catalog.
//!
//! A catalog is read-only data injected into [`recommend`](crate::recommend).
//! It is validated once on construction: every band must be covered by at
//! least one mask, so recommendation never comes back empty.
//!
//! # Example
//!
//! ```
//! use airmask_core::{CatalogFilter, MaskCatalog};
//!
//! let catalog = MaskCatalog::builtin();
//! assert_eq!(catalog.len(), 7);
//!
//! let reusable: Vec<_> = catalog
//!     .search("", CatalogFilter::Reusable)
//!     .map(|m| m.id.as_str())
//!     .collect();
//! assert_eq!(reusable, ["Cloth", "Advanced Smart Mask"]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use airmask_types::{Band, CatalogIssue, Lifespan, MaskType};

use crate::error::{Error, Result};

/// Minimum protection for [`CatalogFilter::HighProtection`].
pub const HIGH_PROTECTION_PERCENT: u8 = 95;

/// Minimum comfort rating for [`CatalogFilter::Comfort`].
pub const COMFORTABLE_RATING: u8 = 4;

/// Browsing filter for [`MaskCatalog::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogFilter {
    #[default]
    All,
    /// Protection of at least 95%.
    HighProtection,
    /// Reusable, with or without replaceable filters.
    Reusable,
    /// Comfort rating of 4 or better.
    Comfort,
}

impl CatalogFilter {
    /// Whether `mask` passes this filter.
    pub fn accepts(self, mask: &MaskType) -> bool {
        match self {
            CatalogFilter::All => true,
            CatalogFilter::HighProtection => mask.protection_percent >= HIGH_PROTECTION_PERCENT,
            CatalogFilter::Reusable => mask.lifespan.is_reusable(),
            CatalogFilter::Comfort => mask.comfort >= COMFORTABLE_RATING,
        }
    }
}

impl fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CatalogFilter::All => "all",
            CatalogFilter::HighProtection => "high-protection",
            CatalogFilter::Reusable => "reusable",
            CatalogFilter::Comfort => "comfort",
        };
        f.write_str(s)
    }
}

impl FromStr for CatalogFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "all" => Ok(CatalogFilter::All),
            "high-protection" | "high" => Ok(CatalogFilter::HighProtection),
            "reusable" => Ok(CatalogFilter::Reusable),
            "comfort" => Ok(CatalogFilter::Comfort),
            other => Err(Error::invalid_input(format!(
                "unknown filter '{}' (expected all, high-protection, reusable or comfort)",
                other
            ))),
        }
    }
}

/// On-disk catalog layout: a TOML array of `[[mask]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "mask", default)]
    masks: Vec<MaskType>,
}

/// An ordered, read-only set of mask types.
///
/// Declaration order is significant: it is the final tie-break when ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskCatalog {
    masks: Vec<MaskType>,
}

impl MaskCatalog {
    /// Build a catalog, checking all of its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogIntegrity`] describing the first violated
    /// invariant.
    pub fn new(masks: Vec<MaskType>) -> Result<Self> {
        if let Err(issue) = validate(&masks) {
            tracing::warn!("Rejecting mask catalog: {}", issue);
            return Err(Error::CatalogIntegrity(issue));
        }
        Ok(Self { masks })
    }

    /// Build a catalog without validation.
    ///
    /// [`recommend`](crate::recommend) still guards against uncovered bands.
    pub fn from_unchecked(masks: Vec<MaskType>) -> Self {
        Self { masks }
    }

    /// Parse and validate a TOML catalog.
    ///
    /// ```
    /// use airmask_core::MaskCatalog;
    ///
    /// let toml = r#"
    /// [[mask]]
    /// id = "Everything"
    /// protection_percent = 90
    /// comfort = 3
    /// breathability = 3
    /// lifespan = "Reusable"
    /// recommended_bands = ["Good", "Moderate", "UnhealthySensitive",
    ///                      "Unhealthy", "VeryUnhealthy", "Hazardous"]
    /// "#;
    /// let catalog = MaskCatalog::from_toml_str(toml).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogFormat`] for malformed TOML and
    /// [`Error::CatalogIntegrity`] for a well-formed but invalid catalog.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(s)?;
        Self::new(file.masks)
    }

    /// Read a TOML catalog from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading mask catalog from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The seven built-in masks.
    pub fn builtin() -> Self {
        Self::from_unchecked(builtin_masks())
    }

    pub fn masks(&self) -> &[MaskType] {
        &self.masks
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Look up a mask by id, ignoring case.
    pub fn get(&self, id: &str) -> Option<&MaskType> {
        let id = id.trim();
        self.masks.iter().find(|m| m.id.eq_ignore_ascii_case(id))
    }

    /// Masks recommended for `band`, in declaration order.
    pub fn covering(&self, band: Band) -> impl Iterator<Item = &MaskType> {
        self.masks.iter().filter(move |m| m.covers(band))
    }

    /// Browse the catalog.
    ///
    /// `term` matches the id or any `best_for` entry as a case-insensitive
    /// substring; an empty term matches everything. Results keep
    /// declaration order.
    pub fn search<'a>(
        &'a self,
        term: &str,
        filter: CatalogFilter,
    ) -> impl Iterator<Item = &'a MaskType> + use<'a> {
        let term = term.trim().to_lowercase();
        self.masks
            .iter()
            .filter(move |m| filter.accepts(m) && matches_term(m, &term))
    }
}

impl Default for MaskCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn matches_term(mask: &MaskType, term: &str) -> bool {
    mask.id.to_lowercase().contains(term)
        || mask.best_for.iter().any(|b| b.to_lowercase().contains(term))
}

fn validate(masks: &[MaskType]) -> std::result::Result<(), CatalogIssue> {
    if masks.is_empty() {
        return Err(CatalogIssue::Empty);
    }

    let mut ids = HashSet::new();
    for mask in masks {
        if !ids.insert(mask.id.to_lowercase()) {
            return Err(CatalogIssue::DuplicateId(mask.id.clone()));
        }
        if mask.protection_percent > 100 {
            return Err(CatalogIssue::ProtectionOutOfRange {
                id: mask.id.clone(),
                value: mask.protection_percent,
            });
        }
        for (field, value) in [
            ("comfort", mask.comfort),
            ("breathability", mask.breathability),
        ] {
            if !(1..=5).contains(&value) {
                return Err(CatalogIssue::RatingOutOfRange {
                    id: mask.id.clone(),
                    field,
                    value,
                });
            }
        }
        if mask.recommended_bands.is_empty() {
            return Err(CatalogIssue::NoRecommendedBands(mask.id.clone()));
        }
    }

    match Band::ALL
        .into_iter()
        .find(|band| !masks.iter().any(|m| m.covers(*band)))
    {
        Some(band) => Err(CatalogIssue::UncoveredBand(band)),
        None => Ok(()),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_masks() -> Vec<MaskType> {
    vec![
        MaskType {
            id: "N95".into(),
            protection_percent: 95,
            comfort: 3,
            breathability: 2,
            lifespan: Lifespan::SingleUse,
            recommended_bands: vec![Band::Unhealthy, Band::VeryUnhealthy],
            unsuitable_for: strings(&["Exercise", "Children under 2"]),
            layers: 5,
            best_for: strings(&["Heavy Pollution", "PM2.5", "Industrial Areas"]),
            suitability: strings(&["Adults", "Healthcare Workers"]),
            description: "Filters at least 95% of airborne particles including PM2.5".into(),
            pros: strings(&["High filtration efficiency", "FDA approved", "Reliable seal"]),
            cons: strings(&["Single use only", "Can be uncomfortable", "More expensive"]),
        },
        MaskType {
            id: "N99".into(),
            protection_percent: 99,
            comfort: 2,
            breathability: 1,
            lifespan: Lifespan::SingleUse,
            recommended_bands: vec![Band::VeryUnhealthy, Band::Hazardous],
            unsuitable_for: strings(&["Long Duration", "Physical Activity"]),
            layers: 6,
            best_for: strings(&["Severe Pollution", "Hazardous AQI", "Chemical Exposure"]),
            suitability: strings(&["Adults", "High-Risk Areas"]),
            description: "Filters at least 99% of airborne particles, maximum protection".into(),
            pros: strings(&["Maximum protection", "Industrial grade", "Chemical resistant"]),
            cons: strings(&["Very expensive", "Hard to breathe", "Bulky design"]),
        },
        MaskType {
            id: "KN95".into(),
            protection_percent: 95,
            comfort: 4,
            breathability: 3,
            lifespan: Lifespan::SingleUse,
            recommended_bands: vec![Band::UnhealthySensitive, Band::Unhealthy],
            unsuitable_for: strings(&["Tight Fit Required", "Medical Settings"]),
            layers: 5,
            best_for: strings(&["Daily Commuting", "Moderate Pollution", "General Use"]),
            suitability: strings(&["Adults", "General Public"]),
            description: "Chinese standard equivalent to N95, good for general protection".into(),
            pros: strings(&["Good protection", "Comfortable fit", "Affordable"]),
            cons: strings(&["Ear loops may break", "Variable quality", "Not FDA approved"]),
        },
        MaskType {
            id: "Surgical".into(),
            protection_percent: 70,
            comfort: 5,
            breathability: 4,
            lifespan: Lifespan::SingleUse,
            recommended_bands: vec![Band::Moderate],
            unsuitable_for: strings(&["Heavy Pollution", "Fine Particles"]),
            layers: 3,
            best_for: strings(&["Light Pollution", "Droplet Protection", "Indoor Use"]),
            suitability: strings(&["All Ages", "Medical Settings"]),
            description: "Protects against droplets and large particles".into(),
            pros: strings(&["Very comfortable", "Easy to breathe", "Widely available"]),
            cons: strings(&["Limited protection", "Loose fit", "Single use only"]),
        },
        MaskType {
            id: "Cloth".into(),
            protection_percent: 40,
            comfort: 5,
            breathability: 5,
            lifespan: Lifespan::Reusable,
            recommended_bands: vec![Band::Good],
            unsuitable_for: strings(&["Pollution Above AQI 100", "Medical Protection"]),
            layers: 2,
            best_for: strings(&["Good Air Quality", "Indoor Use", "Fashion"]),
            suitability: strings(&["All Ages", "Daily Wear"]),
            description: "Basic protection, washable and eco-friendly".into(),
            pros: strings(&["Reusable", "Eco-friendly", "Customizable"]),
            cons: strings(&["Limited protection", "Needs regular washing", "Variable quality"]),
        },
        MaskType {
            id: "FFP2".into(),
            protection_percent: 94,
            comfort: 3,
            breathability: 2,
            lifespan: Lifespan::SingleUse,
            recommended_bands: vec![Band::UnhealthySensitive, Band::Unhealthy],
            unsuitable_for: strings(&["Facial Hair", "Children"]),
            layers: 4,
            best_for: strings(&["European Standard", "Workplace Safety", "Pollution"]),
            suitability: strings(&["Adults", "Professional Use"]),
            description: "European standard for respiratory protection".into(),
            pros: Vec::new(),
            cons: Vec::new(),
        },
        MaskType {
            id: "Advanced Smart Mask".into(),
            protection_percent: 98,
            comfort: 4,
            breathability: 4,
            lifespan: Lifespan::ReusableWithFilters,
            // Kept to the sensitive-groups band so N95-class masks lead at 151+
            recommended_bands: vec![Band::UnhealthySensitive],
            unsuitable_for: strings(&["Budget Constraints", "Simple Needs"]),
            layers: 6,
            best_for: strings(&["Tech-Savvy Users", "Long Duration", "Professional Use"]),
            suitability: strings(&["Adults", "Professional Use"]),
            description: "Smart mask with air filtration and breathing assistance".into(),
            pros: strings(&["Smart features", "High protection", "Comfortable for long use"]),
            cons: strings(&["Complex technology", "Requires maintenance", "Learning curve"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(id: &str, protection: u8, bands: &[Band]) -> MaskType {
        MaskType {
            id: id.into(),
            protection_percent: protection,
            comfort: 3,
            breathability: 3,
            lifespan: Lifespan::SingleUse,
            recommended_bands: bands.to_vec(),
            unsuitable_for: Vec::new(),
            layers: 1,
            best_for: Vec::new(),
            suitability: Vec::new(),
            description: String::new(),
            pros: Vec::new(),
            cons: Vec::new(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = MaskCatalog::new(builtin_masks()).unwrap();
        assert_eq!(catalog, MaskCatalog::builtin());
    }

    #[test]
    fn test_builtin_covers_every_band() {
        let catalog = MaskCatalog::builtin();
        for band in Band::ALL {
            assert!(catalog.covering(band).next().is_some(), "{:?} uncovered", band);
        }
    }

    #[test]
    fn test_builtin_declaration_order() {
        let ids: Vec<_> = MaskCatalog::builtin()
            .masks()
            .iter()
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(
            ids,
            ["N95", "N99", "KN95", "Surgical", "Cloth", "FFP2", "Advanced Smart Mask"]
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let err = MaskCatalog::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::CatalogIntegrity(CatalogIssue::Empty)));
    }

    #[test]
    fn test_uncovered_band_rejected() {
        let masks = vec![mask("A", 50, &[Band::Good, Band::Moderate])];
        let err = MaskCatalog::new(masks).unwrap_err();
        assert!(matches!(
            err,
            Error::CatalogIntegrity(CatalogIssue::UncoveredBand(Band::UnhealthySensitive))
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let masks = vec![mask("N95", 95, &Band::ALL), mask("n95", 90, &Band::ALL)];
        let err = MaskCatalog::new(masks).unwrap_err();
        assert!(matches!(
            err,
            Error::CatalogIntegrity(CatalogIssue::DuplicateId(ref id)) if id == "n95"
        ));
    }

    #[test]
    fn test_out_of_range_attributes_rejected() {
        let err = MaskCatalog::new(vec![mask("A", 101, &Band::ALL)]).unwrap_err();
        assert!(matches!(
            err,
            Error::CatalogIntegrity(CatalogIssue::ProtectionOutOfRange { value: 101, .. })
        ));

        let mut m = mask("A", 90, &Band::ALL);
        m.breathability = 0;
        let err = MaskCatalog::new(vec![m]).unwrap_err();
        assert!(matches!(
            err,
            Error::CatalogIntegrity(CatalogIssue::RatingOutOfRange {
                field: "breathability",
                value: 0,
                ..
            })
        ));

        let mut m = mask("A", 90, &Band::ALL);
        m.comfort = 6;
        assert!(MaskCatalog::new(vec![m]).is_err());
    }

    #[test]
    fn test_mask_without_bands_rejected() {
        let masks = vec![mask("A", 90, &Band::ALL), mask("B", 90, &[])];
        let err = MaskCatalog::new(masks).unwrap_err();
        assert!(matches!(
            err,
            Error::CatalogIntegrity(CatalogIssue::NoRecommendedBands(ref id)) if id == "B"
        ));
    }

    #[test]
    fn test_from_unchecked_skips_validation() {
        let catalog = MaskCatalog::from_unchecked(Vec::new());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let catalog = MaskCatalog::builtin();
        assert_eq!(catalog.get("kn95").unwrap().id, "KN95");
        assert_eq!(catalog.get(" advanced smart mask ").unwrap().protection_percent, 98);
        assert!(catalog.get("P100").is_none());
    }

    #[test]
    fn test_search_filters() {
        let catalog = MaskCatalog::builtin();
        let ids = |term: &str, filter| -> Vec<String> {
            catalog.search(term, filter).map(|m| m.id.clone()).collect()
        };

        assert_eq!(ids("", CatalogFilter::All).len(), 7);
        assert_eq!(
            ids("", CatalogFilter::HighProtection),
            ["N95", "N99", "KN95", "Advanced Smart Mask"]
        );
        assert_eq!(
            ids("", CatalogFilter::Comfort),
            ["KN95", "Surgical", "Cloth", "Advanced Smart Mask"]
        );
        // Term matches best_for entries too
        assert_eq!(ids("indoor", CatalogFilter::All), ["Surgical", "Cloth"]);
        assert_eq!(ids("N9", CatalogFilter::All), ["N95", "N99", "KN95"]);
        assert_eq!(ids("indoor", CatalogFilter::HighProtection), Vec::<String>::new());
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("all".parse::<CatalogFilter>().unwrap(), CatalogFilter::All);
        assert_eq!(
            "High_Protection".parse::<CatalogFilter>().unwrap(),
            CatalogFilter::HighProtection
        );
        assert_eq!("comfort".parse::<CatalogFilter>().unwrap(), CatalogFilter::Comfort);
        assert!("cheap".parse::<CatalogFilter>().is_err());
        assert_eq!(CatalogFilter::HighProtection.to_string(), "high-protection");
    }

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
            [[mask]]
            id = "Low"
            protection_percent = 60
            comfort = 5
            breathability = 5
            lifespan = "Reusable"
            recommended_bands = ["Good", "Moderate"]
            best_for = ["Walking"]

            [[mask]]
            id = "High"
            protection_percent = 99
            comfort = 2
            breathability = 2
            lifespan = "SingleUse"
            recommended_bands = ["UnhealthySensitive", "Unhealthy", "VeryUnhealthy", "Hazardous"]
            unsuitable_for = ["Exercise"]
        "#;
        let catalog = MaskCatalog::from_toml_str(toml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("high").unwrap().unsuitable_for, ["Exercise"]);
        assert!(catalog.get("low").unwrap().pros.is_empty());
    }

    #[test]
    fn test_from_toml_str_errors() {
        assert!(matches!(
            MaskCatalog::from_toml_str("[[mask]]\nid = 5"),
            Err(Error::CatalogFormat(_))
        ));
        assert!(matches!(
            MaskCatalog::from_toml_str(""),
            Err(Error::CatalogIntegrity(CatalogIssue::Empty))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("masks.toml");
        std::fs::write(
            &path,
            r#"
            [[mask]]
            id = "Only"
            protection_percent = 80
            comfort = 3
            breathability = 3
            lifespan = "ReusableWithFilters"
            recommended_bands = ["Good", "Moderate", "UnhealthySensitive", "Unhealthy", "VeryUnhealthy", "Hazardous"]
            "#,
        )
        .unwrap();
        let catalog = MaskCatalog::load(&path).unwrap();
        assert_eq!(catalog.masks()[0].lifespan, Lifespan::ReusableWithFilters);

        let missing = MaskCatalog::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }
}
