//! Mask recommendation.
//!
//! Recommendation is a pure function of a tier, a catalog and optional user
//! constraints:
//!
//! 1. Keep the masks whose recommended bands include the tier's band.
//! 2. Rank by protection (descending), then comfort (descending), then
//!    catalog declaration order.
//! 3. The first mask is the primary, the rest are alternatives.
//! 4. With constraints, annotate matching contra-indications as warnings.
//!    Warnings never remove a mask.
//!
//! Because protection is the first sort key, the most protective mask always
//! leads at `Hazardous` regardless of comfort.
//!
//! # Example
//!
//! ```
//! use airmask_core::{MaskCatalog, classify, recommend};
//! use airmask_types::UserConstraints;
//!
//! let catalog = MaskCatalog::builtin();
//! let constraints = UserConstraints::new(Some("Exercise".into()), None);
//! let rec = recommend(classify(175), &catalog, Some(&constraints)).unwrap();
//!
//! assert_eq!(rec.primary.id, "KN95");
//! assert!(rec.warnings.iter().any(|w| w.mask_id == "N95"));
//! ```

use std::cmp::Reverse;

use airmask_types::{AqiTier, CatalogIssue, MaskType, MaskWarning, Recommendation, UserConstraints};

use crate::catalog::MaskCatalog;
use crate::error::{Error, Result};

/// Recommend masks for a tier.
///
/// # Errors
///
/// Returns [`Error::CatalogIntegrity`] when no mask in `catalog` covers the
/// tier's band. This cannot happen with a catalog built by
/// [`MaskCatalog::new`].
pub fn recommend(
    tier: AqiTier,
    catalog: &MaskCatalog,
    constraints: Option<&UserConstraints>,
) -> Result<Recommendation> {
    let mut ranked: Vec<&MaskType> = catalog.covering(tier.band).collect();
    // Stable: equal keys keep declaration order
    ranked.sort_by_key(|m| (Reverse(m.protection_percent), Reverse(m.comfort)));

    let mut ranked = ranked.into_iter().cloned();
    let Some(primary) = ranked.next() else {
        tracing::warn!("No mask in the catalog covers {:?}", tier.band);
        return Err(Error::CatalogIntegrity(CatalogIssue::UncoveredBand(
            tier.band,
        )));
    };
    let alternatives: Vec<MaskType> = ranked.collect();

    let warnings = match constraints {
        Some(c) if !c.is_empty() => {
            let masks = std::iter::once(&primary).chain(alternatives.iter());
            collect_warnings(masks, c)
        }
        _ => Vec::new(),
    };

    tracing::debug!(
        "Recommended {} for {:?} with {} alternative(s) and {} warning(s)",
        primary.id,
        tier.band,
        alternatives.len(),
        warnings.len()
    );

    Ok(Recommendation {
        band: tier.band,
        primary,
        alternatives,
        warnings,
    })
}

/// Whether a contra-indication textually matches a constraint value.
///
/// Case-insensitive substring match in either direction, so "Children"
/// matches "Children under 2" and "Running exercise" matches "Exercise".
pub fn matches_constraint(contraindication: &str, constraint: &str) -> bool {
    let a = contraindication.trim().to_lowercase();
    let b = constraint.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

fn collect_warnings<'a>(
    masks: impl Iterator<Item = &'a MaskType>,
    constraints: &UserConstraints,
) -> Vec<MaskWarning> {
    let mut warnings = Vec::new();
    for mask in masks {
        for contraindication in &mask.unsuitable_for {
            for value in constraints.values() {
                if matches_constraint(contraindication, value) {
                    warnings.push(MaskWarning {
                        mask_id: mask.id.clone(),
                        contraindication: contraindication.clone(),
                        constraint: value.to_string(),
                    });
                }
            }
        }
    }
    warnings
}
