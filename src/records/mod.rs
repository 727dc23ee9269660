//! Record types harvested from listing pages
//!
//! Two record variants exist, one per supported listing:
//!
//! - `ProjectRecord`: a branding/identity project entry
//! - `PaletteRecord`: a colour palette entry
//!
//! Both serialize with the camelCase field names used by the persisted
//! collections, and both implement `Keyed` so the merge step can decide
//! whether two records describe the same entity.

mod palette;
mod project;

pub use palette::PaletteRecord;
pub use project::{ProjectRecord, ProjectType};

/// A record with a uniqueness key
///
/// Two records with equal keys are the same real-world entity. The key must
/// depend only on extracted content so that re-extracting an unchanged block
/// always yields the same key.
pub trait Keyed {
    fn unique_key(&self) -> String;
}
