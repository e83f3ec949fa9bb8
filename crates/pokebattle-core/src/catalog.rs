//! Creature catalog seam.

use crate::error::Result;
use crate::model::{CreatureDetail, CreatureIndex};
use std::sync::Arc;

/// Read-only source of creatures.
///
/// Implementations own their own timeouts; the engine never retries.
pub trait Catalog: Send + Sync {
    /// Fetch the full creature index in stable catalog order.
    fn fetch_index(&self) -> Result<CreatureIndex>;

    /// Fetch the attribute detail of one creature.
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) when the catalog
    /// has no creature by that name.
    fn fetch_detail(&self, name: &str) -> Result<CreatureDetail>;
}

impl<T: Catalog + ?Sized> Catalog for Arc<T> {
    fn fetch_index(&self) -> Result<CreatureIndex> {
        (**self).fetch_index()
    }

    fn fetch_detail(&self, name: &str) -> Result<CreatureDetail> {
        (**self).fetch_detail(name)
    }
}
