//! Listing response types

use serde::{Deserialize, Serialize};

/// Offset-paged listing as returned by the admin endpoints
///
/// ```json
/// { "items": [ ... ], "total": 42 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Whether more rows exist after `skip + items.len()`
    pub fn has_more(&self, skip: u32) -> bool {
        (skip as u64 + self.items.len() as u64) < self.total
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
