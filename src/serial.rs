//! Layout document export and import.
//!
//! The document is a JSON array of [`Item`]s; the in-memory shape is the wire
//! format. Import is all-or-nothing: a document that fails to parse leaves the
//! caller's state untouched.

#[cfg(test)]
#[path = "serial_test.rs"]
mod serial_test;

use std::collections::HashSet;

use crate::consts::Z_LIMIT;
use crate::doc::{Item, ItemId};
use crate::layout::Size;

/// Error returned by [`import_layout`].
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The text is not a JSON array of items.
    #[error("layout is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two items share an id.
    #[error("layout contains duplicate item id {0}")]
    DuplicateId(ItemId),
    /// An item's z lies outside `±Z_LIMIT`.
    #[error("item {id} has out-of-range z {z}")]
    ZOutOfRange { id: ItemId, z: i64 },
}

/// Error reported by a [`Clipboard`] implementation.
#[derive(Debug, thiserror::Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Destination for an exported layout document.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] when the platform refuses or lacks access.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Serialize a layout to its JSON document.
///
/// # Errors
///
/// Returns the underlying `serde_json` error.
pub fn export_layout(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(items)
}

/// Parse a layout document and normalize every item into `room`.
///
/// Scales are forced into range and positions re-clamped, so a document
/// exported from this crate comes back unchanged.
///
/// # Errors
///
/// Returns [`ImportError::Parse`] when the text is not a JSON array of items,
/// [`ImportError::DuplicateId`] when two items share an id, and
/// [`ImportError::ZOutOfRange`] when a z magnitude exceeds [`Z_LIMIT`].
pub fn import_layout(text: &str, room: Size) -> Result<Vec<Item>, ImportError> {
    let items: Vec<Item> = serde_json::from_str(text)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id) {
            return Err(ImportError::DuplicateId(item.id));
        }
        if item.z.unsigned_abs() > Z_LIMIT.unsigned_abs() {
            return Err(ImportError::ZOutOfRange { id: item.id, z: item.z });
        }
    }

    Ok(items.into_iter().map(|item| item.normalized(room)).collect())
}
