//! Menu item enrichment: a read-only projection of stored settings onto
//! the in-memory item before it reaches rendering or the admin editor.

use icon_model::{ItemId, ItemSettings, PartialSettings};
use menu_storage::{MetaStore, StorageError};

/// A navigation item as handed over by the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: ItemId,
    pub title: String,
}

/// A menu item with its settings resolved against the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMenuItem {
    pub id: ItemId,
    pub title: String,
    pub settings: ItemSettings,
}

/// Attaches merged settings to an item. Items without a stored record get
/// the canonical defaults; malformed stored records degrade field-by-field.
pub fn enrich(item: MenuItem, store: &MetaStore) -> Result<EnrichedMenuItem, StorageError> {
    let partial = match store.get(item.id)? {
        Some(stored) => PartialSettings::from_value(&stored),
        None => PartialSettings::default(),
    };

    Ok(EnrichedMenuItem {
        id: item.id,
        title: item.title,
        settings: ItemSettings::merge(partial),
    })
}
