//! Admin form controller: sanitizes submitted settings and decides
//! between storing and deleting the record.

use icon_model::{IconAlign, IconPosition, ItemId, ItemSettings};
use menu_storage::{MetaStore, StorageError};
use std::collections::HashMap;

/// Raw key/value pairs as submitted by the editor form.
pub type SubmittedFields = HashMap<String, String>;

/// Ordered save-time transforms applied to the sanitized record before
/// persistence. A filter may rewrite the record or reduce it to the
/// default record to veto the write.
#[derive(Default)]
pub struct SaveHooks {
    filters: Vec<Box<dyn Fn(ItemSettings, ItemId) -> ItemSettings + Send + Sync>>,
}

impl SaveHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        filter: impl Fn(ItemSettings, ItemId) -> ItemSettings + Send + Sync + 'static,
    ) {
        self.filters.push(Box::new(filter));
    }

    fn apply(&self, record: ItemSettings, item_id: ItemId) -> ItemSettings {
        self.filters.iter().fold(record, |record, filter| filter(record, item_id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The sanitized record reduced to the defaults, so the stored record
    /// was removed instead.
    Deleted,
}

/// Coerces each submitted field to its declared type.
///
/// Invalid values are replaced with the nearest valid one rather than
/// rejected: a failed parse falls back to the field's default, unknown
/// enum tokens fall back to the default variant, and free-text fields are
/// stripped of markup and control characters.
pub fn sanitize(fields: &SubmittedFields) -> ItemSettings {
    let defaults = ItemSettings::default();

    ItemSettings {
        label: fields.get("label").map(|value| int_flag(value)).unwrap_or(defaults.label),
        position: fields
            .get("position")
            .and_then(|value| IconPosition::from_token(value))
            .unwrap_or(defaults.position),
        align: fields
            .get("align")
            .and_then(|value| IconAlign::from_token(value))
            .unwrap_or(defaults.align),
        size: fields
            .get("size")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|size| *size > 0.0)
            .unwrap_or(defaults.size),
        icon: fields.get("icon").map(|value| plain_text(value)).unwrap_or(defaults.icon),
        color: fields.get("color").map(|value| plain_text(value)).unwrap_or(defaults.color),
    }
}

/// Integer-as-boolean: any nonzero integer is true, everything else false.
fn int_flag(value: &str) -> bool {
    value.trim().parse::<i64>().map(|flag| flag != 0).unwrap_or(false)
}

/// Strips tags and control characters and trims surrounding whitespace.
fn plain_text(value: &str) -> String {
    let mut text = String::with_capacity(value.len());
    let mut in_tag = false;

    for ch in value.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag || ch.is_control() => {}
            _ => text.push(ch),
        }
    }

    text.trim().to_owned()
}

/// Persists a form submission for one item.
///
/// The sanitized record runs through the save hooks; a record that equals
/// the defaults deletes the stored value instead of writing it.
pub fn save(
    store: &MetaStore,
    item_id: ItemId,
    submitted: &SubmittedFields,
    hooks: &SaveHooks,
) -> Result<SaveOutcome, StorageError> {
    let record = hooks.apply(sanitize(submitted), item_id);

    if record.is_empty() {
        store.delete(item_id)?;
        return Ok(SaveOutcome::Deleted);
    }

    store.set(item_id, serde_json::to_value(&record)?)?;
    Ok(SaveOutcome::Saved)
}
