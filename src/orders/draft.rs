//! Client-side draft of a pending order.

use serde::Serialize;

use crate::models::order::{ItemId, OrderLine, OrderRequest};
use crate::{AppError, Result};

/// Requested quantity per catalog item, in first-insertion order.
///
/// Overwriting an item keeps its position. Zero and negative quantities are
/// kept so the entry can still be displayed; [`build_request`] drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftOrder {
    entries: Vec<(ItemId, i64)>,
}

impl DraftOrder {
    /// Empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested quantity of `item_id`, replacing any previous value.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: i64) {
        match self.entries.iter_mut().find(|(id, _)| *id == item_id) {
            Some(entry) => entry.1 = quantity,
            None => self.entries.push((item_id, quantity)),
        }
    }

    /// Quantity shown for `item_id`; absent entries read as zero.
    #[must_use]
    pub fn quantity(&self, item_id: ItemId) -> i64 {
        self.entries
            .iter()
            .find(|(id, _)| *id == item_id)
            .map_or(0, |(_, quantity)| *quantity)
    }

    /// All entries, including non-positive ones.
    #[must_use]
    pub fn entries(&self) -> &[(ItemId, i64)] {
        &self.entries
    }

    /// True when nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(ItemId, i64)> for DraftOrder {
    fn from_iter<I: IntoIterator<Item = (ItemId, i64)>>(iter: I) -> Self {
        let mut draft = Self::new();
        for (item_id, quantity) in iter {
            draft.set_quantity(item_id, quantity);
        }
        draft
    }
}

/// Turn a draft into the submitted payload: positive quantities only, in
/// draft order.
#[must_use]
pub fn build_request(draft: &DraftOrder) -> OrderRequest {
    OrderRequest {
        items: draft
            .entries
            .iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|&(item_id, quantity)| OrderLine { item_id, quantity })
            .collect(),
    }
}

/// Parse one `ITEM=QUANTITY` draft entry as typed on the command line.
///
/// Zero is accepted and drops the item from the submitted order; negative
/// quantities are refused.
///
/// # Errors
///
/// Returns `AppError::Validation` for a missing `=`, a non-numeric side, or
/// a negative quantity.
pub fn parse_line(raw: &str) -> Result<(ItemId, i64)> {
    let (item, quantity) = raw
        .split_once('=')
        .ok_or_else(|| AppError::Validation(format!("expected ITEM=QUANTITY, got '{raw}'")))?;
    let item = item
        .trim()
        .parse::<ItemId>()
        .map_err(|err| AppError::Validation(format!("invalid item id '{item}': {err}")))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|err| AppError::Validation(format!("invalid quantity '{quantity}': {err}")))?;
    if quantity < 0 {
        return Err(AppError::Validation(format!(
            "quantity for item {item} must not be negative"
        )));
    }
    Ok((item, quantity))
}
