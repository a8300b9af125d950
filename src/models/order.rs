//! Order request and order snapshot types.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Catalog item identifier as used in draft orders.
pub type ItemId = i64;

/// One positive-quantity line of a submitted order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Ordered item.
    pub item_id: ItemId,
    /// Requested quantity; always greater than zero.
    pub quantity: i64,
}

/// Payload for `POST /orders/add`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Lines in draft insertion order.
    pub items: Vec<OrderLine>,
}

impl OrderRequest {
    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no line survived filtering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A previously accepted order as listed by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned identifier.
    pub id: i64,
    /// When the server accepted the order.
    pub ordered_date_time: OrderTimestamp,
    /// Order total.
    pub total_price: f64,
}

/// Acceptance time as sent by the server.
///
/// The backend's format is not pinned down: offset-qualified RFC 3339 and
/// bare local timestamps both occur. Anything else is kept verbatim so one
/// odd value never fails a whole order listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderTimestamp {
    /// Timestamp carrying a UTC offset, e.g. `2024-05-01T10:15:30Z`.
    Zoned(DateTime<FixedOffset>),
    /// Timestamp without an offset, e.g. `2024-05-01T10:15:30`.
    Local(NaiveDateTime),
    /// Unrecognised text.
    Raw(String),
}

impl OrderTimestamp {
    /// Wall-clock time as written by the server, if it could be parsed.
    #[must_use]
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Zoned(at) => Some(at.naive_local()),
            Self::Local(at) => Some(*at),
            Self::Raw(_) => None,
        }
    }
}

impl From<NaiveDateTime> for OrderTimestamp {
    fn from(at: NaiveDateTime) -> Self {
        Self::Local(at)
    }
}

impl Display for OrderTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zoned(at) => write!(f, "{at}"),
            Self::Local(at) => write!(f, "{at}"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}
