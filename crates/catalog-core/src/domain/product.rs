//! Product entity and its lifecycle state machine.

use crate::{CatalogError, CatalogResult, ProductId, ProductTypeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit user recorded on rows written by the catalog.
pub const SYSTEM_USER: &str = "omni";

/// A financial product (card, credit, deposit).
///
/// The persisted shape keeps `open_date` and `close_date` as optional
/// timestamps; transition logic goes through [`ProductLifecycle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the store on first save.
    pub id: Option<ProductId>,
    pub name: String,
    /// Immutable after creation.
    pub product_type_id: ProductTypeId,
    pub description: String,
    pub open_date: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
    pub create_time: DateTime<Utc>,
    pub create_user: String,
    pub last_modify_time: DateTime<Utc>,
    pub last_modify_user: String,
}

impl Product {
    /// Creates an unsaved product stamped at `now`, opened immediately when `open` is set.
    #[must_use]
    pub fn new(
        name: String,
        product_type_id: ProductTypeId,
        description: String,
        open: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            name,
            product_type_id,
            description,
            open_date: open.then_some(now),
            close_date: None,
            create_time: now,
            create_user: SYSTEM_USER.to_string(),
            last_modify_time: now,
            last_modify_user: SYSTEM_USER.to_string(),
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> ProductLifecycle {
        ProductLifecycle::from_dates(self.open_date, self.close_date)
    }

    /// Applies an open (`true`) or close (`false`) intent at `now`.
    ///
    /// Dates are only written when the state actually changes.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` when asked to reopen a closed product.
    pub fn apply_open_intent(&mut self, open: bool, now: DateTime<Utc>) -> CatalogResult<()> {
        let current = self.lifecycle();
        let next = current.transition(open, now)?;
        if next != current {
            let (open_date, close_date) = next.dates();
            self.open_date = open_date;
            self.close_date = close_date;
        }
        Ok(())
    }

    /// Stamps the modification audit fields.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modify_time = now;
        self.last_modify_user = SYSTEM_USER.to_string();
    }
}

/// Lifecycle state of a product: `Unopened` -> `Open` -> `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductLifecycle {
    Unopened,
    Open {
        since: DateTime<Utc>,
    },
    Closed {
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}

impl ProductLifecycle {
    /// Derives the state from persisted dates.
    ///
    /// A row with a close date but no open date is treated as closed on that
    /// date; closed stays terminal.
    #[must_use]
    pub fn from_dates(open_date: Option<DateTime<Utc>>, close_date: Option<DateTime<Utc>>) -> Self {
        match (open_date, close_date) {
            (None, None) => Self::Unopened,
            (Some(since), None) => Self::Open { since },
            (Some(since), Some(until)) => Self::Closed { since, until },
            (None, Some(until)) => Self::Closed { since: until, until },
        }
    }

    /// Returns `(open_date, close_date)` for persistence.
    #[must_use]
    pub const fn dates(self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self {
            Self::Unopened => (None, None),
            Self::Open { since } => (Some(since), None),
            Self::Closed { since, until } => (Some(since), Some(until)),
        }
    }

    /// Next state for an open/close intent.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest("Product is already closed")` for an open intent on
    /// a closed product.
    pub fn transition(self, open: bool, now: DateTime<Utc>) -> CatalogResult<Self> {
        match (self, open) {
            (Self::Unopened, true) => Ok(Self::Open { since: now }),
            (Self::Open { since }, false) => Ok(Self::Closed { since, until: now }),
            (Self::Closed { .. }, true) => Err(CatalogError::bad_request("Product is already closed")),
            (Self::Unopened, false) | (Self::Open { .. }, true) | (Self::Closed { .. }, false) => Ok(self),
        }
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}
