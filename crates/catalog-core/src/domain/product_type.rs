//! Product type entity.

use crate::ProductTypeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only reference data classifying products (`card`, `credit`, `deposit`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: ProductTypeId,
    pub name: String,
    pub description: String,
    pub create_time: DateTime<Utc>,
    pub create_user: String,
    pub last_modify_time: DateTime<Utc>,
    pub last_modify_user: String,
}
