//! Product type DTOs.

use catalog_core::{ProductType, ProductTypeId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product type view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeResponse {
    #[schema(value_type = i64)]
    pub id: ProductTypeId,
    pub name: String,
    pub description: String,
}

impl From<ProductType> for ProductTypeResponse {
    fn from(product_type: ProductType) -> Self {
        Self {
            id: product_type.id,
            name: product_type.name,
            description: product_type.description,
        }
    }
}
