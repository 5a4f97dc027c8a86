//! Product DTOs.

use catalog_core::{rules::not_blank, CatalogError, Product, ProductId, ProductTypeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProductRequest {
    #[validate(length(min = 3, max = 128, message = "Name must be 3-128 characters"))]
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: String,

    #[schema(value_type = i64, example = 1)]
    pub product_type_id: ProductTypeId,

    #[validate(length(min = 3, max = 256, message = "Description must be 3-256 characters"))]
    #[validate(custom(function = "not_blank", message = "Description must not be blank"))]
    pub description: String,

    /// Open the product immediately.
    #[serde(default)]
    pub open: bool,
}

/// Partial update of a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 3, max = 128, message = "Name must be 3-128 characters"))]
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: Option<String>,

    #[validate(length(min = 3, max = 256, message = "Description must be 3-256 characters"))]
    #[validate(custom(function = "not_blank", message = "Description must not be blank"))]
    pub description: Option<String>,

    /// `true` opens an unopened product, `false` closes an open one.
    pub open: Option<bool>,
}

/// Product view returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(value_type = i64)]
    pub id: ProductId,
    pub name: String,
    #[schema(value_type = i64)]
    pub product_type_id: ProductTypeId,
    pub description: String,
    pub open_date: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
}

impl TryFrom<Product> for ProductResponse {
    type Error = CatalogError;

    /// Only stored products, which carry an id, have a view.
    fn try_from(product: Product) -> Result<Self, Self::Error> {
        let id = product
            .id
            .ok_or_else(|| CatalogError::internal("Stored product has no id"))?;

        Ok(Self {
            id,
            name: product.name,
            product_type_id: product.product_type_id,
            description: product.description,
            open_date: product.open_date,
            close_date: product.close_date,
        })
    }
}
