//! Cache key generators for consistent key naming.

use catalog_core::{ProductId, ProductTypeId};

/// Key of a single product.
#[must_use]
pub fn product_by_id(id: ProductId) -> String {
    format!("product:id:{}", id)
}

/// Key of the unfiltered product list.
#[must_use]
pub fn all_products() -> String {
    "products:all".to_string()
}

/// Key of the product list filtered by type name.
#[must_use]
pub fn products_by_type(type_name: &str) -> String {
    format!("products:type:{}", type_name)
}

/// Key of a product type by ID.
#[must_use]
pub fn product_type_by_id(id: ProductTypeId) -> String {
    format!("product_type:id:{}", id)
}

/// Key of a product type by name.
#[must_use]
pub fn product_type_by_name(name: &str) -> String {
    format!("product_type:name:{}", name)
}

/// Key of the full product type list.
#[must_use]
pub fn all_product_types() -> String {
    "product_types:all".to_string()
}
