//! Shared fixtures for the elcheck integration scenarios.

use elcheck_env::{BeanModel, BeanType};
use elcheck_type::ElType;

#[cfg(test)]
mod scenarios;

/// A small shop domain: orders with untyped item lists, typed line arrays and users.
pub fn shop_model() -> BeanModel {
    BeanModel::new()
        .with_variable("order", ElType::bean("Order"))
        .with_variable("user", ElType::bean("User"))
        .with_variable("legacy", ElType::bean("LegacyBean"))
        .with_type(
            "Order",
            BeanType::new()
                .with_property("items", ElType::List)
                .with_property("lines", ElType::array_of(ElType::bean("LineItem")))
                .with_property("attributes", ElType::Map)
                .with_property("payload", ElType::Unknown)
                .with_property("customer", ElType::bean("User")),
        )
        .with_type(
            "LineItem",
            BeanType::new()
                .with_property("price", ElType::Double)
                .with_property("quantity", ElType::Int)
                .with_property("sku", ElType::String),
        )
        .with_type(
            "User",
            BeanType::new()
                .with_property("name", ElType::String)
                .with_property("secretToken", ElType::String)
                .with_property("roles", ElType::array_of(ElType::String)),
        )
}
