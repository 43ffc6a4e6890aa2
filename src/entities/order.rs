//! Order entity - Represents one customer purchase order.
//!
//! Each order is identified by its (`customer_name`, `po_number`) pair, which
//! is unique across the table. The fabric specification fields are stored as
//! free text exactly as entered. Per-shade requirements live in the `shades`
//! child table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer name; unique together with `po_number`
    pub customer_name: String,
    /// Purchase order number; unique together with `customer_name`
    pub po_number: String,
    /// Fabric specification (e.g., "Single Jersey")
    pub required_fabric: String,
    /// Fabric weight in grams per square meter, stored as free text
    pub required_gsm: String,
    /// Yarn specification (e.g., "30s combed cotton")
    pub yarn_detail: String,
    /// Fabric width specification (e.g., "60in")
    pub required_width: String,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many shades
    #[sea_orm(has_many = "super::shade::Entity")]
    Shades,
}

impl Related<super::shade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
