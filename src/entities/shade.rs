//! Shade entity - One color variant of a parent order.
//!
//! Shades replace the comma-joined name/requirement text columns of earlier
//! schema revisions with a proper child table keyed by the generated order id.
//! `position` preserves entry order so shade lists read back in the order the
//! staff entered them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shade database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shades")]
pub struct Model {
    /// Unique identifier for the shade
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this shade belongs to
    pub order_id: i64,
    /// Shade name (e.g., "Navy")
    pub name: String,
    /// Required kilograms of yarn for this shade, non-negative
    pub required_kg: i64,
    /// Zero-based position within the order's shade list
    pub position: i64,
}

/// Defines relationships between Shade and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each shade belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
