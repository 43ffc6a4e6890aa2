//! Daily recap entity - One dated production progress record for one shade.
//!
//! Recaps reference their parent order by (`customer_name`, `po_number`) as
//! plain text rather than a foreign key: the orders table is rebuilt on every
//! startup while recap history persists, so a hard reference cannot hold.
//! Rows are append-only; the three balance columns are fixed at insert time
//! and never recomputed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily recap database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_recaps")]
pub struct Model {
    /// Unique identifier for the recap row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Production date this recap records progress for
    pub date: Date,
    /// Customer name of the parent order
    pub customer_name: String,
    /// PO number of the parent order
    pub po_number: String,
    /// Shade this recap applies to
    pub shade_name: String,
    /// Yarn bags required for the shade
    pub yarn_bags_required: i64,
    /// Yarn bags received so far
    pub yarn_bags_received: i64,
    /// `yarn_bags_required - yarn_bags_received`; negative on over-delivery
    pub balance_yarn_bags: i64,
    /// Knitting quantity required
    pub knitting_required: i64,
    /// Knitting quantity processed
    pub knitting_processed: i64,
    /// `knitting_required - knitting_processed`
    pub balance_knitting: i64,
    /// Dyeing quantity required
    pub dyeing_required: i64,
    /// Dyeing quantity processed
    pub dyeing_processed: i64,
    /// `dyeing_required - dyeing_processed`
    pub balance_dyeing: i64,
}

/// Recaps reference orders advisorily, so no relations are defined
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
