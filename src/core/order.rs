//! Order business logic - Handles all purchase-order operations.
//!
//! Provides functions for recording orders with their shade lists and for the
//! lookups the recap flow needs. All functions are async, take an injected
//! `DatabaseConnection`, and return Result types for error handling. Orders
//! are created once and never updated or deleted in place; re-adding the same
//! (customer, PO) pair fails as a duplicate.

use crate::{
    entities::{Order, Shade, order, shade},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use std::fmt;
use tracing::debug;

/// Input for one new purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Customer name; unique together with `po_number`
    pub customer_name: String,
    /// Purchase order number
    pub po_number: String,
    /// Fabric specification, free text
    pub required_fabric: String,
    /// Fabric weight (GSM), free text
    pub required_gsm: String,
    /// Yarn specification, free text
    pub yarn_detail: String,
    /// Fabric width, free text
    pub required_width: String,
    /// (shade name, required kg) pairs in entry order. Pairs with a blank
    /// name or a negative kg value are discarded before insert.
    pub shades: Vec<(String, i64)>,
}

/// One (customer, PO) pair as shown in the recap selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRef {
    /// Customer name
    pub customer_name: String,
    /// PO number
    pub po_number: String,
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - PO: {}", self.customer_name, self.po_number)
    }
}

/// Records a new order together with its shade list.
///
/// Shade pairs are filtered first: only entries with a non-empty trimmed name
/// and a non-negative kg requirement are kept, and at least one must survive.
/// The order row and its shade rows are inserted in a single database
/// transaction, so a failure leaves no partial order behind. A second order
/// with the same (customer, PO) pair is rejected with
/// [`Error::DuplicateOrder`]; the unique index on those columns makes the
/// rejection atomic even under concurrent inserts.
pub async fn add_order(db: &DatabaseConnection, new_order: NewOrder) -> Result<order::Model> {
    let customer = new_order.customer_name.trim().to_string();
    let po = new_order.po_number.trim().to_string();

    if customer.is_empty() || po.is_empty() {
        return Err(Error::InvalidOrder {
            message: "customer name and PO number are required".to_string(),
        });
    }

    // Keep only usable pairs: a named shade with a non-negative requirement.
    let shades: Vec<(String, i64)> = new_order
        .shades
        .into_iter()
        .filter_map(|(name, kg)| {
            let name = name.trim().to_string();
            (!name.is_empty() && kg >= 0).then_some((name, kg))
        })
        .collect();

    if shades.is_empty() {
        return Err(Error::InvalidOrder {
            message: "an order needs at least one shade with a non-negative requirement".to_string(),
        });
    }

    // Use a transaction so the order row and its shade rows land together
    let txn = db.begin().await?;

    if find_order(&txn, &customer, &po).await?.is_some() {
        return Err(Error::DuplicateOrder { customer, po });
    }

    let inserted = order::ActiveModel {
        customer_name: Set(customer.clone()),
        po_number: Set(po.clone()),
        required_fabric: Set(new_order.required_fabric),
        required_gsm: Set(new_order.required_gsm),
        yarn_detail: Set(new_order.yarn_detail),
        required_width: Set(new_order.required_width),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        // Storage-layer backstop for concurrent inserts of the same pair
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateOrder {
            customer: customer.clone(),
            po: po.clone(),
        },
        _ => Error::Database(e),
    })?;

    let mut position: i64 = 0;
    for (name, required_kg) in shades {
        shade::ActiveModel {
            order_id: Set(inserted.id),
            name: Set(name),
            required_kg: Set(required_kg),
            position: Set(position),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        position += 1;
    }

    txn.commit().await?;

    debug!(customer = %inserted.customer_name, po = %inserted.po_number, "order recorded");
    Ok(inserted)
}

/// Finds an order by its (customer, PO) pair, returning None if absent.
pub async fn get_order(
    db: &DatabaseConnection,
    customer: &str,
    po: &str,
) -> Result<Option<order::Model>> {
    find_order(db, customer, po).await
}

/// Returns one entry per recorded order, in insertion order.
///
/// Used to populate the recap flow's selection prompt; each entry displays as
/// `"<name> - PO: <po>"`.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderRef>> {
    let orders = Order::find()
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;

    Ok(orders
        .into_iter()
        .map(|o| OrderRef {
            customer_name: o.customer_name,
            po_number: o.po_number,
        })
        .collect())
}

/// Returns the shade rows of an order in their declared order.
///
/// Fails with [`Error::OrderNotFound`] when no order exists for the pair, so
/// the recap flow can tell "order missing" apart from "order without shades"
/// (which cannot be created through [`add_order`]).
pub async fn get_shades(
    db: &DatabaseConnection,
    customer: &str,
    po: &str,
) -> Result<Vec<shade::Model>> {
    let order = find_order(db, customer, po)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            customer: customer.to_string(),
            po: po.to_string(),
        })?;

    Shade::find()
        .filter(shade::Column::OrderId.eq(order.id))
        .order_by_asc(shade::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_order<C: ConnectionTrait>(
    db: &C,
    customer: &str,
    po: &str,
) -> Result<Option<order::Model>> {
    Order::find()
        .filter(order::Column::CustomerName.eq(customer))
        .filter(order::Column::PoNumber.eq(po))
        .one(db)
        .await
        .map_err(Into::into)
}
