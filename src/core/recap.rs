//! Recap business logic - Handles daily production recap entry and queries.
//!
//! Recap rows are append-only: each call to [`add_recap`] inserts exactly one
//! row, balances are computed at insert time from required and
//! received/processed quantities, and nothing ever updates or deletes a row
//! afterwards. Calling [`add_recap`] twice with identical input creates two
//! rows; the original paper process allowed the same, so no idempotence is
//! imposed here.

use crate::{
    core::order::get_shades,
    entities::{Recap, recap},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Input for one daily recap row.
///
/// Balances are not part of the input; they are derived at insert time as
/// required minus received/processed and may be negative (over-delivery or
/// over-processing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecapInput {
    /// Production date
    pub date: NaiveDate,
    /// Customer name of the parent order
    pub customer_name: String,
    /// PO number of the parent order
    pub po_number: String,
    /// Shade the recap applies to
    pub shade_name: String,
    /// Yarn bags required
    pub yarn_bags_required: i64,
    /// Yarn bags received so far
    pub yarn_bags_received: i64,
    /// Knitting quantity required
    pub knitting_required: i64,
    /// Knitting quantity processed
    pub knitting_processed: i64,
    /// Dyeing quantity required
    pub dyeing_required: i64,
    /// Dyeing quantity processed
    pub dyeing_processed: i64,
}

/// Builds a prefilled [`RecapInput`] for one shade of an order.
///
/// Yarn bags required defaults to the shade's declared kg requirement; every
/// other quantity starts at zero and is filled in by the operator. Fails with
/// [`Error::OrderNotFound`] when the (customer, PO) pair is unknown and
/// [`Error::ShadeNotFound`] when the order has no shade of that name.
pub async fn prefill_recap(
    db: &DatabaseConnection,
    customer: &str,
    po: &str,
    shade_name: &str,
    date: NaiveDate,
) -> Result<RecapInput> {
    let shades = get_shades(db, customer, po).await?;
    let shade = shades
        .iter()
        .find(|s| s.name == shade_name)
        .ok_or_else(|| Error::ShadeNotFound {
            customer: customer.to_string(),
            po: po.to_string(),
            shade: shade_name.to_string(),
        })?;

    Ok(RecapInput {
        date,
        customer_name: customer.to_string(),
        po_number: po.to_string(),
        shade_name: shade.name.clone(),
        yarn_bags_required: shade.required_kg,
        yarn_bags_received: 0,
        knitting_required: 0,
        knitting_processed: 0,
        dyeing_required: 0,
        dyeing_processed: 0,
    })
}

/// Appends one recap row, computing the three balances at insert time.
///
/// The insert is a single atomic statement; a failed write persists nothing.
/// The shade name is stored as given and is not checked against the parent
/// order's declared shades - [`prefill_recap`] is the guided path that does
/// validate, and recap history must remain writable even after the order
/// tables are rebuilt at startup.
pub async fn add_recap(db: &DatabaseConnection, input: RecapInput) -> Result<recap::Model> {
    let balance_yarn_bags = input.yarn_bags_required - input.yarn_bags_received;
    let balance_knitting = input.knitting_required - input.knitting_processed;
    let balance_dyeing = input.dyeing_required - input.dyeing_processed;

    let row = recap::ActiveModel {
        date: Set(input.date),
        customer_name: Set(input.customer_name),
        po_number: Set(input.po_number),
        shade_name: Set(input.shade_name),
        yarn_bags_required: Set(input.yarn_bags_required),
        yarn_bags_received: Set(input.yarn_bags_received),
        balance_yarn_bags: Set(balance_yarn_bags),
        knitting_required: Set(input.knitting_required),
        knitting_processed: Set(input.knitting_processed),
        balance_knitting: Set(balance_knitting),
        dyeing_required: Set(input.dyeing_required),
        dyeing_processed: Set(input.dyeing_processed),
        balance_dyeing: Set(balance_dyeing),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!(
        customer = %row.customer_name,
        po = %row.po_number,
        shade = %row.shade_name,
        date = %row.date,
        "recap recorded"
    );
    Ok(row)
}

/// Returns all recap rows whose date exactly matches the given date, in
/// insertion order. An exact match, not a range.
pub async fn recaps_for_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<recap::Model>> {
    Recap::find()
        .filter(recap::Column::Date.eq(date))
        .order_by_asc(recap::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::order;
    use crate::test_utils::{
        create_test_order, create_test_recap, date, sample_date, sample_recap_input, setup_test_db,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_balances_computed_at_insert() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = sample_recap_input("Acme", "PO-1", "Navy", sample_date());
        input.yarn_bags_required = 100;
        input.yarn_bags_received = 40;
        input.knitting_required = 80;
        input.knitting_processed = 30;
        input.dyeing_required = 60;
        input.dyeing_processed = 10;

        let row = add_recap(&db, input).await?;
        assert_eq!(row.balance_yarn_bags, 60);
        assert_eq!(row.balance_knitting, 50);
        assert_eq!(row.balance_dyeing, 50);

        Ok(())
    }

    #[tokio::test]
    async fn test_negative_balance_permitted() -> Result<()> {
        let db = setup_test_db().await?;

        // Over-delivery and over-processing are recorded as negatives.
        let mut input = sample_recap_input("Acme", "PO-1", "Navy", sample_date());
        input.yarn_bags_required = 10;
        input.yarn_bags_received = 25;
        input.knitting_required = 0;
        input.knitting_processed = 7;

        let row = add_recap(&db, input).await?;
        assert_eq!(row.balance_yarn_bags, -15);
        assert_eq!(row.balance_knitting, -7);

        Ok(())
    }

    #[tokio::test]
    async fn test_identical_inputs_create_two_rows() -> Result<()> {
        let db = setup_test_db().await?;

        let input = sample_recap_input("Acme", "PO-1", "Navy", sample_date());
        add_recap(&db, input.clone()).await?;
        add_recap(&db, input).await?;

        assert_eq!(recaps_for_date(&db, sample_date()).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_recaps_for_date_exact_match_only() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_recap(&db, "Acme", "PO-1", "Navy", date(2024, 1, 1)).await?;
        create_test_recap(&db, "Acme", "PO-1", "Red", date(2024, 1, 1)).await?;
        create_test_recap(&db, "Acme", "PO-1", "Navy", date(2024, 1, 2)).await?;

        let rows = recaps_for_date(&db, date(2024, 1, 1)).await?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.date == date(2024, 1, 1)));

        assert_eq!(recaps_for_date(&db, date(2024, 1, 3)).await?.len(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_prefill_uses_declared_requirement() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_order(&db, "Acme", "PO-1").await?;

        let input = prefill_recap(&db, "Acme", "PO-1", "Red", sample_date()).await?;
        assert_eq!(input.yarn_bags_required, 50);
        assert_eq!(input.yarn_bags_received, 0);
        assert_eq!(input.knitting_required, 0);
        assert_eq!(input.knitting_processed, 0);
        assert_eq!(input.dyeing_required, 0);
        assert_eq!(input.dyeing_processed, 0);
        assert_eq!(input.shade_name, "Red");

        Ok(())
    }

    #[tokio::test]
    async fn test_prefill_unknown_shade() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_order(&db, "Acme", "PO-1").await?;

        let result = prefill_recap(&db, "Acme", "PO-1", "Chartreuse", sample_date()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ShadeNotFound { shade, .. } if shade == "Chartreuse"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_prefill_missing_order() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<order::Model>::new()])
            .into_connection();

        let result = prefill_recap(&db, "Nobody", "PO-404", "Navy", sample_date()).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_recap_survives_without_parent_order() -> Result<()> {
        let db = setup_test_db().await?;

        // Advisory reference: a recap for an order that no longer exists
        // (or never did) still inserts.
        let input = sample_recap_input("Ghost Mills", "PO-0", "Navy", sample_date());
        let row = add_recap(&db, input).await?;
        assert_eq!(row.customer_name, "Ghost Mills");

        Ok(())
    }

    #[tokio::test]
    async fn test_recap_fields_persisted() -> Result<()> {
        let db = setup_test_db().await?;

        let inserted = create_test_recap(&db, "Acme", "PO-1", "Navy", sample_date()).await?;
        let fetched = recaps_for_date(&db, sample_date()).await?;

        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0], inserted);

        Ok(())
    }
}
