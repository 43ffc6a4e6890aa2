//! Database configuration module for the recap tracker.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the database schema always
//! matches the Rust entity definitions without manual SQL.
//!
//! One deliberate asymmetry, inherited from the system this replaces: the order
//! tables (`orders` and its `shades` child table) are dropped and rebuilt on
//! every startup, so orders only live for one run; `daily_recaps` is created
//! with IF NOT EXISTS and its history persists across runs.

use crate::entities::{Order, Recap, Shade, order};
use crate::errors::Result;
use sea_orm::sea_query::{Index, Table};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, Schema};
use tracing::{debug, info};

/// Gets the database URL from the environment or returns the default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a working-directory-relative `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://mill_recap.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database named by [`get_database_url`].
///
/// The connection is handed to each repository operation explicitly; nothing in
/// this crate holds a global handle, so tests can pass isolated in-memory
/// databases instead.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at: {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the database tables, rebuilding the order tables from scratch.
///
/// `shades` and `orders` are dropped (child first) and recreated on every call,
/// destroying all existing order data; `daily_recaps` is only created when
/// absent so recap history survives. A unique index on
/// (`customer_name`, `po_number`) backs the duplicate-order check at the
/// storage layer.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Child table goes first so no shade row ever outlives its order.
    let drop_shades = Table::drop().table(Shade.table_ref()).if_exists().to_owned();
    let drop_orders = Table::drop().table(Order.table_ref()).if_exists().to_owned();
    db.execute(builder.build(&drop_shades)).await?;
    db.execute(builder.build(&drop_orders)).await?;

    let order_table = schema.create_table_from_entity(Order);
    let shade_table = schema.create_table_from_entity(Shade);
    let mut recap_table = schema.create_table_from_entity(Recap);
    recap_table.if_not_exists();

    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&shade_table)).await?;
    db.execute(builder.build(&recap_table)).await?;

    let customer_po_unique = Index::create()
        .name("idx_orders_customer_po")
        .table(Order.table_ref())
        .col(order::Column::CustomerName)
        .col(order::Column::PoNumber)
        .unique()
        .to_owned();
    db.execute(builder.build(&customer_po_unique)).await?;

    info!("Schema ready: order tables rebuilt, recap history preserved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        order::Model as OrderModel, recap::Model as RecapModel, shade::Model as ShadeModel,
    };
    use crate::test_utils::{create_test_order, create_test_recap, sample_date};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<ShadeModel> = Shade::find().limit(1).all(&db).await?;
        let _: Vec<RecapModel> = Recap::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_destroyed_on_schema_refresh() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_test_order(&db, "Acme", "PO-1").await?;

        assert_eq!(Order::find().all(&db).await?.len(), 1);
        assert!(!Shade::find().all(&db).await?.is_empty());

        // A second startup wipes orders and their shades.
        create_tables(&db).await?;
        assert!(Order::find().all(&db).await?.is_empty());
        assert!(Shade::find().all(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_recaps_survive_schema_refresh() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_test_order(&db, "Acme", "PO-1").await?;
        create_test_recap(&db, "Acme", "PO-1", "Navy", sample_date()).await?;

        create_tables(&db).await?;

        let recaps: Vec<RecapModel> = Recap::find().all(&db).await?;
        assert_eq!(recaps.len(), 1);
        assert_eq!(recaps[0].shade_name, "Navy");

        Ok(())
    }
}
