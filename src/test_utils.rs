//! Shared test utilities for the recap tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test orders and recaps with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{order, recap},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a `NewOrder` with sensible defaults.
///
/// # Defaults
/// * fabric: "Single Jersey", GSM: "180", yarn: "30s combed cotton",
///   width: "60in"
/// * shades: Navy 100 kg, Red 50 kg
pub fn sample_order(customer: &str, po: &str) -> order::NewOrder {
    order::NewOrder {
        customer_name: customer.to_string(),
        po_number: po.to_string(),
        required_fabric: "Single Jersey".to_string(),
        required_gsm: "180".to_string(),
        yarn_detail: "30s combed cotton".to_string(),
        required_width: "60in".to_string(),
        shades: vec![("Navy".to_string(), 100), ("Red".to_string(), 50)],
    }
}

/// Records a test order built from [`sample_order`].
pub async fn create_test_order(
    db: &DatabaseConnection,
    customer: &str,
    po: &str,
) -> Result<entities::order::Model> {
    order::add_order(db, sample_order(customer, po)).await
}

/// Builds a `RecapInput` with sensible defaults.
///
/// # Defaults
/// * yarn bags: 100 required / 40 received
/// * knitting: 80 required / 30 processed
/// * dyeing: 60 required / 10 processed
pub fn sample_recap_input(
    customer: &str,
    po: &str,
    shade: &str,
    on: NaiveDate,
) -> recap::RecapInput {
    recap::RecapInput {
        date: on,
        customer_name: customer.to_string(),
        po_number: po.to_string(),
        shade_name: shade.to_string(),
        yarn_bags_required: 100,
        yarn_bags_received: 40,
        knitting_required: 80,
        knitting_processed: 30,
        dyeing_required: 60,
        dyeing_processed: 10,
    }
}

/// Appends a test recap built from [`sample_recap_input`].
pub async fn create_test_recap(
    db: &DatabaseConnection,
    customer: &str,
    po: &str,
    shade: &str,
    on: NaiveDate,
) -> Result<entities::recap::Model> {
    recap::add_recap(db, sample_recap_input(customer, po, shade, on)).await
}

/// Shorthand for a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The date most tests record recaps on.
pub fn sample_date() -> NaiveDate {
    date(2024, 1, 1)
}
