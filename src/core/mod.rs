/// Order repository - order entry, listing, and shade lookups
pub mod order;

/// Recap repository - daily production recap entry and queries
pub mod recap;

/// Report builder - PDF rendering of one day's recap rows
pub mod report;
