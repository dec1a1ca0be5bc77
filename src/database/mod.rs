//! Database access
//!
//! Pool lifecycle, embedded migrations and the transaction boundary used by
//! every multi-row write.

pub mod connection;
pub mod transaction;

pub use connection::DatabaseConnection;
pub use transaction::{run_in_transaction, RetryPolicy};
