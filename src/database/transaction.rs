//! Transaction boundary
//!
//! Every multi-row change runs inside `run_in_transaction`: the closure gets a
//! transaction handle, the handle is committed when the closure succeeds and
//! rolled back on any error. A rollback failure is logged and the original
//! error is returned. Serialization failures and deadlocks reported by the
//! store are retried with a fresh transaction, up to the policy's limit.

use std::time::Duration;

use futures::future::BoxFuture;
use rand::Rng;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, warn};

use crate::utils::errors::AppResult;

pub type PgTransaction = Transaction<'static, Postgres>;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(10),
        }
    }

    /// Exponential backoff with up to one `base_delay` of jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.base_delay.saturating_mul(1u32 << attempt.min(6));
        let jitter_ms = rand::thread_rng().gen_range(0..=self.base_delay.as_millis() as u64);
        backoff + Duration::from_millis(jitter_ms)
    }
}

pub async fn run_in_transaction<T, F>(
    pool: &PgPool,
    policy: RetryPolicy,
    operation: &'static str,
    mut work: F,
) -> AppResult<T>
where
    T: Send,
    F: for<'c> FnMut(&'c mut PgTransaction) -> BoxFuture<'c, AppResult<T>> + Send,
{
    let mut attempt = 1;
    loop {
        match attempt_once(pool, &mut work).await {
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                warn!(operation, attempt, "retrying after store conflict: {}", err);
                tokio::time::sleep(policy.delay_for(attempt)).await;
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}

async fn attempt_once<T, F>(pool: &PgPool, work: &mut F) -> AppResult<T>
where
    T: Send,
    F: for<'c> FnMut(&'c mut PgTransaction) -> BoxFuture<'c, AppResult<T>> + Send,
{
    let mut tx = pool.begin().await?;

    match work(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!("rollback failed: {} (original error: {})", rollback_err, err);
            }
            Err(err)
        }
    }
}
