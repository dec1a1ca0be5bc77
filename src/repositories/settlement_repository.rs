use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Settlement, SettlementMethod, SettlementStatus};
use crate::utils::errors::AppResult;

pub struct SettlementRepository {
    pool: PgPool,
}

impl SettlementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_rental(&self, rental_id: Uuid) -> AppResult<Option<Settlement>> {
        let settlement = sqlx::query_as::<_, Settlement>(
            "SELECT id, rental_id, amount, method, status, created_at FROM settlements WHERE rental_id = $1",
        )
        .bind(rental_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settlement)
    }

    /// `settlements.rental_id` is unique; a second insert for the same rental
    /// fails instead of duplicating the payment.
    pub async fn insert(
        conn: &mut PgConnection,
        rental_id: Uuid,
        amount: Decimal,
        method: SettlementMethod,
    ) -> AppResult<Settlement> {
        let settlement = sqlx::query_as::<_, Settlement>(
            r#"
            INSERT INTO settlements (id, rental_id, amount, method, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, rental_id, amount, method, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rental_id)
        .bind(amount)
        .bind(method)
        .bind(SettlementStatus::Completed)
        .fetch_one(conn)
        .await?;

        Ok(settlement)
    }
}
