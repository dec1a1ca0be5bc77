//! Settlement (payment record) model
//!
//! One settlement is synthesized per completed rental. Nothing is charged
//! through a payment gateway.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "settlement_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    CreditCard,
    DebitCard,
    Cash,
}

impl Default for SettlementMethod {
    fn default() -> Self {
        SettlementMethod::CreditCard
    }
}

impl fmt::Display for SettlementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SettlementMethod::CreditCard => "credit_card",
            SettlementMethod::DebitCard => "debit_card",
            SettlementMethod::Cash => "cash",
        };
        f.write_str(s)
    }
}

impl FromStr for SettlementMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "credit_card" => Ok(SettlementMethod::CreditCard),
            "debit_card" => Ok(SettlementMethod::DebitCard),
            "cash" => Ok(SettlementMethod::Cash),
            other => Err(format!("unknown settlement method '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "settlement_status", rename_all = "lowercase")]
#[serde(rename_all = "PascalCase")]
pub enum SettlementStatus {
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Settlement {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub method: SettlementMethod,
    pub status: SettlementStatus,
    pub created_at: DateTime<Utc>,
}
