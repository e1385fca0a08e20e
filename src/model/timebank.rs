use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::model::employee::Cpf;

/// Sign of a time-bank balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display)]
pub enum BalanceKind {
    #[serde(rename = "credito")]
    #[strum(serialize = "credito")]
    Credit,
    #[serde(rename = "debito")]
    #[strum(serialize = "debito")]
    Debit,
    #[serde(rename = "neutro")]
    #[strum(serialize = "neutro")]
    Neutral,
}

/// Banco de horas entry: signed worked-vs-quota balance accumulated over a
/// date range.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimeBankEntry {
    #[schema(value_type = String)]
    pub cpf: Cpf,
    pub nome: String,
    pub balance_minutes: i64,
    #[schema(example = "+2h 15m")]
    pub balance_formatted: String,
    pub classification: BalanceKind,
}
