use derive_more::Display;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Brazilian taxpayer id, the employee primary key. Opaque here: nothing
/// validates or interprets the digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display)]
#[display(fmt = "{}", _0)]
pub struct Cpf(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    #[schema(value_type = String, example = "12345678900")]
    pub cpf: Cpf,

    #[schema(example = "Maria Silva")]
    pub nome: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departamento: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "email")]
    pub email: Option<String>,
}
