use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// How a payment was made
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DeriveActiveEnum, EnumIter, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// Sort direction for payment listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Payment entity - a settled purchase of a course or a single lesson.
///
/// Payments are recorded by the billing side of the platform and are
/// read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    /// Unique identifier
    pub id: Uuid,
    /// Paying user
    pub user_id: Uuid,
    /// Paid course, if the payment covered a whole course
    pub course_id: Option<Uuid>,
    /// Paid lesson, if the payment covered a single lesson
    pub lesson_id: Option<Uuid>,
    /// Amount in the platform currency
    pub amount: f64,
    /// How the payment was made
    pub payment_method: PaymentMethod,
    /// When the payment settled
    pub payment_date: DateTime<Utc>,
}

/// Query filters for listing payments
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct PaymentFilter {
    pub course_id: Option<Uuid>,
    pub lesson_id: Option<Uuid>,
    pub payment_method: Option<PaymentMethod>,
    /// Ordering by payment date
    #[serde(default)]
    pub order: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn test_payment_method_serde_matches_db_values() {
        let cash: PaymentMethod = serde_json::from_str("\"cash\"").unwrap();
        assert_eq!(cash, PaymentMethod::Cash);
        assert_eq!(serde_json::to_string(&PaymentMethod::Transfer).unwrap(), "\"transfer\"");
        assert_eq!(PaymentMethod::Cash.to_value(), "cash");
        assert_eq!(PaymentMethod::Transfer.to_value(), "transfer");
    }
}
