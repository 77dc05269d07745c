//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: a row of the `accounts` table
//! - `NewAccount`: a validated create payload
//! - `AccountChanges`: the fields an update may touch
//! - Response bodies for create, update and delete

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ApiError;

/// Represents an account record from the database.
///
/// # JSON Example
///
/// ```json
/// { "id": 1, "name": "Eva", "budget": 32 }
/// ```
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the store on insert, never changes afterwards
    pub id: i64,

    pub name: String,

    /// Stored as REAL; whole values go out as JSON integers (`32`, not `32.0`)
    #[serde(serialize_with = "serialize_budget")]
    pub budget: f64,
}

fn serialize_budget<S: Serializer>(budget: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let whole = budget.trunc();
    if budget.is_finite() && whole == *budget && whole.abs() < i64::MAX as f64 {
        serializer.serialize_i64(whole as i64)
    } else {
        serializer.serialize_f64(*budget)
    }
}

/// Request body for creating a new account, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub budget: f64,
}

impl NewAccount {
    /// Validate a raw `POST /add` body.
    ///
    /// Checks run in order and the first failure wins:
    ///
    /// 1. The body must be a non-empty JSON object (`MissingAccount`)
    /// 2. `name` must be a non-empty string (`MissingName`)
    /// 3. `budget` must be set (`MissingBudget`)
    ///
    /// A budget of `0`, `false`, `""` or `null` counts as not set. Besides
    /// non-zero numbers, strings holding a number (`"100"`, `"0"`) are
    /// accepted and stored as that number. Extra keys are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) if !fields.is_empty() => fields,
            _ => return Err(ApiError::MissingAccount),
        };

        let name = match fields.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(ApiError::MissingName),
        };

        let budget = fields
            .get("budget")
            .and_then(budget_value)
            .ok_or(ApiError::MissingBudget)?;

        Ok(Self { name, budget })
    }
}

fn budget_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|b| *b != 0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|b| b.is_finite()),
        _ => None,
    }
}

/// The mutable fields of an account.
///
/// Only `name` and `budget` are read from an update body; any other key is
/// dropped during deserialization, so `id` can never be rewritten.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountChanges {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub budget: Option<f64>,
}

impl AccountChanges {
    /// Parse a raw `PUT /:id` body. An empty body means no changes.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body).map_err(|e| ApiError::InvalidUpdate(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.budget.is_none()
    }

    /// Apply the present fields to `account`, leaving the rest untouched.
    pub fn apply_to(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name = name.clone();
        }
        if let Some(budget) = self.budget {
            account.budget = budget;
        }
    }
}

/// Response body for `POST /add`.
#[derive(Debug, Serialize)]
pub struct AccountCreated {
    pub message: String,

    #[serde(rename = "newAccount")]
    pub new_account: Account,
}

impl AccountCreated {
    pub fn new(account: Account) -> Self {
        Self {
            message: format!("Account with id: {} created ", account.id),
            new_account: account,
        }
    }
}

/// Response body for `PUT /:id`.
#[derive(Debug, Serialize)]
pub struct AccountUpdated {
    pub message: String,

    pub account: Vec<Account>,
}

impl AccountUpdated {
    /// `rows` must not be empty; the message names the first row's id.
    pub fn new(rows: Vec<Account>) -> Option<Self> {
        let id = rows.first()?.id;
        Some(Self {
            message: format!("Account with id: {id} updated "),
            account: rows,
        })
    }
}

/// A bare `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(id: &str) -> Self {
        Self {
            message: format!("Account with id: {id} successfully deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: Value) -> Result<NewAccount, ApiError> {
        NewAccount::from_body(body.to_string().as_bytes())
    }

    #[test]
    fn create_requires_a_body() {
        assert!(matches!(
            NewAccount::from_body(b""),
            Err(ApiError::MissingAccount)
        ));
        assert!(matches!(create(json!({})), Err(ApiError::MissingAccount)));
        assert!(matches!(create(json!([1, 2])), Err(ApiError::MissingAccount)));
        assert!(matches!(
            NewAccount::from_body(b"{name: Eva"),
            Err(ApiError::MissingAccount)
        ));
    }

    #[test]
    fn create_checks_name_before_budget() {
        assert!(matches!(create(json!({"budget": 100})), Err(ApiError::MissingName)));
        assert!(matches!(create(json!({"other": true})), Err(ApiError::MissingName)));
        assert!(matches!(
            create(json!({"name": "", "budget": 100})),
            Err(ApiError::MissingName)
        ));
        assert!(matches!(
            create(json!({"name": null, "budget": 100})),
            Err(ApiError::MissingName)
        ));
    }

    #[test]
    fn create_requires_a_numeric_budget() {
        assert!(matches!(create(json!({"name": "Eva"})), Err(ApiError::MissingBudget)));
        assert!(matches!(
            create(json!({"name": "Eva", "budget": null})),
            Err(ApiError::MissingBudget)
        ));
        assert!(matches!(
            create(json!({"name": "Eva", "budget": "lots"})),
            Err(ApiError::MissingBudget)
        ));
    }

    #[test]
    fn create_treats_falsy_budgets_as_missing() {
        for budget in [json!(0), json!(0.0), json!(false), json!(""), json!(null)] {
            assert!(
                matches!(
                    create(json!({"name": "Eva", "budget": budget})),
                    Err(ApiError::MissingBudget)
                ),
                "{budget}"
            );
        }
    }

    #[test]
    fn create_accepts_numeric_string_budgets() {
        assert_eq!(create(json!({"name": "Eva", "budget": "100"})).unwrap().budget, 100.0);
        assert_eq!(create(json!({"name": "Eva", "budget": " 2.5 "})).unwrap().budget, 2.5);
        // A non-empty string is set even when it holds zero
        assert_eq!(create(json!({"name": "Eva", "budget": "0"})).unwrap().budget, 0.0);
        assert!(matches!(
            create(json!({"name": "Eva", "budget": "NaN"})),
            Err(ApiError::MissingBudget)
        ));
    }

    #[test]
    fn create_ignores_extra_keys() {
        let account = create(json!({"name": "Eva", "budget": 32, "id": 99})).unwrap();

        assert_eq!(
            account,
            NewAccount {
                name: "Eva".to_string(),
                budget: 32.0
            }
        );
    }

    #[test]
    fn whole_budgets_serialize_as_integers() {
        let account = |budget| Account {
            id: 1,
            name: "Eva".to_string(),
            budget,
        };

        assert_eq!(
            serde_json::to_value(account(32.0)).unwrap(),
            json!({"id": 1, "name": "Eva", "budget": 32})
        );
        assert_eq!(serde_json::to_value(account(10.5)).unwrap()["budget"], json!(10.5));
        assert_eq!(serde_json::to_value(account(-3.0)).unwrap()["budget"], json!(-3));
    }

    #[test]
    fn changes_keep_only_allowed_fields() {
        let changes = AccountChanges::from_body(br#"{"budget": 500, "id": 7, "owner": "x"}"#).unwrap();

        assert_eq!(
            changes,
            AccountChanges {
                name: None,
                budget: Some(500.0)
            }
        );
    }

    #[test]
    fn empty_update_body_means_no_changes() {
        assert!(AccountChanges::from_body(b"").unwrap().is_empty());
        assert!(AccountChanges::from_body(b"{}").unwrap().is_empty());
    }

    #[test]
    fn malformed_update_body_is_rejected() {
        assert!(matches!(
            AccountChanges::from_body(br#"{"budget": "lots"}"#),
            Err(ApiError::InvalidUpdate(_))
        ));
        assert!(matches!(
            AccountChanges::from_body(b"not json"),
            Err(ApiError::InvalidUpdate(_))
        ));
    }

    #[test]
    fn apply_leaves_omitted_fields() {
        let mut account = Account {
            id: 1,
            name: "Eva".to_string(),
            budget: 32.0,
        };
        AccountChanges {
            name: None,
            budget: Some(500.0),
        }
        .apply_to(&mut account);

        assert_eq!(account.name, "Eva");
        assert_eq!(account.budget, 500.0);
        assert_eq!(account.id, 1);
    }

    #[test]
    fn response_messages() {
        let account = Account {
            id: 3,
            name: "Eva".to_string(),
            budget: 32.0,
        };

        let created = serde_json::to_value(AccountCreated::new(account.clone())).unwrap();
        assert_eq!(created["message"], "Account with id: 3 created ");
        assert_eq!(created["newAccount"]["name"], "Eva");

        let updated = AccountUpdated::new(vec![account]).unwrap();
        assert_eq!(updated.message, "Account with id: 3 updated ");
        assert!(AccountUpdated::new(Vec::new()).is_none());

        assert_eq!(
            MessageResponse::deleted("3").message,
            "Account with id: 3 successfully deleted"
        );
    }
}
