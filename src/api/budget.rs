//! Expense tracking against a trip budget.

use chrono::NaiveDate;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sync::{ApiClient, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Transport,
    Accommodation,
    Food,
    Entertainment,
    Shopping,
    Other,
}

/// Expense to record; `expense_date` goes out as `YYYY-MM-DD`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub trip_id: i64,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub expense_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub trip_id: i64,
    pub amount: f64,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: Option<String>,
    pub expense_date: String,
    pub created_at: String,
}

/// Budget totals; the budget fields are null when the trip has no budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub trip_id: i64,
    pub total_budget: Option<f64>,
    pub total_expenses: f64,
    pub remaining_budget: Option<f64>,
}

/// Fields pulled out of free text by the backend; any may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedExpense {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expense_date: Option<String>,
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

impl ApiClient {
    pub async fn add_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError> {
        let created: Expense = self
            .send(self.request(Method::POST, "/api/budget/add").json(expense))
            .await?;
        info!("Expense {} recorded for trip {}", created.id, created.trip_id);
        Ok(created)
    }

    pub async fn list_expenses(&self, trip_id: i64) -> Result<Vec<Expense>, ApiError> {
        self.send(
            self.request(Method::GET, "/api/budget/list")
                .query(&[("trip_id", trip_id)]),
        )
        .await
    }

    pub async fn budget_summary(&self, trip_id: i64) -> Result<BudgetSummary, ApiError> {
        self.send(
            self.request(Method::GET, "/api/budget/summary")
                .query(&[("trip_id", trip_id)]),
        )
        .await
    }

    pub async fn extract_expense(&self, text: &str) -> Result<ExtractedExpense, ApiError> {
        self.send(
            self.request(Method::POST, "/api/budget/ai-extract")
                .json(&TextRequest { text }),
        )
        .await
    }
}
