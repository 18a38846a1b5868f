use serde::{Deserialize, Serialize};

use crate::models::user::date_part;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub term_id: String,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub payment_method: String,
    pub reference_number: Option<String>,
    #[serde(alias = "date")]
    pub payment_date: Option<String>,
}

impl Payment {
    pub fn reference_label(&self) -> &str {
        match self.reference_number.as_deref() {
            Some(reference) if !reference.is_empty() => reference,
            _ => "N/A",
        }
    }

    pub fn date_label(&self) -> String {
        self.payment_date.as_deref().map(date_part).unwrap_or_default()
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.payment_method.to_lowercase().contains(&query)
            || self.student_id.to_lowercase().contains(&query)
            || self
                .reference_number
                .as_deref()
                .map(|r| r.to_lowercase().contains(&query))
                .unwrap_or(false)
    }
}

/// `GET /finance/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceStats {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub monthly_revenue: f64,
}

/// Body of `POST /finance/payments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub student_id: String,
    pub term_id: String,
    pub amount_paid: f64,
    pub payment_method: String,
    pub reference_number: Option<String>,
}

/// `1234.5` -> `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    // Amounts that round to zero print unsigned
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
