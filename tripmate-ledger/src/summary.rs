//! Per-member payment status across a group's expenses.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A member of a trip group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Backend row id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSplit {
    /// The member this share belongs to.
    pub member_id: String,
    /// Amount owed for this expense. Accepts `"250.50"` or `250.5`.
    #[serde(deserialize_with = "deserialize_amount")]
    pub share_amount: Decimal,
    /// Whether the member has settled this share.
    #[serde(default)]
    pub is_paid: bool,
}

/// A group expense with its computed splits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Backend row id.
    pub id: String,
    /// What the money was spent on.
    #[serde(default)]
    pub description: String,
    /// Splits produced by the backend; absent until computed.
    #[serde(default, rename = "expense_splits")]
    pub splits: Vec<ExpenseSplit>,
}

/// Payment status of one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    /// The member summarised.
    pub member_id: String,
    /// Sum of unpaid shares.
    pub total_owed: Decimal,
    /// Sum of paid shares.
    pub total_paid: Decimal,
    /// Number of unpaid shares.
    pub pending_count: usize,
    /// Whether any expense has a split for this member.
    pub has_any_splits: bool,
}

impl MemberSummary {
    /// Whether the member still owes money.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_count > 0
    }
}

/// Summarise every member's payment status, in `members` order.
///
/// For each expense only the member's first split counts.
#[must_use]
pub fn summarize(members: &[Member], expenses: &[Expense]) -> Vec<MemberSummary> {
    let summaries: Vec<MemberSummary> = members
        .iter()
        .map(|member| {
            let mut summary = MemberSummary {
                member_id: member.id.clone(),
                total_owed: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                pending_count: 0,
                has_any_splits: false,
            };
            for expense in expenses {
                let Some(split) = expense.splits.iter().find(|s| s.member_id == member.id) else {
                    continue;
                };
                summary.has_any_splits = true;
                if split.is_paid {
                    summary.total_paid += split.share_amount;
                } else {
                    summary.total_owed += split.share_amount;
                    summary.pending_count += 1;
                }
            }
            summary
        })
        .collect();

    tracing::trace!(
        members = members.len(),
        expenses = expenses.len(),
        pending = summaries.iter().filter(|s| s.has_pending()).count(),
        "summarised group payments"
    );
    summaries
}

/// Postgres `numeric` columns arrive as strings, computed values as numbers.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(f64),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Text(text) => Decimal::from_str(text.trim()).map_err(D::Error::custom),
        Amount::Number(number) => Decimal::try_from(number).map_err(D::Error::custom),
    }
}

/// Avatar initials: first letter of up to two words, upper-cased.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
