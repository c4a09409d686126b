#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod summary;
pub mod upi;

pub use summary::{Expense, ExpenseSplit, Member, MemberSummary, initials, summarize};
pub use upi::UpiPayment;
