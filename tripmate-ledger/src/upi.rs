//! UPI deep links for the "Pay Now" action.
//!
//! Opening `upi://pay?...` hands the payment to whichever UPI app the phone
//! has installed. Nothing is settled or verified here.

use rust_decimal::Decimal;

/// Payee address payments are sent to.
pub const DEFAULT_PAYEE_ADDRESS: &str = "merchant@paytm";

/// Payee name shown in the UPI app.
pub const DEFAULT_PAYEE_NAME: &str = "SmartPay";

/// Transaction note shown in the UPI app.
pub const DEFAULT_NOTE: &str = "Group Travel Payment";

/// Currency code of every group expense.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Parameters of a UPI pay link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpiPayment {
    /// Virtual payment address (`pa`).
    pub payee_address: String,
    /// Payee display name (`pn`).
    pub payee_name: String,
    /// Amount (`am`).
    pub amount: Decimal,
    /// ISO currency code (`cu`).
    pub currency: String,
    /// Transaction note (`tn`).
    pub note: String,
}

impl UpiPayment {
    /// A payment of `amount` to the group's default payee.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self {
            payee_address: DEFAULT_PAYEE_ADDRESS.into(),
            payee_name: DEFAULT_PAYEE_NAME.into(),
            amount,
            currency: DEFAULT_CURRENCY.into(),
            note: DEFAULT_NOTE.into(),
        }
    }

    /// Override the payee address.
    #[must_use]
    pub fn payee(mut self, address: impl Into<String>, name: impl Into<String>) -> Self {
        self.payee_address = address.into();
        self.payee_name = name.into();
        self
    }

    /// Override the transaction note.
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Render the `upi://pay` URL.
    ///
    /// The payee address is inserted as-is; name and note are
    /// percent-encoded. The amount drops trailing zeros (`250.50` → `250.5`).
    #[must_use]
    pub fn to_url(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu={}&tn={}",
            self.payee_address,
            urlencoding::encode(&self.payee_name),
            self.amount.normalize(),
            self.currency,
            urlencoding::encode(&self.note),
        )
    }
}
