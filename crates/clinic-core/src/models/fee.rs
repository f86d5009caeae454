//! Fee and receipt models.

use serde::{Deserialize, Serialize};

/// What the payment covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeeType {
    NewPatient,
    FollowUp,
    Consultation,
    Advance,
}

impl FeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeType::NewPatient => "new_patient",
            FeeType::FollowUp => "followup",
            FeeType::Consultation => "consultation",
            FeeType::Advance => "advance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new_patient" => Some(FeeType::NewPatient),
            "followup" => Some(FeeType::FollowUp),
            "consultation" => Some(FeeType::Consultation),
            "advance" => Some(FeeType::Advance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
    Cheque,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
            PaymentMode::Cheque => "cheque",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMode::Cash),
            "card" => Some(PaymentMode::Card),
            "upi" => Some(PaymentMode::Upi),
            "cheque" => Some(PaymentMode::Cheque),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

/// A collected fee. Rows are immutable once written; amounts are whole
/// rupees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fee {
    /// Surrogate row id (0 until inserted)
    pub id: i64,
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub fee_type: FeeType,
    pub amount: i64,
    pub payment_mode: PaymentMode,
    pub payment_status: PaymentStatus,
    pub advance_amount: i64,
    pub due_amount: i64,
    /// Globally unique, `RCP/<base36 millis>/<3 digits>`
    pub receipt_no: String,
    pub notes: Option<String>,
    /// Calendar date of collection, `YYYY-MM-DD`
    pub fee_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for collecting a fee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeePayment {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub fee_type: FeeType,
    pub amount: i64,
    pub payment_mode: PaymentMode,
    pub advance_amount: i64,
    pub due_amount: i64,
    pub notes: Option<String>,
}

impl Fee {
    /// Build a paid fee row dated today with a generated receipt number.
    pub fn from_payment(payment: FeePayment, receipt_no: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: 0,
            patient_id: payment.patient_id,
            appointment_id: payment.appointment_id,
            fee_type: payment.fee_type,
            amount: payment.amount,
            payment_mode: payment.payment_mode,
            payment_status: PaymentStatus::Paid,
            advance_amount: payment.advance_amount,
            due_amount: payment.due_amount,
            receipt_no,
            notes: payment.notes,
            fee_date: now.date_naive().to_string(),
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_payment() {
        let fee = Fee::from_payment(
            FeePayment {
                patient_id: 1,
                appointment_id: None,
                fee_type: FeeType::Consultation,
                amount: 500,
                payment_mode: PaymentMode::Upi,
                advance_amount: 0,
                due_amount: 0,
                notes: None,
            },
            "RCP/LXK9A2/113".into(),
        );
        assert_eq!(fee.amount, 500);
        assert_eq!(fee.payment_status, PaymentStatus::Paid);
        assert_eq!(fee.fee_date.len(), 10); // YYYY-MM-DD
    }

    #[test]
    fn test_fee_type_round_trip() {
        for t in [
            FeeType::NewPatient,
            FeeType::FollowUp,
            FeeType::Consultation,
            FeeType::Advance,
        ] {
            assert_eq!(FeeType::parse(t.as_str()), Some(t));
        }
        assert_eq!(FeeType::parse("donation"), None);
    }
}
