//! Human-facing identifier generation.
//!
//! Registration, receipt and prescription numbers carry a random component,
//! so generation can collide. Every format here is backed by a UNIQUE column;
//! the operations layer regenerates and retries when an insert reports a
//! uniqueness violation.

use chrono::{Datelike, Utc};
use rand::Rng;

/// Default prefix for registration numbers.
pub const DEFAULT_REGD_PREFIX: &str = "HMC";

/// Build a registration number: `<prefix>/<year>/<4 random digits>`.
pub fn registration_number(prefix: &str) -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("{}/{}/{:04}", prefix, year, suffix)
}

/// Build a receipt number: `RCP/<base36 millis>/<3 random digits>`.
pub fn receipt_number() -> String {
    format!(
        "RCP/{}/{:03}",
        to_base36_upper(Utc::now().timestamp_millis()),
        rand::thread_rng().gen_range(0..1_000)
    )
}

/// Build a prescription number: `RX/<base36 millis>/<3 random digits>`.
pub fn prescription_number() -> String {
    format!(
        "RX/{}/{:03}",
        to_base36_upper(Utc::now().timestamp_millis()),
        rand::thread_rng().gen_range(0..1_000)
    )
}

fn to_base36_upper(mut n: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    out.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number_shape() {
        let regd = registration_number(DEFAULT_REGD_PREFIX);
        let parts: Vec<&str> = regd.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "HMC");
        assert_eq!(parts[1].len(), 4);
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_receipt_and_prescription_shapes() {
        let receipt = receipt_number();
        assert!(receipt.starts_with("RCP/"));
        assert_eq!(receipt.split('/').count(), 3);

        let rx = prescription_number();
        assert!(rx.starts_with("RX/"));
        let suffix = rx.rsplit('/').next().unwrap();
        assert_eq!(suffix.len(), 3);
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36_upper(0), "0");
        assert_eq!(to_base36_upper(35), "Z");
        assert_eq!(to_base36_upper(36), "10");
        assert_eq!(to_base36_upper(46_655), "ZZZ");
        assert_eq!(to_base36_upper(46_656), "1000");
    }
}
