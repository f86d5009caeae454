//! Sequence numbering integration tests: tokens, case numbers and the
//! unique document identifiers.

use std::collections::HashSet;

use proptest::prelude::*;

use clinic_core::db::Database;
use clinic_core::models::{
    AppointmentRequest, AppointmentType, CaseInput, FeePayment, FeeType, FollowUpCaseInput,
    NewPatient, PaymentMode, PrescriptionInput, PrognosisStatus, VisitType,
};
use clinic_core::ops::{
    book_appointment, create_case, create_follow_up_case, create_prescription,
    record_fee_payment, register_patient,
};

fn register(db: &Database, first: &str, mobile: &str) -> i64 {
    register_patient(
        db,
        NewPatient {
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            mobile_no: mobile.to_string(),
            ..Default::default()
        },
        None,
    )
    .unwrap()
    .id
}

fn request(patient_id: i64, date: &str) -> AppointmentRequest {
    AppointmentRequest {
        patient_id,
        appointment_date: date.to_string(),
        appointment_time: "10:00".to_string(),
        appointment_type: AppointmentType::New,
        visit_type: VisitType::Clinic,
        reason: None,
    }
}

#[test]
fn test_tokens_are_dense_per_date() {
    let mut db = Database::open_in_memory().unwrap();
    let patient_id = register(&db, "Asha", "9876543210");

    let mut tokens_june1 = Vec::new();
    let mut tokens_june2 = Vec::new();

    for i in 0..6 {
        let date = if i % 2 == 0 { "2024-06-01" } else { "2024-06-02" };
        let appointment = book_appointment(&mut db, &request(patient_id, date)).unwrap();
        if i % 2 == 0 {
            tokens_june1.push(appointment.token_no);
        } else {
            tokens_june2.push(appointment.token_no);
        }
    }

    // Interleaved booking still yields 1, 2, 3 on each date
    assert_eq!(tokens_june1, vec![1, 2, 3]);
    assert_eq!(tokens_june2, vec![1, 2, 3]);
}

#[test]
fn test_case_numbers_are_dense_per_patient() {
    let mut db = Database::open_in_memory().unwrap();
    let first = register(&db, "Asha", "9876543210");
    let second = register(&db, "Ravi", "9000000000");

    let mut previous = None;
    for expected in 1..=4 {
        let case = if expected == 1 {
            create_case(
                &mut db,
                CaseInput {
                    patient_id: first,
                    ..Default::default()
                },
            )
            .unwrap()
        } else {
            create_follow_up_case(
                &mut db,
                FollowUpCaseInput {
                    patient_id: first,
                    previous_case_id: previous,
                    prognosis_status: Some(PrognosisStatus::Stable),
                    ..Default::default()
                },
            )
            .unwrap()
        };
        assert_eq!(case.case_no, expected);
        previous = Some(case.id);
    }

    // The second patient's numbering is independent
    let other = create_case(
        &mut db,
        CaseInput {
            patient_id: second,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(other.case_no, 1);
}

#[test]
fn test_registration_numbers_unique_across_many() {
    let db = Database::open_in_memory().unwrap();

    let mut seen = HashSet::new();
    for i in 0..50 {
        let patient = register_patient(
            &db,
            NewPatient {
                first_name: format!("Patient{}", i),
                last_name: "Test".to_string(),
                mobile_no: format!("90000000{:02}", i),
                ..Default::default()
            },
            None,
        )
        .unwrap();
        assert!(seen.insert(patient.regd_no.clone()), "duplicate {}", patient.regd_no);
    }
}

#[test]
fn test_prescription_numbers_unique_under_rapid_issue() {
    let db = Database::open_in_memory().unwrap();
    let patient_id = register(&db, "Asha", "9876543210");

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let rx = create_prescription(
            &db,
            PrescriptionInput {
                patient_id,
                medicines: vec!["Arnica 30".to_string()],
                ..Default::default()
            },
        )
        .unwrap();
        assert!(seen.insert(rx.prescription_no.clone()), "duplicate {}", rx.prescription_no);
    }
}

#[test]
fn test_receipt_numbers_unique_under_rapid_collection() {
    let db = Database::open_in_memory().unwrap();
    let patient_id = register(&db, "Asha", "9876543210");

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let fee = record_fee_payment(
            &db,
            FeePayment {
                patient_id,
                appointment_id: None,
                fee_type: FeeType::Consultation,
                amount: 300,
                payment_mode: PaymentMode::Cash,
                advance_amount: 0,
                due_amount: 0,
                notes: None,
            },
        )
        .unwrap();
        assert!(seen.insert(fee.receipt_no.clone()), "duplicate {}", fee.receipt_no);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Whatever order dates are booked in, the Nth booking for a date
    /// always holds token N.
    #[test]
    fn prop_token_matches_booking_order(date_picks in prop::collection::vec(0usize..3, 1..20)) {
        let mut db = Database::open_in_memory().unwrap();
        let patient_id = register(&db, "Asha", "9876543210");

        let dates = ["2024-06-01", "2024-06-02", "2024-06-03"];
        let mut per_date_count = [0i64; 3];

        for pick in date_picks {
            per_date_count[pick] += 1;
            let appointment = book_appointment(&mut db, &request(patient_id, dates[pick])).unwrap();
            prop_assert_eq!(appointment.token_no, per_date_count[pick]);
        }

        // The stored rows agree with what the bookings returned
        for (i, date) in dates.iter().enumerate() {
            let listed = db.list_appointments_by_date(date).unwrap();
            prop_assert_eq!(listed.len() as i64, per_date_count[i]);
            let tokens: Vec<i64> = listed.iter().map(|a| a.token_no).collect();
            let expected: Vec<i64> = (1..=per_date_count[i]).collect();
            prop_assert_eq!(tokens, expected);
        }
    }
}
