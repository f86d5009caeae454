//! Appointment booking and the status machine.

use super::{require_non_empty, validate_date, OpsError, OpsResult};
use crate::db::{
    count_appointments_on_date, get_appointment, insert_appointment, set_appointment_status,
    Database,
};
use crate::models::{Appointment, AppointmentRequest, AppointmentStatus};

/// Book an appointment. The token number is the next ordinal for the date,
/// assigned under an immediate transaction so two concurrent bookings for
/// the same date cannot take the same token.
pub fn book_appointment(db: &mut Database, req: &AppointmentRequest) -> OpsResult<Appointment> {
    validate_date("appointment date", &req.appointment_date)?;
    require_non_empty("appointment time", &req.appointment_time)?;

    if db.get_patient(req.patient_id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: req.patient_id,
        });
    }

    let tx = db.immediate_transaction()?;
    let token_no = count_appointments_on_date(&tx, &req.appointment_date)? + 1;
    let appointment = Appointment::from_request(req, token_no);
    let id = insert_appointment(&tx, &appointment)?;
    tx.commit()?;

    tracing::info!(
        appointment_id = id,
        date = %appointment.appointment_date,
        token_no,
        "booked appointment"
    );
    Ok(Appointment { id, ..appointment })
}

/// Mark an appointment completed.
pub fn complete_appointment(db: &Database, id: i64) -> OpsResult<Appointment> {
    transition(db, id, AppointmentStatus::Completed, None)
}

/// Cancel an appointment, recording why and when.
pub fn cancel_appointment(db: &Database, id: i64, reason: &str) -> OpsResult<Appointment> {
    require_non_empty("cancellation reason", reason)?;
    transition(db, id, AppointmentStatus::Cancelled, Some(reason))
}

/// Move an appointment to a new date and time. The original row keeps its
/// token and goes to `Rescheduled`; a fresh row is booked with the next
/// token for the new date and points back via `rescheduled_from`.
pub fn reschedule_appointment(
    db: &mut Database,
    id: i64,
    new_date: &str,
    new_time: &str,
) -> OpsResult<Appointment> {
    validate_date("new appointment date", new_date)?;
    require_non_empty("new appointment time", new_time)?;

    let tx = db.immediate_transaction()?;

    let original = get_appointment(&tx, id)?.ok_or(OpsError::MissingReference {
        entity: "appointment",
        id,
    })?;
    if !original.status.can_transition_to(AppointmentStatus::Rescheduled) {
        return Err(OpsError::InvalidTransition {
            id,
            status: original.status.as_str(),
            requested: AppointmentStatus::Rescheduled.as_str(),
        });
    }

    set_appointment_status(&tx, id, AppointmentStatus::Rescheduled, None, None)?;
    let token_no = count_appointments_on_date(&tx, new_date)? + 1;
    let replacement = Appointment::reschedule_of(&original, new_date, new_time, token_no);
    let new_id = insert_appointment(&tx, &replacement)?;
    tx.commit()?;

    tracing::info!(
        appointment_id = id,
        replacement_id = new_id,
        date = new_date,
        token_no,
        "rescheduled appointment"
    );
    Ok(Appointment {
        id: new_id,
        ..replacement
    })
}

fn transition(
    db: &Database,
    id: i64,
    next: AppointmentStatus,
    cancellation_reason: Option<&str>,
) -> OpsResult<Appointment> {
    let appointment = db.get_appointment(id)?.ok_or(OpsError::MissingReference {
        entity: "appointment",
        id,
    })?;

    if !appointment.status.can_transition_to(next) {
        return Err(OpsError::InvalidTransition {
            id,
            status: appointment.status.as_str(),
            requested: next.as_str(),
        });
    }

    let cancelled_at = cancellation_reason.map(|_| chrono::Utc::now().to_rfc3339());
    set_appointment_status(
        db.conn(),
        id,
        next,
        cancellation_reason,
        cancelled_at.as_deref(),
    )?;

    tracing::info!(appointment_id = id, status = next.as_str(), "appointment status changed");
    db.get_appointment(id)?.ok_or(OpsError::MissingReference {
        entity: "appointment",
        id,
    })
}
