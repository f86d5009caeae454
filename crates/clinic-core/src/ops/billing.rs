//! Fee collection, fee schedule publishing and follow-up reminders.

use super::{require_non_empty, validate_date, OpsError, OpsResult, MAX_GENERATION_ATTEMPTS};
use crate::db::{deactivate_fees_settings, insert_fees_settings, save_clinic_settings, Database};
use crate::models::{
    ClinicSettings, ClinicSettingsInput, Fee, FeePayment, FeesSettings, FeesSettingsInput,
    FollowUpReminder, FollowUpStatus,
};
use crate::numbering;

/// Collect a fee. Generates a receipt number and retries if it collides.
/// Fee rows are final; a correction is a new entry, never an edit.
pub fn record_fee_payment(db: &Database, payment: FeePayment) -> OpsResult<Fee> {
    if payment.amount < 0 || payment.advance_amount < 0 || payment.due_amount < 0 {
        return Err(OpsError::Validation("fee amounts must not be negative".into()));
    }
    if db.get_patient(payment.patient_id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: payment.patient_id,
        });
    }

    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let fee = Fee::from_payment(payment.clone(), numbering::receipt_number());

        match db.insert_fee(&fee) {
            Ok(id) => {
                tracing::info!(
                    fee_id = id,
                    receipt_no = %fee.receipt_no,
                    amount = fee.amount,
                    "collected fee"
                );
                return Ok(Fee { id, ..fee });
            }
            Err(e) if e.is_unique_violation() => {
                tracing::debug!(receipt_no = %fee.receipt_no, "receipt number taken, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(OpsError::GenerationFailed("receipt number"))
}

/// Publish a new fee schedule. The current active row is deactivated and a
/// new active row appended in one transaction, keeping history intact.
pub fn update_fees_settings(
    db: &mut Database,
    input: FeesSettingsInput,
) -> OpsResult<FeesSettings> {
    if input.new_patient_fee < 0
        || input.follow_up_fee < 0
        || input.consultation_fee < 0
        || input.advance_payment < 0
    {
        return Err(OpsError::Validation("fee schedule amounts must not be negative".into()));
    }

    let settings = FeesSettings::from_input(input);

    let tx = db.transaction()?;
    deactivate_fees_settings(&tx)?;
    let id = insert_fees_settings(&tx, &settings)?;
    tx.commit()?;

    tracing::info!(fees_settings_id = id, "published fee schedule");
    Ok(FeesSettings { id, ..settings })
}

/// Edit the clinic letterhead, creating the single row on first use.
pub fn update_clinic_settings(
    db: &mut Database,
    input: ClinicSettingsInput,
) -> OpsResult<ClinicSettings> {
    require_non_empty("clinic name", &input.clinic_name)?;
    require_non_empty("doctor name", &input.doctor_name)?;

    let settings = ClinicSettings::from_input(input);

    let tx = db.immediate_transaction()?;
    let saved = save_clinic_settings(&tx, &settings)?;
    tx.commit()?;

    tracing::info!(clinic_name = %saved.clinic_name, "updated clinic settings");
    Ok(saved)
}

/// Schedule a follow-up reminder for a patient.
pub fn schedule_follow_up(db: &Database, reminder: FollowUpReminder) -> OpsResult<FollowUpReminder> {
    validate_date("follow-up date", &reminder.follow_up_date)?;
    if db.get_patient(reminder.patient_id)?.is_none() {
        return Err(OpsError::MissingReference {
            entity: "patient",
            id: reminder.patient_id,
        });
    }

    let id = db.insert_follow_up(&reminder)?;
    tracing::info!(follow_up_id = id, date = %reminder.follow_up_date, "scheduled follow-up");
    Ok(FollowUpReminder { id, ..reminder })
}

/// Resolve a pending reminder as completed or missed.
pub fn resolve_follow_up(
    db: &Database,
    id: i64,
    outcome: FollowUpStatus,
) -> OpsResult<FollowUpReminder> {
    if outcome == FollowUpStatus::Pending {
        return Err(OpsError::Validation(
            "a reminder can only be resolved to completed or missed".into(),
        ));
    }

    let reminder = db.get_follow_up(id)?.ok_or(OpsError::MissingReference {
        entity: "follow-up",
        id,
    })?;

    if !db.set_follow_up_status(id, outcome)? {
        return Err(OpsError::Validation(format!(
            "follow-up {} is already {}",
            id,
            reminder.status.as_str()
        )));
    }

    db.get_follow_up(id)?.ok_or(OpsError::MissingReference {
        entity: "follow-up",
        id,
    })
}
