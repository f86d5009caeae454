//! Clinic Core Library
//!
//! Local-first clinic management core: registration, appointments, case
//! taking, prescriptions and fees over a single SQLite file.
//!
//! # Architecture
//!
//! ```text
//! Registration ──► patients (regd_no: PREFIX/YEAR/NNNN, unique)
//!       │
//!       ▼
//! Booking ───────► appointments (token_no dense per date)
//!       │               status: scheduled ─► completed
//!       │                                 ─► cancelled
//!       │                                 ─► rescheduled ─► new row
//!       ▼
//! Case taking ───► cases (case_no dense per patient)
//!       │               first non-follow-up case clears is_new_patient
//!       ▼
//! Prescribing ───► prescriptions (RX/..., printed once)
//!       │
//!       ▼
//! Billing ───────► fees (RCP/..., immutable) ──► summaries / register
//! ```
//!
//! # Core Principle
//!
//! **Numbers are assigned by the store, never by the caller.** Dense
//! ordinals (tokens, case numbers) are counted inside an immediate
//! transaction; random identifiers are retried against UNIQUE columns.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer
//! - [`models`]: Domain types (Patient, Appointment, CaseRecord, etc.)
//! - [`numbering`]: Human-facing identifier generation
//! - [`ops`]: Clinic workflows composing storage into whole actions
//! - [`reports`]: Fee summaries, fee register export, dashboard stats

pub mod db;
pub mod models;
pub mod numbering;
pub mod ops;
pub mod reports;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    Appointment, AppointmentRequest, AppointmentStatus, AppointmentType, CaseInput, CaseRecord,
    ClinicSettings, Fee, FeePayment, FeeType, FeesSettings, FeesSettingsInput, FollowUpCaseInput,
    FollowUpReminder, Medicine, NewPatient, Patient, PaymentMode, Prescription, PrescriptionInput,
    PrognosisStatus, VisitType,
};
pub use ops::{OpsError, OpsResult};
pub use reports::{DashboardStats, FeeRegister, FeeSummary};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicCoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<db::DbError> for ClinicCoreError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => ClinicCoreError::NotFound(what),
            other => ClinicCoreError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ops::OpsError> for ClinicCoreError {
    fn from(e: ops::OpsError) -> Self {
        match e {
            OpsError::Validation(msg) => ClinicCoreError::InvalidInput(msg),
            OpsError::MissingReference { .. } => ClinicCoreError::NotFound(e.to_string()),
            OpsError::InvalidTransition { .. } => ClinicCoreError::Conflict(e.to_string()),
            OpsError::GenerationFailed(_) => ClinicCoreError::Conflict(e.to_string()),
            OpsError::Db(db_err) => db_err.into(),
        }
    }
}

impl From<serde_json::Error> for ClinicCoreError {
    fn from(e: serde_json::Error) -> Self {
        ClinicCoreError::DatabaseError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicCoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicCoreError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<ClinicCore>, ClinicCoreError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(ClinicCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<ClinicCore>, ClinicCoreError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(ClinicCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient under the default registration prefix.
    pub fn register_patient(&self, input: FfiNewPatient) -> Result<FfiPatient, ClinicCoreError> {
        let db = self.db.lock()?;
        let patient = ops::register_patient(&db, input.into(), None)?;
        Ok(patient.into())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, patient_id: i64) -> Result<Option<FfiPatient>, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(patient_id)?.map(|p| p.into()))
    }

    /// Look up a patient by registration number.
    pub fn get_patient_by_regd_no(
        &self,
        regd_no: String,
    ) -> Result<Option<FfiPatient>, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(db.get_patient_by_regd_no(&regd_no)?.map(|p| p.into()))
    }

    /// Search patients by name, mobile or registration number.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, ClinicCoreError> {
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Book an appointment; the token number is assigned here.
    pub fn book_appointment(
        &self,
        request: FfiAppointmentRequest,
    ) -> Result<FfiAppointment, ClinicCoreError> {
        let mut db = self.db.lock()?;
        let request: AppointmentRequest = request.try_into()?;
        let appointment = ops::book_appointment(&mut db, &request)?;
        Ok(appointment.into())
    }

    /// Mark an appointment completed.
    pub fn complete_appointment(&self, id: i64) -> Result<FfiAppointment, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(ops::complete_appointment(&db, id)?.into())
    }

    /// Cancel an appointment with a reason.
    pub fn cancel_appointment(
        &self,
        id: i64,
        reason: String,
    ) -> Result<FfiAppointment, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(ops::cancel_appointment(&db, id, &reason)?.into())
    }

    /// Move an appointment to a new date and time; returns the replacement.
    pub fn reschedule_appointment(
        &self,
        id: i64,
        new_date: String,
        new_time: String,
    ) -> Result<FfiAppointment, ClinicCoreError> {
        let mut db = self.db.lock()?;
        Ok(ops::reschedule_appointment(&mut db, id, &new_date, &new_time)?.into())
    }

    /// Appointments for a date in token order.
    pub fn list_appointments_by_date(
        &self,
        date: String,
    ) -> Result<Vec<FfiAppointment>, ClinicCoreError> {
        let db = self.db.lock()?;
        let appointments = db.list_appointments_by_date(&date)?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    // =========================================================================
    // Case Operations
    // =========================================================================

    /// Record the initial case for a visit. Clears the new-patient flag.
    pub fn create_case(&self, input: FfiCaseInput) -> Result<FfiCase, ClinicCoreError> {
        let mut db = self.db.lock()?;
        Ok(ops::create_case(&mut db, input.into())?.into())
    }

    /// Record a follow-up case in the patient's chain.
    pub fn create_follow_up_case(
        &self,
        input: FfiFollowUpCaseInput,
    ) -> Result<FfiCase, ClinicCoreError> {
        let mut db = self.db.lock()?;
        let input: FollowUpCaseInput = input.try_into()?;
        Ok(ops::create_follow_up_case(&mut db, input)?.into())
    }

    /// All cases for a patient in case-number order.
    pub fn list_cases_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<FfiCase>, ClinicCoreError> {
        let db = self.db.lock()?;
        let cases = db.list_cases_for_patient(patient_id)?;
        Ok(cases.into_iter().map(|c| c.into()).collect())
    }

    // =========================================================================
    // Prescription Operations
    // =========================================================================

    /// Issue a prescription with a generated document number.
    pub fn create_prescription(
        &self,
        input: FfiPrescriptionInput,
    ) -> Result<FfiPrescription, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(ops::create_prescription(&db, input.into())?.into())
    }

    /// Record that a prescription went to print.
    pub fn mark_prescription_printed(
        &self,
        id: i64,
    ) -> Result<FfiPrescription, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(ops::mark_prescription_printed(&db, id)?.into())
    }

    // =========================================================================
    // Billing Operations
    // =========================================================================

    /// Collect a fee; the receipt number is assigned here.
    pub fn record_fee_payment(&self, payment: FfiFeePayment) -> Result<FfiFee, ClinicCoreError> {
        let db = self.db.lock()?;
        let payment: FeePayment = payment.try_into()?;
        Ok(ops::record_fee_payment(&db, payment)?.into())
    }

    /// Totals by fee type, optionally restricted to a date range.
    pub fn get_fees_summary(
        &self,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<FfiFeeSummary, ClinicCoreError> {
        let db = self.db.lock()?;
        let summary = db.get_fees_summary(from.as_deref(), to.as_deref())?;
        Ok(summary.into())
    }

    /// The fee register for a date range as CSV.
    pub fn export_fee_register_csv(
        &self,
        from: String,
        to: String,
    ) -> Result<String, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(db.get_fee_register(&from, &to)?.to_csv())
    }

    /// The fee register for a date range as JSON.
    pub fn export_fee_register_json(
        &self,
        from: String,
        to: String,
    ) -> Result<String, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(db.get_fee_register(&from, &to)?.to_json()?)
    }

    /// Publish a new fee schedule, keeping the old rows as history.
    pub fn update_fees_settings(
        &self,
        input: FfiFeesSettingsInput,
    ) -> Result<FfiFeesSettings, ClinicCoreError> {
        let mut db = self.db.lock()?;
        Ok(ops::update_fees_settings(&mut db, input.into())?.into())
    }

    /// The fee schedule currently in effect.
    pub fn get_active_fees_settings(&self) -> Result<Option<FfiFeesSettings>, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(db.get_active_fees_settings()?.map(|s| s.into()))
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Day-at-a-glance counters for a date.
    pub fn get_dashboard_stats(&self, date: String) -> Result<FfiDashboardStats, ClinicCoreError> {
        let db = self.db.lock()?;
        Ok(db.get_dashboard_stats(&date)?.into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe registration input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub ref_by: Option<String>,
    pub notes: Option<String>,
}

impl From<FfiNewPatient> for NewPatient {
    fn from(input: FfiNewPatient) -> Self {
        NewPatient {
            first_name: input.first_name,
            last_name: input.last_name,
            mobile_no: input.mobile_no,
            email: input.email,
            gender: input.gender,
            age: input.age,
            address: input.address,
            city: input.city,
            ref_by: input.ref_by,
            notes: input.notes,
            ..Default::default()
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub regd_no: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile_no: String,
    pub is_new_patient: bool,
    pub registration_date: String,
    pub status: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            regd_no: patient.regd_no,
            first_name: patient.first_name,
            last_name: patient.last_name,
            mobile_no: patient.mobile_no,
            is_new_patient: patient.is_new_patient,
            registration_date: patient.registration_date,
            status: patient.status.as_str().to_string(),
        }
    }
}

/// FFI-safe booking input. Type and visit fields take the wire strings
/// (`new`/`followup`, `clinic`/`online`).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentRequest {
    pub patient_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_type: String,
    pub visit_type: String,
    pub reason: Option<String>,
}

impl TryFrom<FfiAppointmentRequest> for AppointmentRequest {
    type Error = ClinicCoreError;

    fn try_from(req: FfiAppointmentRequest) -> Result<Self, Self::Error> {
        let appointment_type = AppointmentType::parse(&req.appointment_type).ok_or_else(|| {
            ClinicCoreError::InvalidInput(format!(
                "unknown appointment type: {}",
                req.appointment_type
            ))
        })?;
        let visit_type = VisitType::parse(&req.visit_type).ok_or_else(|| {
            ClinicCoreError::InvalidInput(format!("unknown visit type: {}", req.visit_type))
        })?;

        Ok(AppointmentRequest {
            patient_id: req.patient_id,
            appointment_date: req.appointment_date,
            appointment_time: req.appointment_time,
            appointment_type,
            visit_type,
            reason: req.reason,
        })
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub patient_id: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    pub token_no: i64,
    pub appointment_type: String,
    pub status: String,
    pub visit_type: String,
    pub rescheduled_from: Option<i64>,
    pub cancellation_reason: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            patient_id: appointment.patient_id,
            appointment_date: appointment.appointment_date,
            appointment_time: appointment.appointment_time,
            token_no: appointment.token_no,
            appointment_type: appointment.appointment_type.as_str().to_string(),
            status: appointment.status.as_str().to_string(),
            visit_type: appointment.visit_type.as_str().to_string(),
            rescheduled_from: appointment.rescheduled_from,
            cancellation_reason: appointment.cancellation_reason,
        }
    }
}

/// FFI-safe initial case input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCaseInput {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub chief_complaints: Option<String>,
    pub history: Option<String>,
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub prognosis: Option<String>,
    pub case_notes: Option<String>,
}

impl From<FfiCaseInput> for CaseInput {
    fn from(input: FfiCaseInput) -> Self {
        CaseInput {
            patient_id: input.patient_id,
            appointment_id: input.appointment_id,
            chief_complaints: input.chief_complaints,
            history: input.history,
            symptoms: input.symptoms,
            diagnosis: input.diagnosis,
            prognosis: input.prognosis,
            case_notes: input.case_notes,
            ..Default::default()
        }
    }
}

/// FFI-safe follow-up case input. The prognosis trend takes the wire
/// strings `improving`/`stable`/`worsening`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFollowUpCaseInput {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub previous_case_id: Option<i64>,
    pub symptoms: Option<String>,
    pub prognosis_status: String,
    pub follow_up_date: Option<String>,
    pub case_notes: Option<String>,
}

impl TryFrom<FfiFollowUpCaseInput> for FollowUpCaseInput {
    type Error = ClinicCoreError;

    fn try_from(input: FfiFollowUpCaseInput) -> Result<Self, Self::Error> {
        let prognosis_status = PrognosisStatus::parse(&input.prognosis_status).ok_or_else(|| {
            ClinicCoreError::InvalidInput(format!(
                "unknown prognosis status: {}",
                input.prognosis_status
            ))
        })?;

        Ok(FollowUpCaseInput {
            patient_id: input.patient_id,
            appointment_id: input.appointment_id,
            previous_case_id: input.previous_case_id,
            symptoms: input.symptoms,
            prognosis_status: Some(prognosis_status),
            follow_up_date: input.follow_up_date,
            case_notes: input.case_notes,
            ..Default::default()
        })
    }
}

/// FFI-safe case record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCase {
    pub id: i64,
    pub patient_id: i64,
    pub case_no: i64,
    pub previous_case_id: Option<i64>,
    pub diagnosis: Option<String>,
    pub prognosis_status: Option<String>,
    pub is_follow_up: bool,
    pub created_at: String,
}

impl From<CaseRecord> for FfiCase {
    fn from(case: CaseRecord) -> Self {
        Self {
            id: case.id,
            patient_id: case.patient_id,
            case_no: case.case_no,
            previous_case_id: case.previous_case_id,
            diagnosis: case.diagnosis,
            prognosis_status: case.prognosis_status.map(|s| s.as_str().to_string()),
            is_follow_up: case.is_follow_up,
            created_at: case.created_at,
        }
    }
}

/// FFI-safe prescription input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescriptionInput {
    pub patient_id: i64,
    pub case_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub medicines: Vec<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<String>,
    pub language: Option<String>,
}

impl From<FfiPrescriptionInput> for PrescriptionInput {
    fn from(input: FfiPrescriptionInput) -> Self {
        PrescriptionInput {
            patient_id: input.patient_id,
            case_id: input.case_id,
            appointment_id: input.appointment_id,
            medicines: input.medicines,
            dosage: input.dosage,
            frequency: input.frequency,
            duration: input.duration,
            instructions: input.instructions,
            language: input.language,
        }
    }
}

/// FFI-safe prescription.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescription {
    pub id: i64,
    pub patient_id: i64,
    pub prescription_no: String,
    pub medicines: Vec<String>,
    pub printed: bool,
    pub printed_at: Option<String>,
}

impl From<Prescription> for FfiPrescription {
    fn from(rx: Prescription) -> Self {
        Self {
            id: rx.id,
            patient_id: rx.patient_id,
            prescription_no: rx.prescription_no,
            medicines: rx.medicines,
            printed: rx.printed,
            printed_at: rx.printed_at,
        }
    }
}

/// FFI-safe fee payment input. Fee type and payment mode take the wire
/// strings (`new_patient`/`followup`/`consultation`/`advance`,
/// `cash`/`card`/`upi`/`cheque`).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFeePayment {
    pub patient_id: i64,
    pub appointment_id: Option<i64>,
    pub fee_type: String,
    pub amount: i64,
    pub payment_mode: String,
    pub advance_amount: i64,
    pub due_amount: i64,
    pub notes: Option<String>,
}

impl TryFrom<FfiFeePayment> for FeePayment {
    type Error = ClinicCoreError;

    fn try_from(payment: FfiFeePayment) -> Result<Self, Self::Error> {
        let fee_type = FeeType::parse(&payment.fee_type).ok_or_else(|| {
            ClinicCoreError::InvalidInput(format!("unknown fee type: {}", payment.fee_type))
        })?;
        let payment_mode = PaymentMode::parse(&payment.payment_mode).ok_or_else(|| {
            ClinicCoreError::InvalidInput(format!("unknown payment mode: {}", payment.payment_mode))
        })?;

        Ok(FeePayment {
            patient_id: payment.patient_id,
            appointment_id: payment.appointment_id,
            fee_type,
            amount: payment.amount,
            payment_mode,
            advance_amount: payment.advance_amount,
            due_amount: payment.due_amount,
            notes: payment.notes,
        })
    }
}

/// FFI-safe fee.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFee {
    pub id: i64,
    pub patient_id: i64,
    pub receipt_no: String,
    pub fee_type: String,
    pub amount: i64,
    pub payment_mode: String,
    pub fee_date: String,
}

impl From<Fee> for FfiFee {
    fn from(fee: Fee) -> Self {
        Self {
            id: fee.id,
            patient_id: fee.patient_id,
            receipt_no: fee.receipt_no,
            fee_type: fee.fee_type.as_str().to_string(),
            amount: fee.amount,
            payment_mode: fee.payment_mode.as_str().to_string(),
            fee_date: fee.fee_date,
        }
    }
}

/// FFI-safe fee summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFeeSummary {
    pub new_patient_total: i64,
    pub follow_up_total: i64,
    pub consultation_total: i64,
    pub advance_total: i64,
    pub grand_total: i64,
    pub receipt_count: i64,
}

impl From<FeeSummary> for FfiFeeSummary {
    fn from(summary: FeeSummary) -> Self {
        Self {
            new_patient_total: summary.new_patient_total,
            follow_up_total: summary.follow_up_total,
            consultation_total: summary.consultation_total,
            advance_total: summary.advance_total,
            grand_total: summary.grand_total,
            receipt_count: summary.receipt_count,
        }
    }
}

/// FFI-safe fee schedule input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFeesSettingsInput {
    pub new_patient_fee: i64,
    pub follow_up_fee: i64,
    pub consultation_fee: i64,
    pub advance_payment: i64,
}

impl From<FfiFeesSettingsInput> for FeesSettingsInput {
    fn from(input: FfiFeesSettingsInput) -> Self {
        FeesSettingsInput {
            new_patient_fee: input.new_patient_fee,
            follow_up_fee: input.follow_up_fee,
            consultation_fee: input.consultation_fee,
            advance_payment: input.advance_payment,
        }
    }
}

/// FFI-safe fee schedule.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFeesSettings {
    pub id: i64,
    pub new_patient_fee: i64,
    pub follow_up_fee: i64,
    pub consultation_fee: i64,
    pub advance_payment: i64,
    pub effective_date: String,
    pub is_active: bool,
}

impl From<FeesSettings> for FfiFeesSettings {
    fn from(settings: FeesSettings) -> Self {
        Self {
            id: settings.id,
            new_patient_fee: settings.new_patient_fee,
            follow_up_fee: settings.follow_up_fee,
            consultation_fee: settings.consultation_fee,
            advance_payment: settings.advance_payment,
            effective_date: settings.effective_date,
            is_active: settings.is_active,
        }
    }
}

/// FFI-safe dashboard stats.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardStats {
    pub date: String,
    pub total_patients: i64,
    pub appointments_today: i64,
    pub scheduled_today: i64,
    pub completed_today: i64,
    pub fees_collected_today: i64,
    pub pending_follow_ups: i64,
}

impl From<DashboardStats> for FfiDashboardStats {
    fn from(stats: DashboardStats) -> Self {
        Self {
            date: stats.date,
            total_patients: stats.total_patients,
            appointments_today: stats.appointments_today,
            scheduled_today: stats.scheduled_today,
            completed_today: stats.completed_today,
            fees_collected_today: stats.fees_collected_today,
            pending_follow_ups: stats.pending_follow_ups,
        }
    }
}
