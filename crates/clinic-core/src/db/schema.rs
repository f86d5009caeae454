//! SQLite schema definition.

/// Complete database schema for clinic-core.
///
/// Numbering invariants are backed by UNIQUE constraints so that a raced
/// count-then-insert can never silently produce a duplicate: the insert
/// fails and the operation retries or reports a conflict.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    regd_no TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    mobile_no TEXT NOT NULL,
    email TEXT,
    gender TEXT,
    age INTEGER,
    date_of_birth TEXT,
    address TEXT,
    city TEXT,
    pincode TEXT,
    occupation TEXT,
    ref_by TEXT,
    is_new_patient INTEGER NOT NULL DEFAULT 1,
    registration_date TEXT NOT NULL,
    notes TEXT,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'inactive')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_mobile ON patients(mobile_no);
CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(last_name, first_name);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    appointment_date TEXT NOT NULL,
    appointment_time TEXT NOT NULL,
    token_no INTEGER NOT NULL,
    appointment_type TEXT NOT NULL CHECK (appointment_type IN ('new', 'followup')),
    status TEXT NOT NULL DEFAULT 'scheduled'
        CHECK (status IN ('scheduled', 'completed', 'cancelled', 'rescheduled')),
    visit_type TEXT NOT NULL DEFAULT 'clinic' CHECK (visit_type IN ('clinic', 'online')),
    reason TEXT,
    rescheduled_from INTEGER REFERENCES appointments(id),
    cancelled_at TEXT,
    cancellation_reason TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(appointment_date, token_no)
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);
CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status);

-- ============================================================================
-- Cases
-- ============================================================================

CREATE TABLE IF NOT EXISTS cases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    appointment_id INTEGER REFERENCES appointments(id),
    previous_case_id INTEGER REFERENCES cases(id),
    case_no INTEGER NOT NULL,
    chief_complaints TEXT,
    history TEXT,
    physical_findings TEXT,
    investigation TEXT,
    symptoms TEXT,
    diagnosis TEXT,
    prognosis TEXT,
    prognosis_status TEXT CHECK (prognosis_status IN ('improving', 'stable', 'worsening')),
    follow_up_date TEXT,
    case_notes TEXT,
    is_follow_up INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(patient_id, case_no)
);

CREATE INDEX IF NOT EXISTS idx_cases_patient ON cases(patient_id);
CREATE INDEX IF NOT EXISTS idx_cases_appointment ON cases(appointment_id);

-- ============================================================================
-- Prescriptions
-- ============================================================================

CREATE TABLE IF NOT EXISTS prescriptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    case_id INTEGER REFERENCES cases(id),
    appointment_id INTEGER REFERENCES appointments(id),
    prescription_no TEXT NOT NULL UNIQUE,
    medicines TEXT NOT NULL DEFAULT '[]',        -- JSON array of strings
    dosage TEXT,
    frequency TEXT,
    duration TEXT,
    instructions TEXT,
    language TEXT NOT NULL DEFAULT 'english',
    printed INTEGER NOT NULL DEFAULT 0,
    printed_at TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_prescriptions_patient ON prescriptions(patient_id);

-- ============================================================================
-- Fees (immutable once written)
-- ============================================================================

CREATE TABLE IF NOT EXISTS fees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    appointment_id INTEGER REFERENCES appointments(id),
    fee_type TEXT NOT NULL CHECK (fee_type IN ('new_patient', 'followup', 'consultation', 'advance')),
    amount INTEGER NOT NULL CHECK (amount >= 0),
    payment_mode TEXT NOT NULL CHECK (payment_mode IN ('cash', 'card', 'upi', 'cheque')),
    payment_status TEXT NOT NULL DEFAULT 'paid' CHECK (payment_status IN ('paid', 'pending', 'refunded')),
    advance_amount INTEGER NOT NULL DEFAULT 0,
    due_amount INTEGER NOT NULL DEFAULT 0,
    receipt_no TEXT NOT NULL UNIQUE,
    notes TEXT,
    fee_date TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_fees_patient ON fees(patient_id);
CREATE INDEX IF NOT EXISTS idx_fees_date ON fees(fee_date);
CREATE INDEX IF NOT EXISTS idx_fees_type ON fees(fee_type);

-- ============================================================================
-- Medicine master catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT,
    potency TEXT,
    form TEXT,
    manufacturer TEXT,
    stock INTEGER NOT NULL DEFAULT 0,
    min_stock INTEGER NOT NULL DEFAULT 10,
    unit TEXT NOT NULL DEFAULT 'ml',
    price INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medicines_name ON medicines(name);

-- ============================================================================
-- Follow-up reminders
-- ============================================================================

CREATE TABLE IF NOT EXISTS follow_ups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    case_id INTEGER REFERENCES cases(id),
    appointment_id INTEGER REFERENCES appointments(id),
    follow_up_date TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'completed', 'missed')),
    is_free INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_follow_ups_date ON follow_ups(follow_up_date);
CREATE INDEX IF NOT EXISTS idx_follow_ups_status ON follow_ups(status);

-- ============================================================================
-- Settings
-- ============================================================================

-- Fee schedule history: append-only, exactly one active row at a time
CREATE TABLE IF NOT EXISTS fees_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    new_patient_fee INTEGER NOT NULL,
    follow_up_fee INTEGER NOT NULL,
    consultation_fee INTEGER NOT NULL,
    advance_payment INTEGER NOT NULL DEFAULT 0,
    effective_date TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_fees_settings_active ON fees_settings(is_active);

-- Clinic letterhead: single mutable row
CREATE TABLE IF NOT EXISTS clinic_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    clinic_name TEXT NOT NULL,
    doctor_name TEXT NOT NULL,
    qualification TEXT,
    address TEXT,
    phone TEXT,
    email TEXT,
    footer_text TEXT,
    language TEXT NOT NULL DEFAULT 'english',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_regd_no_unique() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let insert = "INSERT INTO patients (regd_no, first_name, last_name, mobile_no, registration_date)
                      VALUES (?, 'A', 'B', '123', '2024-01-01')";
        conn.execute(insert, ["HMC/2024/0001"]).unwrap();
        let dup = conn.execute(insert, ["HMC/2024/0001"]);
        assert!(dup.is_err());
    }

    #[test]
    fn test_token_unique_per_date() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (regd_no, first_name, last_name, mobile_no, registration_date)
             VALUES ('HMC/2024/0001', 'A', 'B', '123', '2024-01-01')",
            [],
        )
        .unwrap();

        let insert = "INSERT INTO appointments (patient_id, appointment_date, appointment_time, token_no, appointment_type)
                      VALUES (1, ?1, '10:00', ?2, 'new')";
        conn.execute(insert, rusqlite::params!["2024-06-01", 1]).unwrap();

        // Same token on the same date must fail
        let dup = conn.execute(insert, rusqlite::params!["2024-06-01", 1]);
        assert!(dup.is_err());

        // Same token on another date is fine
        conn.execute(insert, rusqlite::params!["2024-06-02", 1]).unwrap();
    }

    #[test]
    fn test_case_no_unique_per_patient() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (regd_no, first_name, last_name, mobile_no, registration_date)
             VALUES ('HMC/2024/0001', 'A', 'B', '123', '2024-01-01')",
            [],
        )
        .unwrap();

        let insert = "INSERT INTO cases (patient_id, case_no) VALUES (1, ?)";
        conn.execute(insert, [1]).unwrap();
        let dup = conn.execute(insert, [1]);
        assert!(dup.is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO patients (regd_no, first_name, last_name, mobile_no, registration_date)
             VALUES ('HMC/2024/0001', 'A', 'B', '123', '2024-01-01')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO fees (patient_id, fee_type, amount, payment_mode, receipt_no, fee_date)
             VALUES (1, 'consultation', -10, 'cash', 'RCP/X/001', '2024-06-01')",
            [],
        );
        assert!(result.is_err());
    }
}
