//! Domain models for the clinic-core system.

mod appointment;
mod case;
mod fee;
mod followup;
mod medicine;
mod patient;
mod prescription;
mod settings;

pub use appointment::*;
pub use case::*;
pub use fee::*;
pub use followup::*;
pub use medicine::*;
pub use patient::*;
pub use prescription::*;
pub use settings::*;
