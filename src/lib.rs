// RC Penalty Ledger - Core Library
// Exposes the catalog, ledger, and CSV round-trip for the CLI and tests

pub mod catalog;
pub mod error;
pub mod io;
pub mod ledger;

// Re-export commonly used types
pub use catalog::{Category, Incident, PenaltyCatalog};
pub use error::PenaltyError;
pub use io::{ImportReport, RESERVED_NAME, TOTAL_POINTS_LABEL};
pub use ledger::{IncidentRecord, Ledger, Participant, Standing, MAX_PENALTY_POINTS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
