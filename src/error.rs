// ⚠️ Error Kinds - Every way a ledger call can fail
// All reported synchronously to the caller; the presentation layer decides
// how to surface them. Nothing is swallowed or retried here.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PenaltyError {
    /// Participant name was empty or whitespace-only
    InvalidName,

    /// Operation named a participant that was never registered
    UnknownParticipant(String),

    /// The catalog has no category with this name
    UnknownCategory(String),

    /// No category in the catalog contains this incident name
    UnknownIncident(String),

    /// Removal asked for a (category, incident) pair the participant
    /// has no record of
    IncidentNotRecorded {
        name: String,
        category: String,
        incident: String,
    },

    /// Imported row did not have exactly 3 fields
    MalformedRow { line: u64, fields: usize },

    /// The ledger file could not be read or written
    Io(io::Error),
}

impl fmt::Display for PenaltyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyError::InvalidName => {
                write!(f, "participant name must not be empty")
            }
            PenaltyError::UnknownParticipant(name) => {
                write!(f, "participant '{}' is not registered", name)
            }
            PenaltyError::UnknownCategory(category) => {
                write!(f, "category '{}' does not exist in the catalog", category)
            }
            PenaltyError::UnknownIncident(incident) => {
                write!(f, "incident '{}' does not exist in the catalog", incident)
            }
            PenaltyError::IncidentNotRecorded {
                name,
                category,
                incident,
            } => write!(
                f,
                "no '{}' ({}) incident is recorded for {}",
                incident, category, name
            ),
            PenaltyError::MalformedRow { line, fields } => write!(
                f,
                "row at line {} has {} fields, expected exactly 3",
                line, fields
            ),
            PenaltyError::Io(err) => write!(f, "ledger file operation failed: {}", err),
        }
    }
}

impl std::error::Error for PenaltyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PenaltyError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PenaltyError {
    fn from(err: io::Error) -> Self {
        PenaltyError::Io(err)
    }
}

impl From<csv::Error> for PenaltyError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => PenaltyError::Io(io_err),
            csv::ErrorKind::UnequalLengths { pos, len, .. } => PenaltyError::MalformedRow {
                line: pos.map(|p| p.line()).unwrap_or(0),
                fields: len as usize,
            },
            _ => PenaltyError::Io(io::Error::new(io::ErrorKind::InvalidData, message)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_offender() {
        let err = PenaltyError::UnknownParticipant("Alex".to_string());
        assert_eq!(err.to_string(), "participant 'Alex' is not registered");

        let err = PenaltyError::IncidentNotRecorded {
            name: "Alex".to_string(),
            category: "Driving".to_string(),
            incident: "Off-road".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no 'Off-road' (Driving) incident is recorded for Alex"
        );

        let err = PenaltyError::MalformedRow { line: 4, fields: 2 };
        assert_eq!(
            err.to_string(),
            "row at line 4 has 2 fields, expected exactly 3"
        );
    }

    #[test]
    fn test_io_error_keeps_its_source() {
        let err = PenaltyError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(std::error::Error::source(&err).is_some());

        let err = PenaltyError::InvalidName;
        assert!(std::error::Error::source(&err).is_none());
    }
}
