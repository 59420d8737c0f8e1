// 📒 Penalty Ledger - Per-participant incident log and standings
// Owns the catalog; every total and standing is recomputed from the
// record log, so removing a record re-derives everything downstream.

use chrono::{DateTime, Utc};

use crate::catalog::PenaltyCatalog;
use crate::error::PenaltyError;

/// Reaching this many points disqualifies a participant.
pub const MAX_PENALTY_POINTS: u32 = 21;

// ============================================================================
// STANDINGS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Active,
    Disqualified,
}

impl Standing {
    pub fn from_points(total: u32) -> Self {
        if total >= MAX_PENALTY_POINTS {
            Standing::Disqualified
        } else {
            Standing::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Standing::Active => "active",
            Standing::Disqualified => "disqualified",
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// One logged infraction. Points are copied from the catalog at record
/// time; the catalog never changes, so the copy always agrees with it.
#[derive(Debug, Clone)]
pub struct IncidentRecord {
    pub category: String,
    pub incident: String,
    pub points: u32,
    pub recorded_at: DateTime<Utc>,
}

impl IncidentRecord {
    fn matches(&self, category: &str, incident: &str) -> bool {
        self.category == category && self.incident == incident
    }
}

/// A registered participant and their full incident history.
#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub records: Vec<IncidentRecord>,
}

impl Participant {
    pub fn new(name: String) -> Self {
        Participant {
            name,
            records: Vec::new(),
        }
    }

    pub fn total_points(&self) -> u32 {
        self.records.iter().map(|r| r.points).sum()
    }

    pub fn standing(&self) -> Standing {
        Standing::from_points(self.total_points())
    }
}

// ============================================================================
// LEDGER
// ============================================================================

/// The append-style log of who did what, scored against one catalog.
///
/// Participants keep their registration order; each participant's records
/// keep their recording order. Disqualification is a derived fact, never
/// stored: a disqualified participant still accepts new records, and
/// removing a record can bring them back under the limit.
pub struct Ledger {
    catalog: PenaltyCatalog,
    participants: Vec<Participant>,
}

impl Ledger {
    pub fn new(catalog: PenaltyCatalog) -> Self {
        Ledger {
            catalog,
            participants: Vec::new(),
        }
    }

    pub fn with_standard_catalog() -> Self {
        Self::new(PenaltyCatalog::standard())
    }

    pub fn catalog(&self) -> &PenaltyCatalog {
        &self.catalog
    }

    /// Register a participant. Returns `true` if this registered someone
    /// new, `false` if the name was already on file.
    pub fn add_participant(&mut self, name: &str) -> Result<bool, PenaltyError> {
        if name.trim().is_empty() {
            return Err(PenaltyError::InvalidName);
        }
        if self.exists(name) {
            return Ok(false);
        }
        self.participants.push(Participant::new(name.to_string()));
        Ok(true)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    /// All participants, in registration order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    fn participant_mut(&mut self, name: &str) -> Result<&mut Participant, PenaltyError> {
        self.participants
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| PenaltyError::UnknownParticipant(name.to_string()))
    }

    /// Log an incident against a participant and return their new total.
    pub fn record_incident(
        &mut self,
        name: &str,
        category: &str,
        incident: &str,
    ) -> Result<u32, PenaltyError> {
        if !self.exists(name) {
            return Err(PenaltyError::UnknownParticipant(name.to_string()));
        }

        let points = self.catalog.points_for(category, incident)?;
        let record = IncidentRecord {
            category: category.to_string(),
            incident: incident.to_string(),
            points,
            recorded_at: Utc::now(),
        };

        let participant = self.participant_mut(name)?;
        participant.records.push(record);
        Ok(participant.total_points())
    }

    /// Strike the earliest matching record and return the new total.
    pub fn remove_incident(
        &mut self,
        name: &str,
        category: &str,
        incident: &str,
    ) -> Result<u32, PenaltyError> {
        let participant = self.participant_mut(name)?;

        let index = participant
            .records
            .iter()
            .position(|r| r.matches(category, incident))
            .ok_or_else(|| PenaltyError::IncidentNotRecorded {
                name: name.to_string(),
                category: category.to_string(),
                incident: incident.to_string(),
            })?;

        participant.records.remove(index);
        Ok(participant.total_points())
    }

    pub fn total_points(&self, name: &str) -> Result<u32, PenaltyError> {
        self.participant(name)
            .map(|p| p.total_points())
            .ok_or_else(|| PenaltyError::UnknownParticipant(name.to_string()))
    }

    pub fn standing(&self, name: &str) -> Result<Standing, PenaltyError> {
        Ok(Standing::from_points(self.total_points(name)?))
    }

    pub fn is_disqualified(&self, name: &str) -> Result<bool, PenaltyError> {
        Ok(self.standing(name)? == Standing::Disqualified)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_standard_catalog()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_ledger() -> Ledger {
        let mut ledger = Ledger::with_standard_catalog();
        ledger.add_participant("Alex").unwrap();
        ledger.add_participant("Brooke").unwrap();
        ledger
    }

    #[test]
    fn test_add_and_lookup_participants() {
        let ledger = create_test_ledger();

        assert!(ledger.exists("Alex"));
        assert!(ledger.exists("Brooke"));
        assert!(!ledger.exists("Cara"));
        assert_eq!(ledger.participant_count(), 2);
        assert_eq!(ledger.total_points("Alex").unwrap(), 0);
    }

    #[test]
    fn test_blank_names_rejected() {
        let mut ledger = Ledger::with_standard_catalog();

        assert!(matches!(
            ledger.add_participant(""),
            Err(PenaltyError::InvalidName)
        ));
        assert!(matches!(
            ledger.add_participant("   "),
            Err(PenaltyError::InvalidName)
        ));
        assert_eq!(ledger.participant_count(), 0);
    }

    #[test]
    fn test_re_adding_is_harmless() {
        let mut ledger = Ledger::with_standard_catalog();

        assert!(ledger.add_participant("Alex").unwrap());
        assert!(!ledger.add_participant("Alex").unwrap());
        assert_eq!(ledger.participant_count(), 1);
    }

    #[test]
    fn test_recording_adds_catalog_points() {
        let mut ledger = create_test_ledger();

        assert_eq!(
            ledger.record_incident("Alex", "Driving", "Off-road").unwrap(),
            1
        );
        assert_eq!(
            ledger.record_incident("Alex", "Contact", "Wreck").unwrap(),
            5
        );
        assert_eq!(ledger.total_points("Alex").unwrap(), 5);

        // Brooke is untouched
        assert_eq!(ledger.total_points("Brooke").unwrap(), 0);
    }

    #[test]
    fn test_every_catalog_incident_scores_its_own_value() {
        let catalog = PenaltyCatalog::standard();
        let mut pairs: Vec<(String, String, u32)> = Vec::new();
        for category in catalog.categories() {
            for incident in &category.incidents {
                pairs.push((category.name.clone(), incident.name.clone(), incident.points));
            }
        }

        for (category, incident, points) in pairs {
            let mut ledger = Ledger::with_standard_catalog();
            ledger.add_participant("Alex").unwrap();
            let total = ledger.record_incident("Alex", &category, &incident).unwrap();
            assert_eq!(total, points, "wrong total after '{}'", incident);
        }
    }

    #[test]
    fn test_record_then_remove_restores_total() {
        let mut ledger = create_test_ledger();

        ledger.record_incident("Alex", "Driving", "Corner cut").unwrap();
        ledger.record_incident("Alex", "Contact", "Wreck").unwrap();
        assert_eq!(ledger.total_points("Alex").unwrap(), 6);

        let total = ledger.remove_incident("Alex", "Contact", "Wreck").unwrap();
        assert_eq!(total, 2);
        assert_eq!(ledger.standing("Alex").unwrap(), Standing::Active);
    }

    #[test]
    fn test_unknown_participant_is_checked_first() {
        let mut ledger = create_test_ledger();

        // Even with a bogus category, the participant check comes first
        let err = ledger
            .record_incident("Nobody", "Paperwork", "Late form")
            .unwrap_err();
        assert!(matches!(err, PenaltyError::UnknownParticipant(_)));

        let err = ledger.total_points("Nobody").unwrap_err();
        assert!(matches!(err, PenaltyError::UnknownParticipant(_)));
    }

    #[test]
    fn test_recording_validates_against_catalog() {
        let mut ledger = create_test_ledger();

        let err = ledger
            .record_incident("Alex", "Paperwork", "Late form")
            .unwrap_err();
        assert!(matches!(err, PenaltyError::UnknownCategory(_)));

        // Real incident filed under the wrong category
        let err = ledger
            .record_incident("Alex", "Driving", "Wreck")
            .unwrap_err();
        assert!(matches!(err, PenaltyError::UnknownIncident(_)));

        assert_eq!(ledger.total_points("Alex").unwrap(), 0);
    }

    #[test]
    fn test_removing_an_unrecorded_incident_fails() {
        let mut ledger = create_test_ledger();

        let err = ledger
            .remove_incident("Alex", "Driving", "Off-road")
            .unwrap_err();
        assert!(matches!(err, PenaltyError::IncidentNotRecorded { .. }));
    }

    #[test]
    fn test_removal_strikes_the_earliest_match() {
        let mut ledger = create_test_ledger();

        ledger.record_incident("Alex", "Driving", "Off-road").unwrap();
        ledger.record_incident("Alex", "Driving", "Corner cut").unwrap();
        ledger.record_incident("Alex", "Driving", "Off-road").unwrap();

        ledger.remove_incident("Alex", "Driving", "Off-road").unwrap();

        let records = &ledger.participant("Alex").unwrap().records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].incident, "Corner cut");
        assert_eq!(records[1].incident, "Off-road");
    }

    #[test]
    fn test_disqualification_threshold() {
        let mut ledger = create_test_ledger();

        // 4 x 5 = 20, one short of the limit
        for _ in 0..4 {
            ledger
                .record_incident("Alex", "Misbehavior", "Disrupting the race")
                .unwrap();
        }
        assert_eq!(ledger.total_points("Alex").unwrap(), 20);
        assert!(!ledger.is_disqualified("Alex").unwrap());

        let total = ledger
            .record_incident("Alex", "Contact", "Minor contact")
            .unwrap();
        assert_eq!(total, MAX_PENALTY_POINTS);
        assert!(ledger.is_disqualified("Alex").unwrap());
    }

    #[test]
    fn test_small_incidents_accumulate_to_disqualification() {
        let mut ledger = create_test_ledger();

        ledger.record_incident("Alex", "Driving", "Corner cut").unwrap();
        ledger.record_incident("Alex", "Driving", "Off-road").unwrap();
        assert_eq!(ledger.total_points("Alex").unwrap(), 3);

        for _ in 0..18 {
            ledger.record_incident("Alex", "Driving", "Off-road").unwrap();
        }
        assert_eq!(ledger.total_points("Alex").unwrap(), 21);
        assert_eq!(ledger.standing("Alex").unwrap(), Standing::Disqualified);
    }

    #[test]
    fn test_disqualification_is_derived_not_stored() {
        let mut ledger = create_test_ledger();

        for _ in 0..6 {
            ledger.record_incident("Alex", "Contact", "Wreck").unwrap();
        }
        assert_eq!(ledger.total_points("Alex").unwrap(), 24);
        assert!(ledger.is_disqualified("Alex").unwrap());

        // Still accepts records while disqualified
        let total = ledger
            .record_incident("Alex", "Driving", "Off-road")
            .unwrap();
        assert_eq!(total, 25);

        // Removing records brings the participant back under the limit
        ledger.remove_incident("Alex", "Contact", "Wreck").unwrap();
        assert!(ledger.is_disqualified("Alex").unwrap()); // 21, still out
        ledger.remove_incident("Alex", "Contact", "Wreck").unwrap();
        assert!(!ledger.is_disqualified("Alex").unwrap()); // 17, back in
    }

    #[test]
    fn test_standing_boundaries() {
        assert_eq!(Standing::from_points(0), Standing::Active);
        assert_eq!(Standing::from_points(20), Standing::Active);
        assert_eq!(Standing::from_points(21), Standing::Disqualified);
        assert_eq!(Standing::from_points(22), Standing::Disqualified);
        assert_eq!(Standing::Disqualified.as_str(), "disqualified");
    }

    #[test]
    fn test_participants_keep_registration_order() {
        let mut ledger = Ledger::with_standard_catalog();
        ledger.add_participant("Cara").unwrap();
        ledger.add_participant("Alex").unwrap();
        ledger.add_participant("Brooke").unwrap();

        let names: Vec<&str> = ledger.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cara", "Alex", "Brooke"]);
    }
}
