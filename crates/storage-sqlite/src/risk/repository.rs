use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::repository::{EntityRepository, StoredEntity};
use stonk_core::errors::Result;
use stonk_core::records::RecordSet;
use stonk_core::risk::{RiskAssessment, RiskAssessmentRepositoryTrait};

pub const RISK_PREFIX: &str = "risk:";

impl StoredEntity for RiskAssessment {
    const PREFIX: &'static str = RISK_PREFIX;
    const KIND: &'static str = "risk assessment";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

pub struct RiskAssessmentRepository {
    entities: EntityRepository<RiskAssessment>,
}

impl RiskAssessmentRepository {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        RiskAssessmentRepository {
            entities: EntityRepository::new(store),
        }
    }
}

impl RiskAssessmentRepositoryTrait for RiskAssessmentRepository {
    fn save(&self, assessment: RiskAssessment) -> Result<RiskAssessment> {
        self.entities.save(assessment)
    }

    fn get(&self, id: &str) -> Result<RiskAssessment> {
        self.entities.get(id)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.entities.delete(id)
    }

    fn get_all(&self) -> Result<RecordSet<RiskAssessment>> {
        let mut set = self.entities.list()?;
        set.records.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreOptions;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::tempdir;

    fn repository(dir: &std::path::Path) -> RiskAssessmentRepository {
        let store = KeyValueStore::open(StoreOptions::new(dir).without_compaction()).unwrap();
        RiskAssessmentRepository::new(Arc::new(store))
    }

    fn assessment(day: u32, hour: u32) -> RiskAssessment {
        RiskAssessment {
            date: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
            emotional_score: 3,
            fomo_score: 7,
            bias_score: 5,
            overall_score: 5,
            notes: format!("day {day}"),
            ..Default::default()
        }
    }

    #[test]
    fn save_assigns_id_and_round_trips() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let saved = repo.save(assessment(3, 9)).unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(repo.get(&saved.id).unwrap(), saved);

        let preset = RiskAssessment {
            id: "fixed".to_string(),
            ..assessment(4, 9)
        };
        assert_eq!(repo.save(preset).unwrap().id, "fixed");
    }

    #[test]
    fn save_is_an_upsert() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());

        let mut saved = repo.save(assessment(3, 9)).unwrap();
        saved.notes = "revised".to_string();
        repo.save(saved.clone()).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.records[0].notes, "revised");
    }

    #[test]
    fn get_all_sorts_by_date_and_reports_bad_records() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());
        repo.save(assessment(9, 9)).unwrap();
        repo.save(assessment(2, 9)).unwrap();
        repo.save(assessment(5, 9)).unwrap();
        repo.entities
            .store()
            .put_raw("risk:broken", b"{\"emotionalScore\": \"high\"}".to_vec())
            .unwrap();

        let all = repo.get_all().unwrap();
        let days: Vec<String> = all.records.iter().map(|a| a.notes.clone()).collect();
        assert_eq!(days, vec!["day 2", "day 5", "day 9"]);
        assert_eq!(all.skipped.len(), 1);
        assert_eq!(all.skipped[0].key, "risk:broken");
    }

    #[test]
    fn date_filters_use_calendar_day_and_inclusive_range() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());
        repo.save(assessment(3, 1)).unwrap();
        repo.save(assessment(3, 23)).unwrap();
        repo.save(assessment(4, 12)).unwrap();

        let probe = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
        assert_eq!(repo.get_by_date(probe).unwrap().len(), 2);

        let start = Utc.with_ymd_and_hms(2024, 6, 3, 23, 0, 0).unwrap();
        let range = repo.get_by_date_range(start, start + Duration::hours(13)).unwrap();
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn delete_unknown_id_succeeds() {
        let dir = tempdir().unwrap();
        let repo = repository(dir.path());
        let saved = repo.save(assessment(3, 9)).unwrap();

        repo.delete("nope").unwrap();
        repo.delete(&saved.id).unwrap();
        assert!(repo.get_all().unwrap().is_empty());
        assert!(repo.get(&saved.id).unwrap_err().is_not_found());
    }
}
