use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::records::RecordSet;
use crate::risk::risk_model::RiskAssessment;
use crate::utils::time_utils::{same_calendar_day, within_range};

/// Trait for risk assessment repository operations.
///
/// Filters are provided on top of `get_all` and run in memory.
pub trait RiskAssessmentRepositoryTrait: Send + Sync {
    /// Upserts by id, assigning a fresh id when empty.
    fn save(&self, assessment: RiskAssessment) -> Result<RiskAssessment>;
    fn get(&self, id: &str) -> Result<RiskAssessment>;
    fn delete(&self, id: &str) -> Result<()>;
    /// All assessments, oldest first.
    fn get_all(&self) -> Result<RecordSet<RiskAssessment>>;

    fn get_by_date(&self, date: DateTime<Utc>) -> Result<RecordSet<RiskAssessment>> {
        Ok(self
            .get_all()?
            .filter(|a| same_calendar_day(&a.date, &date)))
    }

    fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<RiskAssessment>> {
        Ok(self
            .get_all()?
            .filter(|a| within_range(&a.date, &start, &end)))
    }
}

/// Trait for risk assessment service operations.
pub trait RiskAssessmentServiceTrait: Send + Sync {
    fn get_risk_assessments(&self) -> Result<RecordSet<RiskAssessment>>;
    fn get_risk_assessment(&self, id: &str) -> Result<RiskAssessment>;
    fn get_risk_assessments_by_date(&self, date: DateTime<Utc>)
        -> Result<RecordSet<RiskAssessment>>;
    fn get_risk_assessments_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<RiskAssessment>>;
    fn save_risk_assessment(&self, assessment: RiskAssessment) -> Result<RiskAssessment>;
    fn delete_risk_assessment(&self, id: &str) -> Result<()>;
}
