use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;

use super::risk_model::RiskAssessment;
use super::risk_traits::{RiskAssessmentRepositoryTrait, RiskAssessmentServiceTrait};
use crate::errors::Result;
use crate::records::RecordSet;

pub struct RiskAssessmentService {
    repository: Arc<dyn RiskAssessmentRepositoryTrait>,
}

impl RiskAssessmentService {
    pub fn new(repository: Arc<dyn RiskAssessmentRepositoryTrait>) -> Self {
        RiskAssessmentService { repository }
    }
}

impl RiskAssessmentServiceTrait for RiskAssessmentService {
    fn get_risk_assessments(&self) -> Result<RecordSet<RiskAssessment>> {
        self.repository.get_all()
    }

    fn get_risk_assessment(&self, id: &str) -> Result<RiskAssessment> {
        self.repository.get(id)
    }

    fn get_risk_assessments_by_date(
        &self,
        date: DateTime<Utc>,
    ) -> Result<RecordSet<RiskAssessment>> {
        self.repository.get_by_date(date)
    }

    fn get_risk_assessments_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RecordSet<RiskAssessment>> {
        self.repository.get_by_date_range(start, end)
    }

    fn save_risk_assessment(&self, mut assessment: RiskAssessment) -> Result<RiskAssessment> {
        let off_scale = assessment.out_of_scale_fields();
        if !off_scale.is_empty() {
            warn!("Saving risk assessment with scores off the 1-10 scale: {:?}", off_scale);
        }
        if assessment.overall_score == 0 {
            assessment.calculate_overall();
            debug!(
                "Computed overall risk score {} for assessment dated {}",
                assessment.overall_score, assessment.date
            );
        }
        self.repository.save(assessment)
    }

    fn delete_risk_assessment(&self, id: &str) -> Result<()> {
        self.repository.delete(id)
    }
}
