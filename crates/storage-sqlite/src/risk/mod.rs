mod repository;

pub use repository::{RiskAssessmentRepository, RISK_PREFIX};
