//! Risk assessments module - daily self-assessment models, services, and traits.

mod risk_model;
mod risk_service;
mod risk_traits;

pub use risk_model::RiskAssessment;
pub use risk_service::RiskAssessmentService;
pub use risk_traits::{RiskAssessmentRepositoryTrait, RiskAssessmentServiceTrait};
