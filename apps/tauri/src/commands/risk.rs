use chrono::{DateTime, Utc};
use log::debug;
use tauri::State;

use super::context;
use crate::context::ContextSlot;
use stonk_core::risk::RiskAssessment;
use stonk_core::RecordSet;

#[tauri::command]
pub async fn get_risk_assessments(
    state: State<'_, ContextSlot>,
) -> Result<RecordSet<RiskAssessment>, String> {
    debug!("Fetching risk assessments...");
    context(&state)?
        .risk_service()
        .get_risk_assessments()
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_risk_assessments_by_date_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    state: State<'_, ContextSlot>,
) -> Result<RecordSet<RiskAssessment>, String> {
    context(&state)?
        .risk_service()
        .get_risk_assessments_by_date_range(start, end)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_risk_assessment(
    assessment: RiskAssessment,
    state: State<'_, ContextSlot>,
) -> Result<RiskAssessment, String> {
    debug!("Saving risk assessment {:?}", assessment.id);
    context(&state)?
        .risk_service()
        .save_risk_assessment(assessment)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_risk_assessment(
    id: String,
    state: State<'_, ContextSlot>,
) -> Result<(), String> {
    debug!("Deleting risk assessment {}", id);
    context(&state)?
        .risk_service()
        .delete_risk_assessment(&id)
        .map_err(|e| e.to_string())
}
