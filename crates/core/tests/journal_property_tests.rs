//! Property-based tests for the journal rules in stonk-core.
//!
//! Repositories are replaced by small in-memory doubles so that only the
//! scoring, filtering and leg-assignment rules are exercised.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::sync::{Arc, RwLock};
use stonk_core::records::{DeleteOutcome, RecordSet};
use stonk_core::risk::{
    RiskAssessment, RiskAssessmentRepositoryTrait, RiskAssessmentService,
    RiskAssessmentServiceTrait,
};
use stonk_core::trades::{Trade, TradeRepositoryTrait, TradeService, TradeServiceTrait};
use stonk_core::Result;

// =============================================================================
// Doubles
// =============================================================================

#[derive(Default)]
struct InMemoryRisk {
    records: RwLock<Vec<RiskAssessment>>,
}

impl RiskAssessmentRepositoryTrait for InMemoryRisk {
    fn save(&self, mut assessment: RiskAssessment) -> Result<RiskAssessment> {
        let mut records = self.records.write().unwrap();
        if assessment.id.is_empty() {
            assessment.id = format!("risk-{}", records.len());
        }
        records.retain(|r| r.id != assessment.id);
        records.push(assessment.clone());
        Ok(assessment)
    }

    fn get(&self, id: &str) -> Result<RiskAssessment> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .unwrap_or_default())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.records.write().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    fn get_all(&self) -> Result<RecordSet<RiskAssessment>> {
        Ok(RecordSet::new(self.records.read().unwrap().clone(), vec![]))
    }
}

#[derive(Default)]
struct InMemoryTrades {
    legs: RwLock<Vec<Trade>>,
}

impl TradeRepositoryTrait for InMemoryTrades {
    fn save(&self, mut trade: Trade) -> Result<Trade> {
        if trade.id.is_empty() {
            trade.id = "trade-1".to_string();
        }
        self.legs.write().unwrap().push(trade.clone());
        Ok(trade)
    }

    fn get(&self, id: &str) -> Result<Vec<Trade>> {
        Ok(self
            .legs
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.id == id)
            .cloned()
            .collect())
    }

    fn delete(&self, _id: &str) -> Result<DeleteOutcome> {
        Ok(DeleteOutcome::default())
    }

    fn prune_legs(&self, _id: &str, _keep: &[DateTime<Utc>]) -> Result<DeleteOutcome> {
        Ok(DeleteOutcome::default())
    }

    fn get_all(&self) -> Result<RecordSet<Trade>> {
        Ok(RecordSet::new(self.legs.read().unwrap().clone(), vec![]))
    }
}

// =============================================================================
// Generators
// =============================================================================

fn base_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// A timestamp somewhere in the first 60 days of 2024.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..60, 0i64..86_400).prop_map(|(day, secs)| {
        base_day() + Duration::days(day) + Duration::seconds(secs)
    })
}

fn arb_assessment() -> impl Strategy<Value = RiskAssessment> {
    (1i32..=10, 1i32..=10, 1i32..=10, arb_timestamp()).prop_map(
        |(emotional, fomo, bias, date)| RiskAssessment {
            date,
            emotional_score: emotional,
            fomo_score: fomo,
            bias_score: bias,
            ..RiskAssessment::new()
        },
    )
}

fn trade_leg(expiration: DateTime<Utc>) -> Trade {
    Trade {
        id: String::new(),
        symbol: "IWM".to_string(),
        sector: "Index".to_string(),
        strategy: "Diagonal Spreads".to_string(),
        trade_type: "Put Diagonal".to_string(),
        week: 1,
        entry_date: base_day(),
        expiration_date: expiration,
        entry_price: 0.85,
        notes: String::new(),
        leg_number: 1,
        is_multi_leg: false,
        short_leg_exp: String::new(),
        timeframe: String::new(),
        entry: 0.0,
        stop: 0.0,
        target: 0.0,
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The computed overall score lies between the smallest and largest component.
    #[test]
    fn prop_overall_score_is_bounded_by_components(assessment in arb_assessment()) {
        let service = RiskAssessmentService::new(Arc::new(InMemoryRisk::default()));
        let saved = service.save_risk_assessment(assessment.clone()).unwrap();

        let components = [assessment.emotional_score, assessment.fomo_score, assessment.bias_score];
        let min = *components.iter().min().unwrap();
        let max = *components.iter().max().unwrap();
        prop_assert!(saved.overall_score >= min && saved.overall_score <= max);
    }

    /// An explicitly entered overall score is kept as is.
    #[test]
    fn prop_explicit_overall_score_is_kept(assessment in arb_assessment(), overall in 1i32..=10) {
        let service = RiskAssessmentService::new(Arc::new(InMemoryRisk::default()));
        let saved = service
            .save_risk_assessment(RiskAssessment { overall_score: overall, ..assessment })
            .unwrap();
        prop_assert_eq!(saved.overall_score, overall);
    }

    /// Filtering by date matches on calendar day, whatever the time of day.
    #[test]
    fn prop_get_by_date_matches_calendar_day(
        assessments in prop::collection::vec(arb_assessment(), 0..30),
        probe in arb_timestamp(),
    ) {
        let repo = InMemoryRisk::default();
        for a in assessments {
            repo.save(a).unwrap();
        }

        let matched = repo.get_by_date(probe).unwrap();
        let expected = repo
            .get_all()
            .unwrap()
            .records
            .into_iter()
            .filter(|a| a.date.date_naive() == probe.date_naive())
            .count();

        prop_assert_eq!(matched.len(), expected);
        for a in &matched.records {
            prop_assert_eq!(a.date.date_naive(), probe.date_naive());
        }
    }

    /// Date ranges include both of their end points.
    #[test]
    fn prop_date_range_is_inclusive(
        assessments in prop::collection::vec(arb_assessment(), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let repo = InMemoryRisk::default();
        for a in &assessments {
            repo.save(a.clone()).unwrap();
        }
        let edge = assessments[pick.index(assessments.len())].date;

        let hits = repo.get_by_date_range(edge, edge).unwrap();
        prop_assert!(hits.records.iter().all(|a| a.date == edge));
        prop_assert!(!hits.is_empty());
    }

    /// Legs saved together are numbered from one and share a single id.
    #[test]
    fn prop_legs_are_numbered_in_order(offsets in prop::collection::btree_set(1i64..365, 1..6)) {
        let service = TradeService::new(Arc::new(InMemoryTrades::default()));
        let legs: Vec<Trade> = offsets
            .iter()
            .map(|days| trade_leg(base_day() + Duration::days(*days)))
            .collect();
        let count = legs.len();

        let saved = service.save_trade_legs(legs).unwrap();

        prop_assert_eq!(saved.len(), count);
        for (index, leg) in saved.iter().enumerate() {
            prop_assert_eq!(leg.leg_number as usize, index + 1);
            prop_assert_eq!(&leg.id, &saved[0].id);
            prop_assert_eq!(leg.is_multi_leg, count > 1);
        }
    }
}
