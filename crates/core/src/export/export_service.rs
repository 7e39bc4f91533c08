use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::export_model::{ExportDocument, ImportSummary};
use super::export_traits::ExportServiceTrait;
use crate::constants::{EXPORT_FORMAT_VERSION, KEY_LAYOUT_VERSION};
use crate::errors::{Error, Result};
use crate::position::PositionSettingsRepositoryTrait;
use crate::records::RecordSet;
use crate::risk::RiskAssessmentRepositoryTrait;
use crate::stocks::StockRatingRepositoryTrait;
use crate::trades::TradeRepositoryTrait;

/// Makes `path` absolute against the process working directory.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

pub struct ExportService {
    risk_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
    stock_repository: Arc<dyn StockRatingRepositoryTrait>,
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    settings_repository: Arc<dyn PositionSettingsRepositoryTrait>,
}

impl ExportService {
    pub fn new(
        risk_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
        stock_repository: Arc<dyn StockRatingRepositoryTrait>,
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        settings_repository: Arc<dyn PositionSettingsRepositoryTrait>,
    ) -> Self {
        Self {
            risk_repository,
            stock_repository,
            trade_repository,
            settings_repository,
        }
    }

    /// Parses an export document and checks every record in it.
    pub fn parse_document(bytes: &[u8]) -> Result<(ExportDocument, ImportSummary)> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::Import(format!("not a JSON document: {}", e)))?;
        let has_position_settings = value.get("positionSettings").is_some();

        let document: ExportDocument = serde_json::from_value(value)
            .map_err(|e| Error::Import(format!("unexpected document shape: {}", e)))?;

        if document.version != EXPORT_FORMAT_VERSION {
            return Err(Error::Import(format!(
                "unsupported export version '{}', expected '{}'",
                document.version, EXPORT_FORMAT_VERSION
            )));
        }
        if document.layout_version > KEY_LAYOUT_VERSION {
            return Err(Error::Import(format!(
                "document was written by a newer version (layout {})",
                document.layout_version
            )));
        }

        check_all("trades", &document.trades, |t| t.validate())?;
        if has_position_settings {
            document
                .position_settings
                .validate()
                .map_err(|e| Error::Import(format!("positionSettings: {}", e)))?;
        }

        let trade_ids: HashSet<&str> = document.trades.iter().map(|t| t.id.as_str()).collect();
        let summary = ImportSummary {
            version: document.version.clone(),
            risk_assessments: document.risk_assessments.len(),
            stock_ratings: document.stock_ratings.len(),
            trades: trade_ids.len(),
            trade_legs: document.trades.len(),
            has_position_settings,
        };
        Ok((document, summary))
    }
}

fn check_all<T>(collection: &str, items: &[T], check: impl Fn(&T) -> Result<()>) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        check(item).map_err(|e| Error::Import(format!("{}[{}]: {}", collection, index, e)))?;
    }
    Ok(())
}

fn records_of<T>(name: &str, set: RecordSet<T>) -> Vec<T> {
    if set.has_skipped() {
        warn!(
            "Export leaves out {} unreadable {} record(s)",
            set.skipped.len(),
            name
        );
    }
    set.records
}

impl ExportServiceTrait for ExportService {
    fn build_document(&self) -> Result<ExportDocument> {
        Ok(ExportDocument::new(
            self.settings_repository.get_settings()?,
            records_of("risk assessment", self.risk_repository.get_all()?),
            records_of("stock rating", self.stock_repository.get_all()?),
            records_of("trade", self.trade_repository.get_all()?),
        ))
    }

    fn export_data(&self, path: &Path) -> Result<PathBuf> {
        let target = resolve_path(path)?;
        let document = self.build_document()?;
        let json = serde_json::to_vec_pretty(&document)?;
        fs::write(&target, json)?;
        info!(
            "Exported {} risk assessments, {} stock ratings and {} trade legs to {}",
            document.risk_assessments.len(),
            document.stock_ratings.len(),
            document.trades.len(),
            target.display()
        );
        Ok(target)
    }

    fn import_data(&self, path: &Path) -> Result<ImportSummary> {
        let source = resolve_path(path)?;
        let bytes = fs::read(&source)?;
        let (_, summary) = Self::parse_document(&bytes)?;
        info!(
            "Import file {} is valid: {:?}",
            source.display(),
            summary
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::PositionSettings;
    use crate::records::{DeleteOutcome, SkippedRecord};
    use crate::risk::RiskAssessment;
    use crate::stocks::StockRating;
    use crate::trades::Trade;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::tempdir;

    /// One fixed record per collection.
    struct FixedJournal;

    impl RiskAssessmentRepositoryTrait for FixedJournal {
        fn save(&self, a: RiskAssessment) -> Result<RiskAssessment> {
            Ok(a)
        }
        fn get(&self, id: &str) -> Result<RiskAssessment> {
            unimplemented!("{id}")
        }
        fn delete(&self, _id: &str) -> Result<()> {
            Ok(())
        }
        fn get_all(&self) -> Result<RecordSet<RiskAssessment>> {
            let mut a = RiskAssessment::new();
            a.id = "r1".to_string();
            a.emotional_score = 4;
            a.fomo_score = 5;
            a.bias_score = 6;
            a.calculate_overall();
            Ok(RecordSet::new(
                vec![a],
                vec![SkippedRecord {
                    key: "risk:broken".to_string(),
                    reason: "expected value".to_string(),
                }],
            ))
        }
    }

    impl StockRatingRepositoryTrait for FixedJournal {
        fn save(&self, r: StockRating) -> Result<StockRating> {
            Ok(r)
        }
        fn get(&self, id: &str) -> Result<StockRating> {
            unimplemented!("{id}")
        }
        fn delete(&self, _id: &str) -> Result<()> {
            Ok(())
        }
        fn get_all(&self) -> Result<RecordSet<StockRating>> {
            Ok(RecordSet::new(
                vec![StockRating {
                    id: "s1".to_string(),
                    stock_sentiment: 8,
                    confidence: 7,
                    ..StockRating::new("NVDA")
                }],
                vec![],
            ))
        }
    }

    impl TradeRepositoryTrait for FixedJournal {
        fn save(&self, t: Trade) -> Result<Trade> {
            Ok(t)
        }
        fn get(&self, _id: &str) -> Result<Vec<Trade>> {
            Ok(vec![])
        }
        fn delete(&self, _id: &str) -> Result<DeleteOutcome> {
            Ok(DeleteOutcome::default())
        }
        fn prune_legs(&self, _id: &str, _keep: &[DateTime<Utc>]) -> Result<DeleteOutcome> {
            Ok(DeleteOutcome::default())
        }
        fn get_all(&self) -> Result<RecordSet<Trade>> {
            let leg = |day: u32, leg_number: u32| Trade {
                id: "t1".to_string(),
                symbol: "QQQ".to_string(),
                sector: "Index".to_string(),
                strategy: "Calendar Spreads".to_string(),
                trade_type: "Long Calendar".to_string(),
                week: 10,
                entry_date: Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap(),
                expiration_date: Utc.with_ymd_and_hms(2024, 4, day, 20, 0, 0).unwrap(),
                entry_price: 2.1,
                notes: String::new(),
                leg_number,
                is_multi_leg: true,
                short_leg_exp: String::new(),
                timeframe: String::new(),
                entry: 0.0,
                stop: 0.0,
                target: 0.0,
            };
            Ok(RecordSet::new(vec![leg(5, 1), leg(19, 2)], vec![]))
        }
    }

    impl PositionSettingsRepositoryTrait for FixedJournal {
        fn get_settings(&self) -> Result<PositionSettings> {
            Ok(PositionSettings::default())
        }
        fn save_settings(&self, _settings: &PositionSettings) -> Result<()> {
            Ok(())
        }
    }

    fn service() -> ExportService {
        let journal = Arc::new(FixedJournal);
        ExportService::new(journal.clone(), journal.clone(), journal.clone(), journal)
    }

    #[test]
    fn export_then_import_reports_counts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal-export.json");
        let service = service();

        let written = service.export_data(&path).unwrap();
        assert_eq!(written, path);

        let text = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["layoutVersion"], 2);
        assert_eq!(json["preferences"]["theme"], "dark");
        assert_eq!(json["positionSettings"]["accountValue"], 25000.0);

        let summary = service.import_data(&path).unwrap();
        assert_eq!(summary.risk_assessments, 1);
        assert_eq!(summary.stock_ratings, 1);
        assert_eq!(summary.trades, 1);
        assert_eq!(summary.trade_legs, 2);
        assert!(summary.has_position_settings);
    }

    #[test]
    fn import_rejects_unknown_version() {
        let err = ExportService::parse_document(
            br#"{"version": "9.9", "exportDate": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Import(ref m) if m.contains("9.9")));
    }

    #[test]
    fn import_rejects_invalid_records() {
        let doc = br#"{
            "version": "1.0",
            "exportDate": "2024-01-01T00:00:00Z",
            "trades": [{
                "symbol": "SPY",
                "sector": "",
                "strategy": "Vertical Spreads",
                "type": "Bull Call Spread",
                "entryDate": "2024-01-02T00:00:00Z",
                "expirationDate": "2024-02-16T00:00:00Z"
            }]
        }"#;
        let err = ExportService::parse_document(doc).unwrap_err();
        assert!(matches!(err, Error::Import(ref m) if m.starts_with("trades[0]")));
    }

    #[test]
    fn scores_off_the_scale_still_import() {
        let doc = br#"{
            "version": "1.0",
            "exportDate": "2024-01-01T00:00:00Z",
            "riskAssessments": [{"emotionalScore": 0, "fomoScore": 0, "biasScore": 0}],
            "stockRatings": [{"symbol": "AAPL", "stockSentiment": 6, "priceTarget": 0, "confidence": 0}]
        }"#;
        let (_, summary) = ExportService::parse_document(doc).unwrap();
        assert_eq!(summary.risk_assessments, 1);
        assert_eq!(summary.stock_ratings, 1);
    }

    #[test]
    fn minimal_document_is_accepted() {
        let (document, summary) = ExportService::parse_document(
            br#"{"version": "1.0", "exportDate": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(document.layout_version, KEY_LAYOUT_VERSION);
        assert_eq!(summary.trades, 0);
        assert!(!summary.has_position_settings);
    }

    #[test]
    fn import_of_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = service()
            .import_data(&dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
