use log::debug;
use std::sync::Arc;

use super::position_model::PositionSettings;
use super::position_traits::{PositionSettingsRepositoryTrait, PositionSettingsServiceTrait};
use crate::errors::Result;

pub struct PositionSettingsService {
    repository: Arc<dyn PositionSettingsRepositoryTrait>,
}

impl PositionSettingsService {
    pub fn new(repository: Arc<dyn PositionSettingsRepositoryTrait>) -> Self {
        PositionSettingsService { repository }
    }
}

impl PositionSettingsServiceTrait for PositionSettingsService {
    fn get_position_settings(&self) -> Result<PositionSettings> {
        self.repository.get_settings()
    }

    fn save_position_settings(&self, settings: PositionSettings) -> Result<PositionSettings> {
        settings.validate()?;
        self.repository.save_settings(&settings)?;
        debug!(
            "Position settings saved (account value {})",
            settings.account_value
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockSettingsRepository {
        stored: RwLock<Option<PositionSettings>>,
    }

    impl PositionSettingsRepositoryTrait for MockSettingsRepository {
        fn get_settings(&self) -> Result<PositionSettings> {
            Ok(self.stored.read().unwrap().clone().unwrap_or_default())
        }

        fn save_settings(&self, settings: &PositionSettings) -> Result<()> {
            *self.stored.write().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    #[test]
    fn save_overwrites_wholesale() {
        let service = PositionSettingsService::new(Arc::new(MockSettingsRepository::default()));
        let updated = PositionSettings {
            account_value: 50000.0,
            daily_loss_limit: 2.5,
            ..Default::default()
        };

        service.save_position_settings(updated.clone()).unwrap();

        assert_eq!(service.get_position_settings().unwrap(), updated);
    }

    #[test]
    fn invalid_settings_are_not_stored() {
        let repo = Arc::new(MockSettingsRepository::default());
        let service = PositionSettingsService::new(repo.clone());

        let invalid = PositionSettings {
            account_value: -10.0,
            ..Default::default()
        };
        assert!(service.save_position_settings(invalid).is_err());
        assert!(repo.stored.read().unwrap().is_none());
    }
}
