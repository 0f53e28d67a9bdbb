//! Builds the wizard's ports from configuration.

use std::sync::Arc;

use super::simulated::{SimulatedDeviceLinker, SimulatedProfileSubmitter};
use super::storage::{shared_codec, KvDraftStore, KvProfileRepository};
use crate::application::{ViewScope, WizardController, WizardPorts};
use crate::config::WizardConfig;
use crate::ports::{KeyValueStore, Notifier};

/// Shared wizard dependencies for one storage slot.
#[derive(Clone)]
pub struct WizardWiring {
    ports: WizardPorts,
    autosave: bool,
}

impl WizardWiring {
    /// Wires the draft and profile stores over `store` and the simulated
    /// operations with the configured delays.
    pub fn new(
        config: &WizardConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let codec = shared_codec();
        let ports = WizardPorts {
            drafts: Arc::new(KvDraftStore::new(Arc::clone(&store), Arc::clone(&codec))),
            profiles: Arc::new(KvProfileRepository::new(store, codec)),
            linker: Arc::new(SimulatedDeviceLinker::new(config.device_connect_delay())),
            submitter: Arc::new(SimulatedProfileSubmitter::new(config.submit_delay())),
            notifier,
        };
        Self {
            ports,
            autosave: config.autosave,
        }
    }

    pub fn ports(&self) -> WizardPorts {
        self.ports.clone()
    }

    /// Enters a wizard view with the configured autosave setting.
    pub async fn enter(&self, scope: ViewScope) -> WizardController {
        WizardController::enter(self.ports(), scope, self.autosave).await
    }
}
