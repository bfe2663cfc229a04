use shared_config::AppConfig;
use shared_database::RestClient;

use crate::services::upstream::CollaboratorClients;

/// Configuration plus the process-wide HTTP client shared by every request.
#[derive(Clone)]
pub struct AgendaState {
    pub config: AppConfig,
    pub rest: RestClient,
}

impl AgendaState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            rest: RestClient::new(),
        }
    }

    pub fn collaborators(&self) -> CollaboratorClients {
        CollaboratorClients::new(&self.config, self.rest.clone())
    }
}
