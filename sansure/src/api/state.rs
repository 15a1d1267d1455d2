use std::sync::Arc;

use crate::config::Config;
use crate::services::ModeDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: ModeDispatcher,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let dispatcher = ModeDispatcher::new(config.llm.clone());

        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }
}
