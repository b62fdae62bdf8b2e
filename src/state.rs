use std::sync::Arc;

use notionical_provider_notion::{EventMapping, NotionClient};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mapping: Arc<EventMapping>,
    // Nothing is cached: every request queries Notion again
    pub notion: NotionClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let notion = NotionClient::with_base_url(&config.notion_secret, &config.notion_api_base);
        let mapping = config.event_mapping();

        AppState {
            config: Arc::new(config),
            mapping: Arc::new(mapping),
            notion,
        }
    }
}
