use std::net::SocketAddr;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, ValueEnum};
use notionical_provider_notion::client::NOTION_API_BASE;
use notionical_provider_notion::{DataErrorPolicy, EventMapping, FieldNames};

/// Process configuration, read once from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "notionical")]
#[command(about = "Serve a Notion database as an authenticated iCalendar feed")]
pub struct Config {
    /// Token callers must pass as `?token=`
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub access_token: String,

    /// Notion integration secret
    #[arg(long, env = "NOTION_SECRET", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub notion_secret: String,

    /// Database to read events from
    #[arg(long, env = "NOTION_CALENDAR_ID")]
    pub calendar_id: String,

    /// Display name of the calendar
    #[arg(long, env = "CALENDAR_NAME")]
    pub calendar_name: String,

    #[arg(long, env = "EVENT_PROPERTY_TITLE")]
    pub title_property: String,

    #[arg(long, env = "EVENT_PROPERTY_CATEGORY")]
    pub category_property: String,

    #[arg(long, env = "EVENT_PROPERTY_DATETIME")]
    pub datetime_property: String,

    #[arg(long, env = "EVENT_PROPERTY_LOCATION")]
    pub location_property: String,

    /// Shown in brackets when an event has no category
    #[arg(long, env = "CATEGORY_FALLBACK_TEXT")]
    pub category_fallback: String,

    /// What to do with a page that cannot become an event
    #[arg(long, env = "ON_DATA_ERROR", value_enum, default_value_t = OnDataError::Skip)]
    pub on_data_error: OnDataError,

    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1:8787")]
    pub bind: SocketAddr,

    #[arg(long, env = "NOTION_API_BASE", default_value = NOTION_API_BASE)]
    pub notion_api_base: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnDataError {
    /// Leave the page out of the feed
    Skip,
    /// Answer the whole request with an error
    Fail,
}

impl From<OnDataError> for DataErrorPolicy {
    fn from(value: OnDataError) -> Self {
        match value {
            OnDataError::Skip => DataErrorPolicy::Skip,
            OnDataError::Fail => DataErrorPolicy::Fail,
        }
    }
}

impl Config {
    pub fn event_mapping(&self) -> EventMapping {
        EventMapping {
            fields: FieldNames {
                title: self.title_property.clone(),
                category: self.category_property.clone(),
                datetime: self.datetime_property.clone(),
                location: self.location_property.clone(),
            },
            category_fallback: self.category_fallback.clone(),
            on_data_error: self.on_data_error.into(),
        }
    }
}
