//! Typed access to the configured page properties.
//!
//! Each logical field role has its own extractor. Required roles (title,
//! date) fail when the property is missing; optional roles (category,
//! location) read a missing property as absent. A property of the wrong type
//! is always an error.

use notionical_core::error::{DataError, DataResult};

use crate::types::{DateValue, FullPage, PropertyValue, RichText};

/// Property names to read from each page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub title: String,
    pub category: String,
    pub datetime: String,
    pub location: String,
}

impl FullPage {
    fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    fn require(&self, name: &str) -> DataResult<&PropertyValue> {
        self.property(name).ok_or_else(|| DataError::MissingProperty {
            record: self.id.clone(),
            property: name.to_string(),
        })
    }

    fn wrong_type(&self, name: &str, expected: &'static str) -> DataError {
        DataError::WrongPropertyType {
            record: self.id.clone(),
            property: name.to_string(),
            expected,
        }
    }

    /// Title runs of the title property
    pub fn title(&self, name: &str) -> DataResult<&[RichText]> {
        match self.require(name)? {
            PropertyValue::Title { title } => Ok(title.as_slice()),
            _ => Err(self.wrong_type(name, "title")),
        }
    }

    /// Selected option name of the category property
    pub fn category(&self, name: &str) -> DataResult<Option<&str>> {
        match self.property(name) {
            None => Ok(None),
            Some(PropertyValue::Select { select }) => Ok(select.as_ref().map(|s| s.name.as_str())),
            Some(_) => Err(self.wrong_type(name, "select")),
        }
    }

    /// Date range of the date property, `None` when the date is empty
    pub fn date(&self, name: &str) -> DataResult<Option<&DateValue>> {
        match self.require(name)? {
            PropertyValue::Date { date } => Ok(date.as_ref()),
            _ => Err(self.wrong_type(name, "date")),
        }
    }

    /// First run of the location property
    pub fn location(&self, name: &str) -> DataResult<Option<&str>> {
        match self.property(name) {
            None => Ok(None),
            Some(PropertyValue::RichText { rich_text }) => {
                Ok(rich_text.first().map(|run| run.plain_text.as_str()))
            }
            Some(_) => Err(self.wrong_type(name, "rich_text")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SelectOption;
    use std::collections::HashMap;

    fn page(properties: Vec<(&str, PropertyValue)>) -> FullPage {
        FullPage {
            id: "page-1".to_string(),
            url: "https://www.notion.so/page-1".to_string(),
            last_edited_time: None,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn run(text: &str) -> RichText {
        RichText {
            plain_text: text.to_string(),
        }
    }

    #[test]
    fn test_title_requires_property() {
        let p = page(vec![]);
        assert_eq!(
            p.title("Name"),
            Err(DataError::MissingProperty {
                record: "page-1".into(),
                property: "Name".into()
            })
        );
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let p = page(vec![("Name", PropertyValue::RichText { rich_text: vec![] })]);
        assert!(matches!(
            p.title("Name"),
            Err(DataError::WrongPropertyType { expected: "title", .. })
        ));
        assert!(matches!(
            p.category("Name"),
            Err(DataError::WrongPropertyType { expected: "select", .. })
        ));
        assert!(matches!(
            p.date("Name"),
            Err(DataError::WrongPropertyType { expected: "date", .. })
        ));
    }

    #[test]
    fn test_optional_roles_read_missing_as_absent() {
        let p = page(vec![]);
        assert_eq!(p.category("Tag"), Ok(None));
        assert_eq!(p.location("Where"), Ok(None));
    }

    #[test]
    fn test_category_and_location_values() {
        let p = page(vec![
            (
                "Tag",
                PropertyValue::Select {
                    select: Some(SelectOption {
                        name: "Work".into(),
                    }),
                },
            ),
            (
                "Where",
                PropertyValue::RichText {
                    rich_text: vec![run("Room 4"), run(" (2nd floor)")],
                },
            ),
        ]);
        assert_eq!(p.category("Tag"), Ok(Some("Work")));
        assert_eq!(p.location("Where"), Ok(Some("Room 4")));
    }

    #[test]
    fn test_empty_date_is_none() {
        let p = page(vec![("When", PropertyValue::Date { date: None })]);
        assert_eq!(p.date("When"), Ok(None));
    }
}
