//! Search query model and validation.

use time::Date;
use time::macros::format_description;

use crate::error::{ParseError, ParseResult, QueryError};
use crate::types::{Condition, Units};

/// Language used when a query does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Examples
///
/// ```
/// use weatherly_types::parse_iso_date;
///
/// let date = parse_iso_date("2025-06-01").unwrap();
/// assert_eq!(date.to_string(), "2025-06-01");
/// assert!(parse_iso_date("06/01/2025").is_err());
/// ```
pub fn parse_iso_date(s: &str) -> ParseResult<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ParseError::InvalidDate(s.to_string()))
}

/// Parameters of a single weather lookup.
///
/// Immutable once built; use [`SearchQuery::builder`] to construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    location: String,
    start_date: Date,
    end_date: Option<Date>,
    condition: Option<Condition>,
    language: String,
    units: Units,
}

impl SearchQuery {
    /// Start building a query for a location and start date.
    pub fn builder(location: impl Into<String>, start_date: Date) -> SearchQueryBuilder {
        SearchQueryBuilder::new(location, start_date)
    }

    /// Location as entered.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// First day of the requested range.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Last day of the requested range, if any.
    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Condition filter, if any.
    pub fn condition(&self) -> Option<Condition> {
        self.condition
    }

    /// Language tag used for weekday labels.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Requested unit system.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Location normalized for comparisons and cache keys.
    pub fn normalized_location(&self) -> String {
        self.location.trim().to_lowercase()
    }

    /// Same query with a different unit system.
    #[must_use]
    pub fn with_units(&self, units: Units) -> Self {
        Self {
            units,
            ..self.clone()
        }
    }
}

/// Builder for [`SearchQuery`].
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    location: String,
    start_date: Date,
    end_date: Option<Date>,
    condition: Option<Condition>,
    language: String,
    units: Units,
}

impl SearchQueryBuilder {
    /// Create a builder with English labels and Celsius units.
    pub fn new(location: impl Into<String>, start_date: Date) -> Self {
        Self {
            location: location.into(),
            start_date,
            end_date: None,
            condition: None,
            language: DEFAULT_LANGUAGE.to_string(),
            units: Units::default(),
        }
    }

    /// Set the end of the date range.
    #[must_use]
    pub fn end_date(mut self, end_date: Date) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Set or clear the end of the date range.
    #[must_use]
    pub fn maybe_end_date(mut self, end_date: Option<Date>) -> Self {
        self.end_date = end_date;
        self
    }

    /// Restrict the forecast to one condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set or clear the condition filter.
    #[must_use]
    pub fn maybe_condition(mut self, condition: Option<Condition>) -> Self {
        self.condition = condition;
        self
    }

    /// Set the language tag (`en`, `de`, `pt-BR`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the unit system.
    #[must_use]
    pub fn units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Validate and build the query.
    pub fn build(self) -> Result<SearchQuery, QueryError> {
        if self.location.trim().is_empty() {
            return Err(QueryError::EmptyLocation);
        }
        if let Some(end) = self.end_date
            && end < self.start_date
        {
            return Err(QueryError::EndBeforeStart {
                start: self.start_date,
                end,
            });
        }

        let language = match self.language.trim() {
            "" => DEFAULT_LANGUAGE.to_string(),
            tag => tag.to_string(),
        };

        Ok(SearchQuery {
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            condition: self.condition,
            language,
            units: self.units,
        })
    }
}
