use giveaway_errors::AppError;
use serde::{Deserialize, Serialize};

/// Participant rules evaluated by the draw service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub filter_duplicates: bool,
    #[serde(default)]
    pub min_mentions: u32,
    #[serde(default)]
    pub required_word: String,
    #[serde(default)]
    pub include_replies: bool,
    #[serde(default)]
    pub require_photo: bool,
    #[serde(default)]
    pub require_like: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_limit: Option<String>,
}

impl FilterConfig {
    /// Trimmed, lower-cased required word; `None` when no text requirement applies.
    pub fn required_needle(&self) -> Option<String> {
        let word = self.required_word.trim();
        (!word.is_empty()).then(|| word.to_lowercase())
    }
}

/// Raw filter inputs as typed in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    pub filter_duplicates: bool,
    pub min_mentions: String,
    pub required_word: String,
    pub include_replies: bool,
    pub require_photo: bool,
    pub require_like: bool,
    pub limit_by_date: bool,
    pub date_limit: String,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self {
            filter_duplicates: true,
            min_mentions: "0".to_string(),
            required_word: String::new(),
            include_replies: false,
            require_photo: false,
            require_like: false,
            limit_by_date: false,
            date_limit: String::new(),
        }
    }
}

impl FilterForm {
    /// Blank mention counts mean no requirement; anything else must be a whole number.
    pub fn to_config(&self) -> Result<FilterConfig, AppError> {
        let mentions = self.min_mentions.trim();
        let min_mentions = if mentions.is_empty() {
            0
        } else {
            mentions.parse().map_err(|_| {
                AppError::InvalidFilter(format!("nombre de mentions invalide: {}", mentions))
            })?
        };
        let date_limit = self.date_limit.trim();
        Ok(FilterConfig {
            filter_duplicates: self.filter_duplicates,
            min_mentions,
            required_word: self.required_word.clone(),
            include_replies: self.include_replies,
            require_photo: self.require_photo,
            require_like: self.require_like,
            date_limit: (self.limit_by_date && !date_limit.is_empty())
                .then(|| date_limit.to_string()),
        })
    }
}

/// Everything the draw form holds at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawForm {
    pub winner_count: String,
    pub filters: FilterForm,
}

impl Default for DrawForm {
    fn default() -> Self {
        Self {
            winner_count: "1".to_string(),
            filters: FilterForm::default(),
        }
    }
}

impl DrawForm {
    pub fn parse_winner_count(&self) -> Result<u32, AppError> {
        let raw = self.winner_count.trim();
        match raw.parse::<u32>() {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(AppError::InvalidWinnerCount(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_required_word_has_no_needle() {
        let mut config = FilterConfig::default();
        assert_eq!(config.required_needle(), None);
        config.required_word = "   ".into();
        assert_eq!(config.required_needle(), None);
        config.required_word = " #Bijoux ".into();
        assert_eq!(config.required_needle().as_deref(), Some("#bijoux"));
    }

    #[test]
    fn test_date_limit_only_sent_when_toggle_enabled() {
        let mut form = FilterForm {
            date_limit: "2026-02-20".into(),
            ..FilterForm::default()
        };
        assert_eq!(form.to_config().unwrap().date_limit, None);

        form.limit_by_date = true;
        assert_eq!(form.to_config().unwrap().date_limit.as_deref(), Some("2026-02-20"));

        let json = serde_json::to_value(FilterForm::default().to_config().unwrap()).unwrap();
        assert!(json.get("date_limit").is_none());
    }

    #[test]
    fn test_min_mentions_must_be_a_whole_number() {
        let mut form = FilterForm {
            min_mentions: " 2 ".into(),
            ..FilterForm::default()
        };
        assert_eq!(form.to_config().unwrap().min_mentions, 2);

        form.min_mentions = "  ".into();
        assert_eq!(form.to_config().unwrap().min_mentions, 0);

        for bad in ["deux", "-1", "1.5"] {
            form.min_mentions = bad.into();
            assert!(matches!(form.to_config(), Err(AppError::InvalidFilter(_))));
        }
    }

    #[test]
    fn test_winner_count_must_be_positive_integer() {
        let mut form = DrawForm::default();
        assert_eq!(form.parse_winner_count(), Ok(1));

        form.winner_count = " 250 ".into();
        assert_eq!(form.parse_winner_count(), Ok(250));

        for bad in ["0", "-3", "1.5", "", "trois"] {
            form.winner_count = bad.into();
            assert!(matches!(
                form.parse_winner_count(),
                Err(AppError::InvalidWinnerCount(_))
            ));
        }
    }
}
