use crate::application::parse_date_limit;
use crate::domain::DrawRequest;
use giveaway_errors::AppError;

const MAX_POSTS_PER_DRAW: usize = 20;
const MAX_POST_ID_LENGTH: usize = 100;
const MAX_WINNERS: u32 = 100;
const MAX_MENTIONS: u32 = 20;
const MAX_REQUIRED_WORD_CHARS: usize = 100;

pub struct DrawValidator;

impl DrawValidator {
    /// Checks an incoming draw and returns it with trimmed post ids.
    pub fn validate(mut request: DrawRequest) -> Result<DrawRequest, AppError> {
        if request.post_ids.is_empty() {
            return Err(AppError::EmptySelection);
        }

        if request.post_ids.len() > MAX_POSTS_PER_DRAW {
            return Err(AppError::InvalidRequest(format!(
                "{} publications maximum par tirage",
                MAX_POSTS_PER_DRAW
            )));
        }

        for id in request.post_ids.iter_mut() {
            *id = Self::validate_post_id(id)?;
        }

        if request.num_winners == 0 || request.num_winners > MAX_WINNERS {
            return Err(AppError::InvalidWinnerCount(request.num_winners.to_string()));
        }

        let filters = &request.filters;
        if filters.min_mentions > MAX_MENTIONS {
            return Err(AppError::InvalidFilter(format!(
                "min_mentions doit être entre 0 et {}",
                MAX_MENTIONS
            )));
        }

        if filters.required_word.chars().count() > MAX_REQUIRED_WORD_CHARS {
            return Err(AppError::InvalidFilter("required_word trop long".to_string()));
        }

        if filters.required_word.chars().any(|c| c.is_control()) {
            tracing::warn!("Control characters in required_word rejected");
            return Err(AppError::InvalidFilter(
                "required_word contient des caractères invalides".to_string(),
            ));
        }

        if let Some(limit) = filters.date_limit.as_deref() {
            parse_date_limit(limit)?;
        }

        if request.is_live && request.page_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            request.page_token = None;
        }

        Ok(request)
    }

    fn validate_post_id(id: &str) -> Result<String, AppError> {
        let id = id.trim();

        if id.is_empty() {
            return Err(AppError::EmptySelection);
        }

        if id.len() > MAX_POST_ID_LENGTH {
            return Err(AppError::InvalidRequest("Identifiant de publication trop long".to_string()));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            tracing::warn!("Rejected post id with unexpected characters: {:?}", id);
            return Err(AppError::InvalidRequest(
                "Identifiant de publication invalide".to_string(),
            ));
        }

        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterConfig, Platform};

    fn request(ids: &[&str], num_winners: u32) -> DrawRequest {
        DrawRequest {
            post_ids: ids.iter().map(|id| id.to_string()).collect(),
            platform: Platform::Facebook,
            num_winners,
            filters: FilterConfig::default(),
            is_live: false,
            page_token: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let validated = DrawValidator::validate(request(&[" post_1 ", "1234_5678"], 3)).unwrap();
        assert_eq!(validated.post_ids, vec!["post_1", "1234_5678"]);
    }

    #[test]
    fn test_invalid_post_ids() {
        assert_eq!(
            DrawValidator::validate(request(&[], 1)),
            Err(AppError::EmptySelection)
        );
        assert_eq!(
            DrawValidator::validate(request(&["  "], 1)),
            Err(AppError::EmptySelection)
        );
        assert!(DrawValidator::validate(request(&["../me/accounts"], 1)).is_err());
        assert!(DrawValidator::validate(request(&["a?access_token=x"], 1)).is_err());

        let too_many: Vec<String> = (0..21).map(|i| format!("post_{i}")).collect();
        let ids: Vec<&str> = too_many.iter().map(String::as_str).collect();
        assert!(matches!(
            DrawValidator::validate(request(&ids, 1)),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_winner_bounds() {
        assert!(matches!(
            DrawValidator::validate(request(&["post_1"], 0)),
            Err(AppError::InvalidWinnerCount(_))
        ));
        assert!(DrawValidator::validate(request(&["post_1"], 100)).is_ok());
        assert!(DrawValidator::validate(request(&["post_1"], 101)).is_err());
    }

    #[test]
    fn test_filter_bounds() {
        let mut r = request(&["post_1"], 1);
        r.filters.min_mentions = 21;
        assert!(matches!(DrawValidator::validate(r), Err(AppError::InvalidFilter(_))));

        let mut r = request(&["post_1"], 1);
        r.filters.required_word = "x".repeat(101);
        assert!(DrawValidator::validate(r).is_err());

        let mut r = request(&["post_1"], 1);
        r.filters.date_limit = Some("2026-13-01".into());
        assert!(DrawValidator::validate(r).is_err());

        let mut r = request(&["post_1"], 1);
        r.filters.date_limit = Some("2026-02-28".into());
        r.filters.required_word = "bijou".into();
        assert!(DrawValidator::validate(r).is_ok());
    }
}
