use crate::domain::{Comment, FilterConfig};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use giveaway_errors::AppError;
use regex_lite::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn mention_pattern() -> &'static Regex {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    MENTION.get_or_init(|| Regex::new(r"@\w+").expect("mention pattern is valid"))
}

pub fn count_mentions(text: &str) -> usize {
    mention_pattern().find_iter(text).count()
}

/// End of the given day, inclusive.
pub fn parse_date_limit(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidFilter(format!("date_limit '{}'", raw)))?;
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| AppError::Internal("invalid end of day".to_string()))?;
    Ok(date.and_time(end_of_day).and_utc())
}

/// Keeps the comments that satisfy every rule, preserving their order.
pub fn apply_filters(comments: Vec<Comment>, filters: &FilterConfig) -> Result<Vec<Comment>, AppError> {
    let date_limit = filters
        .date_limit
        .as_deref()
        .map(parse_date_limit)
        .transpose()?;
    let needle = filters.required_needle();
    let min_mentions = filters.min_mentions as usize;
    let mut seen_users = HashSet::new();
    let total = comments.len();

    let eligible: Vec<Comment> = comments
        .into_iter()
        .filter(|c| filters.include_replies || !c.is_reply)
        .filter(|c| date_limit.is_none_or(|limit| c.timestamp <= limit))
        .filter(|c| !filters.require_photo || c.has_photo)
        .filter(|c| !filters.require_like || c.liked_post)
        .filter(|c| !filters.filter_duplicates || seen_users.insert(c.user_id.clone()))
        .filter(|c| min_mentions == 0 || count_mentions(&c.text) >= min_mentions)
        .filter(|c| {
            needle
                .as_deref()
                .is_none_or(|word| c.text.to_lowercase().contains(word))
        })
        .collect();

    tracing::info!("{} of {} comments eligible", eligible.len(), total);
    Ok(eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn comment(user: &str, text: &str) -> Comment {
        Comment {
            id: format!("c_{user}_{}", text.len()),
            user_id: user.into(),
            user_name: format!("{user} name"),
            profile_pic_url: String::new(),
            text: text.into(),
            timestamp: Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap(),
            is_reply: false,
            has_photo: false,
            liked_post: false,
        }
    }

    fn users(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.user_id.as_str()).collect()
    }

    #[test]
    fn test_count_mentions() {
        assert_eq!(count_mentions("Moi! @sarra @walid_22"), 2);
        assert_eq!(count_mentions("mail@ me"), 0);
        assert_eq!(count_mentions("no tags"), 0);
    }

    #[test]
    fn test_empty_required_word_is_no_op() {
        let comments = vec![comment("u1", "Participe"), comment("u2", "Moi")];
        let filters = FilterConfig {
            required_word: "   ".into(),
            ..FilterConfig::default()
        };
        assert_eq!(apply_filters(comments, &filters).unwrap().len(), 2);
    }

    #[test]
    fn test_required_word_is_case_insensitive() {
        let comments = vec![comment("u1", "J'adore ce BIJOU"), comment("u2", "Moi")];
        let filters = FilterConfig {
            required_word: " bijou ".into(),
            ..FilterConfig::default()
        };
        assert_eq!(users(&apply_filters(comments, &filters).unwrap()), vec!["u1"]);
    }

    #[test]
    fn test_duplicates_keep_first_comment() {
        let comments = vec![
            comment("u1", "first"),
            comment("u2", "hello"),
            comment("u1", "second"),
        ];
        let filters = FilterConfig {
            filter_duplicates: true,
            ..FilterConfig::default()
        };
        let eligible = apply_filters(comments, &filters).unwrap();
        assert_eq!(users(&eligible), vec!["u1", "u2"]);
        assert_eq!(eligible[0].text, "first");
    }

    #[test]
    fn test_duplicates_checked_before_mentions() {
        let comments = vec![comment("u1", "no tag"), comment("u1", "@a @b")];
        let filters = FilterConfig {
            filter_duplicates: true,
            min_mentions: 2,
            ..FilterConfig::default()
        };
        assert!(apply_filters(comments, &filters).unwrap().is_empty());
    }

    #[test]
    fn test_replies_photo_and_like_flags() {
        let mut reply = comment("u1", "reply");
        reply.is_reply = true;
        reply.has_photo = true;
        reply.liked_post = true;
        let mut photo = comment("u2", "photo");
        photo.has_photo = true;
        photo.liked_post = true;
        let plain = comment("u3", "plain");

        let filters = FilterConfig {
            require_photo: true,
            require_like: true,
            ..FilterConfig::default()
        };
        let eligible = apply_filters(vec![reply.clone(), photo.clone(), plain], &filters).unwrap();
        assert_eq!(users(&eligible), vec!["u2"]);

        let with_replies = FilterConfig {
            include_replies: true,
            ..filters
        };
        let eligible = apply_filters(vec![reply, photo], &with_replies).unwrap();
        assert_eq!(users(&eligible), vec!["u1", "u2"]);
    }

    #[test]
    fn test_date_limit_includes_whole_day() {
        let mut late = comment("u1", "late evening");
        late.timestamp = Utc.with_ymd_and_hms(2026, 2, 10, 23, 30, 0).unwrap();
        let mut next_day = comment("u2", "next day");
        next_day.timestamp = Utc.with_ymd_and_hms(2026, 2, 11, 0, 5, 0).unwrap();

        let filters = FilterConfig {
            date_limit: Some("2026-02-10".into()),
            ..FilterConfig::default()
        };
        assert_eq!(
            users(&apply_filters(vec![late, next_day], &filters).unwrap()),
            vec!["u1"]
        );
    }

    #[test]
    fn test_malformed_date_limit_is_rejected() {
        let filters = FilterConfig {
            date_limit: Some("10/02/2026".into()),
            ..FilterConfig::default()
        };
        assert!(matches!(
            apply_filters(Vec::new(), &filters),
            Err(AppError::InvalidFilter(_))
        ));
    }
}
