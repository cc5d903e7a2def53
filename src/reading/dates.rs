//! Relative dates and count words
//!
//! Day counts are whole days, truncated. Month and year counts divide the
//! day count by 30 and 365.

use crate::types::Language;
use chrono::{DateTime, Utc};

/// Whole days between `date` and `now`; zero for dates in the future
pub fn days_since(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_days().max(0)
}

/// "Today", "3 days ago", "2 months ago", "1 year ago" and the Russian forms
pub fn relative_date(created: DateTime<Utc>, now: DateTime<Utc>, language: Language) -> String {
    let days = days_since(created, now);

    match language {
        Language::En => {
            if days >= 365 {
                let years = days / 365;
                format!("{years} {} ago", if years == 1 { "year" } else { "years" })
            } else if days > 30 {
                let months = days / 30;
                format!("{months} {} ago", if months == 1 { "month" } else { "months" })
            } else if days == 0 {
                "Today".to_string()
            } else {
                format!("{days} {} ago", day_word(days, language))
            }
        }
        Language::Ru => {
            if days >= 365 {
                let years = days / 365;
                format!("{years} {} назад", russian_plural(years, "год", "года", "лет"))
            } else if days > 30 {
                let months = days / 30;
                format!(
                    "{months} {} назад",
                    russian_plural(months, "месяц", "месяца", "месяцев")
                )
            } else if days == 0 {
                "Сегодня".to_string()
            } else {
                format!("{days} {} назад", day_word(days, language))
            }
        }
    }
}

/// "day"/"days", or "день"/"дня"/"дней"
pub fn day_word(days: i64, language: Language) -> &'static str {
    match language {
        Language::En if days == 1 => "day",
        Language::En => "days",
        Language::Ru => russian_plural(days, "день", "дня", "дней"),
    }
}

/// "article"/"articles", or "статья"/"статьи"/"статей"
pub fn article_word(count: i64, language: Language) -> &'static str {
    match language {
        Language::En if count == 1 => "article",
        Language::En => "articles",
        Language::Ru => russian_plural(count, "статья", "статьи", "статей"),
    }
}

/// Pick the Russian noun form for `n`: 1, 21 take `one`; 2-4, 22-24 take
/// `few`; everything else, including 11-14, takes `many`
fn russian_plural(n: i64, one: &'static str, few: &'static str, many: &'static str) -> &'static str {
    let n = n.unsigned_abs();
    if (11..=14).contains(&(n % 100)) {
        return many;
    }
    match n % 10 {
        1 => one,
        2..=4 => few,
        _ => many,
    }
}
