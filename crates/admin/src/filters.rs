//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a 1-5 rating as filled and empty stars.
///
/// Usage in templates: `{{ review.stars|stars }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn stars(rating: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(render_stars(&rating.to_string()))
}

/// Turns a status value such as `in-progress` or `Approved` into a badge
/// class name.
///
/// Usage in templates: `<span class="badge {{ status|badge_class }}">`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn badge_class(status: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("badge-{}", slug(&status.to_string())))
}

fn render_stars(rating: &str) -> String {
    let filled = rating.trim().parse::<usize>().unwrap_or(0).min(5);
    let mut out = "★".repeat(filled);
    out.push_str(&"☆".repeat(5 - filled));
    out
}

fn slug(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stars() {
        assert_eq!(render_stars("3"), "★★★☆☆");
        assert_eq!(render_stars("9"), "★★★★★");
        assert_eq!(render_stars("bad"), "☆☆☆☆☆");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("in-progress"), "in-progress");
        assert_eq!(slug("In Progress"), "in-progress");
        assert_eq!(slug("Approved"), "approved");
    }
}
