//! Eligibility predicates: active date range, URL match, division match.
//!
//! A disclaimer renders only when all three hold for the current page and
//! reference instant. Each predicate is independent and pure.

use crate::config::WidgetOptions;
use crate::feed::Disclaimer;
use chrono::{DateTime, Utc};
use url::Url;

/// Combined eligibility: date range AND URL match AND division match.
pub fn is_eligible(
    record: &Disclaimer,
    page_url: &Url,
    reference: DateTime<Utc>,
    options: &WidgetOptions,
    division_set: &[String],
) -> bool {
    is_active(record, reference)
        && url_matches(record, page_url, options)
        && division_matches(record, division_set)
}

/// Active-date-range predicate, boundary-inclusive at both ends.
///
/// No bounds: always active. Lower bound only: active once reached.
/// Upper bound only: the record is treated as already started and stays
/// active until the bound is reached.
pub fn is_active(record: &Disclaimer, reference: DateTime<Utc>) -> bool {
    if let Some(start) = record.starts_at {
        if reference < start {
            return false;
        }
    }
    if let Some(end) = record.ends_at {
        if reference > end {
            return false;
        }
    }
    true
}

/// URL-match predicate.
///
/// A record without URLs matches everywhere. Otherwise the page host must
/// pass the domain allow-list, and the normalized page path must equal one
/// of the record's URLs normalized the same way.
pub fn url_matches(record: &Disclaimer, page_url: &Url, options: &WidgetOptions) -> bool {
    if record.urls.is_empty() {
        return true;
    }

    let Some(host) = page_url.host_str() else {
        return false;
    };
    if !host_allowed(host, &options.allowed_domains) {
        return false;
    }

    let page_path = normalize_path(page_url.path(), options.strip_locale_segment);
    record.urls.iter().any(|u| {
        normalize_url_path(u, options.strip_locale_segment)
            .map(|p| p == page_path)
            .unwrap_or(false)
    })
}

/// Division-match predicate. The configured set "ALL" matches everything;
/// a record without a division applies to all divisions; otherwise
/// membership is case-insensitive (the set and record division are both
/// stored uppercased).
pub fn division_matches(record: &Disclaimer, division_set: &[String]) -> bool {
    if division_set.iter().any(|d| d == "ALL") {
        return true;
    }
    match &record.division {
        None => true,
        Some(div) => division_set.iter().any(|d| d == div),
    }
}

/// Host allow-list check: substring containment in either direction,
/// case-insensitive. An empty allow-list accepts any host.
pub fn host_allowed(host: &str, allowed_domains: &[String]) -> bool {
    if allowed_domains.is_empty() {
        return true;
    }
    let host = host.to_lowercase();
    allowed_domains.iter().any(|d| {
        let d = d.trim().to_lowercase();
        !d.is_empty() && (host.contains(&d) || d.contains(&host))
    })
}

/// Normalize a URL path for comparison: leading/trailing slashes stripped,
/// a trailing `.html` stripped, and optionally a leading locale segment
/// (`it`, `en-us`, ...) dropped. Query and fragment never reach this
/// function — `Url::path` excludes them.
pub fn normalize_path(path: &str, strip_locale: bool) -> String {
    let mut p = path.trim_matches('/');
    if let Some(stripped) = p.strip_suffix(".html") {
        p = stripped.trim_matches('/');
    }

    if strip_locale {
        if let Some((first, rest)) = p.split_once('/') {
            if is_locale_segment(first) {
                return rest.trim_matches('/').to_string();
            }
        } else if is_locale_segment(p) {
            return String::new();
        }
    }
    p.to_string()
}

/// Normalize the path component of a full disclaimer URL.
fn normalize_url_path(url: &str, strip_locale: bool) -> Option<String> {
    let u = Url::parse(url).ok()?;
    Some(normalize_path(u.path(), strip_locale))
}

/// A locale segment is `xx` or `xx-yy`/`xx_yy` with alphabetic parts.
fn is_locale_segment(seg: &str) -> bool {
    let parts: Vec<&str> = seg.split(['-', '_']).collect();
    match parts.as_slice() {
        [lang] => lang.len() == 2 && lang.chars().all(|c| c.is_ascii_alphabetic()),
        [lang, region] => {
            lang.len() == 2
                && region.len() == 2
                && lang.chars().all(|c| c.is_ascii_alphabetic())
                && region.chars().all(|c| c.is_ascii_alphabetic())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_feed_date;

    fn record(urls: &[&str], division: Option<&str>) -> Disclaimer {
        Disclaimer {
            id: "1".into(),
            order_hint: None,
            title: "t".into(),
            body: "b".into(),
            urls: urls.iter().map(|s| s.to_string()).collect(),
            division: division.map(|d| d.to_uppercase()),
            starts_at: None,
            ends_at: None,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        parse_feed_date(s).unwrap()
    }

    #[test]
    fn test_no_bounds_always_active() {
        let rec = record(&[], None);
        assert!(is_active(&rec, at("1970-01-01 00:00:00")));
        assert!(is_active(&rec, at("2999-12-31 23:59:59")));
    }

    #[test]
    fn test_lower_bound_only() {
        let mut rec = record(&[], None);
        rec.starts_at = Some(at("2024-06-01 00:00:00"));
        assert!(!is_active(&rec, at("2024-05-31 23:59:59")));
        assert!(is_active(&rec, at("2024-06-01 00:00:00")));
        assert!(is_active(&rec, at("2999-01-01 00:00:00")));
    }

    #[test]
    fn test_upper_bound_only_already_started() {
        let mut rec = record(&[], None);
        rec.ends_at = Some(at("2024-06-30 23:59:59"));
        assert!(is_active(&rec, at("1970-01-01 00:00:00")));
        assert!(is_active(&rec, at("2024-06-30 23:59:59")));
        assert!(!is_active(&rec, at("2024-07-01 00:00:00")));
    }

    #[test]
    fn test_both_bounds_inclusive() {
        let mut rec = record(&[], None);
        rec.starts_at = Some(at("2024-06-01 00:00:00"));
        rec.ends_at = Some(at("2024-06-30 00:00:00"));
        assert!(!is_active(&rec, at("2024-05-31 23:59:59")));
        assert!(is_active(&rec, at("2024-06-01 00:00:00")));
        assert!(is_active(&rec, at("2024-06-15 12:00:00")));
        assert!(is_active(&rec, at("2024-06-30 00:00:00")));
        assert!(!is_active(&rec, at("2024-06-30 00:00:01")));
    }

    #[test]
    fn test_division_all_matches_everything() {
        let rec = record(&[], Some("AV"));
        assert!(division_matches(&rec, &["ALL".to_string()]));
    }

    #[test]
    fn test_division_mismatch() {
        let rec = record(&[], Some("AV"));
        assert!(!division_matches(&rec, &["MX".to_string()]));
    }

    #[test]
    fn test_division_multi_set_case_insensitive() {
        // "mx,av" configured -> normalized to ["MX", "AV"] by the options.
        let set = vec!["MX".to_string(), "AV".to_string()];
        assert!(division_matches(&record(&[], Some("mx")), &set));
        assert!(division_matches(&record(&[], Some("AV")), &set));
        assert!(!division_matches(&record(&[], Some("IT")), &set));
    }

    #[test]
    fn test_unscoped_record_matches_any_division() {
        assert!(division_matches(&record(&[], None), &["MX".to_string()]));
    }

    #[test]
    fn test_path_normalization_html_and_slashes() {
        assert_eq!(normalize_path("/it/page/", false), "it/page");
        assert_eq!(normalize_path("/it/page.html", false), "it/page");
        assert_eq!(normalize_path("", false), "");
        assert_eq!(normalize_path("/", false), "");
    }

    #[test]
    fn test_locale_segment_stripping() {
        assert_eq!(normalize_path("/it/funds/", true), "funds");
        assert_eq!(normalize_path("/en-us/funds", true), "funds");
        assert_eq!(normalize_path("/funds/it", true), "funds/it");
        assert_eq!(normalize_path("/it", true), "");
    }

    #[test]
    fn test_url_match_equivalent_forms() {
        let opts = WidgetOptions {
            allowed_domains: vec!["host".to_string()],
            ..Default::default()
        };
        let rec = record(&["https://host/it/page/"], None);

        let page = Url::parse("https://host/it/page.html").unwrap();
        assert!(url_matches(&rec, &page, &opts));

        let other = Url::parse("https://host/it/other").unwrap();
        assert!(!url_matches(&rec, &other, &opts));
    }

    #[test]
    fn test_url_match_strips_query_and_fragment() {
        let opts = WidgetOptions::default();
        let rec = record(&["https://host/page"], None);
        let page = Url::parse("https://host/page?utm=x#top").unwrap();
        assert!(url_matches(&rec, &page, &opts));
    }

    #[test]
    fn test_url_match_host_gate() {
        let opts = WidgetOptions {
            allowed_domains: vec!["example.com".to_string()],
            ..Default::default()
        };
        let rec = record(&["https://www.example.com/page"], None);

        // Page host contains the allow-listed domain.
        let page = Url::parse("https://www.example.com/page").unwrap();
        assert!(url_matches(&rec, &page, &opts));

        let foreign = Url::parse("https://other.org/page").unwrap();
        assert!(!url_matches(&rec, &foreign, &opts));
    }

    #[test]
    fn test_host_allowed_bidirectional() {
        let allowed = vec!["www.example.com".to_string()];
        // Allow-listed domain contains the bare host.
        assert!(host_allowed("example.com", &allowed));
        // And the longer host contains a shorter allow-listed domain.
        assert!(host_allowed("www.example.com", &["example.com".to_string()]));
        assert!(!host_allowed("other.org", &allowed));
        // Empty list: no restriction.
        assert!(host_allowed("anything.net", &[]));
    }

    #[test]
    fn test_record_without_urls_matches_everywhere() {
        let opts = WidgetOptions::default();
        let rec = record(&[], None);
        let page = Url::parse("https://anywhere.net/any/path").unwrap();
        assert!(url_matches(&rec, &page, &opts));
    }
}
