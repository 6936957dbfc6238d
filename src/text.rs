//! Text normalization and URL linkification.
//!
//! Two fixed stages, applied at validation time so stored records are
//! render-ready: [`normalize_text`] first, then [`convert_urls_to_anchors`].
//! The order matters — escaping after linkification would mangle the
//! generated anchor markup.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// The five reserved markup characters and their named references.
/// A `&` that already begins one of these sequences is left alone, which
/// makes [`normalize_text`] idempotent on control-free input.
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Escape reserved markup characters, strip C0/C1 control characters,
/// collapse whitespace runs to a single space, and trim.
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;

    for (idx, ch) in s.char_indices() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
            continue;
        }
        prev_space = false;

        let code = ch as u32;
        // C0 below U+0020 (whitespace already handled), DEL, and C1.
        if code < 0x20 || (0x7F..=0x9F).contains(&code) {
            continue;
        }

        match ch {
            '&' => {
                let rest = &s[idx..];
                if ENTITIES.iter().any(|e| rest.starts_with(e)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }

    out.trim().to_string()
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"https?://[^\s<>"']+"#).expect("url regex is valid")
    })
}

/// Replace well-formed `http(s)://` substrings with anchor markup.
///
/// Each candidate is verified with `url::Url::parse`; malformed matches
/// are left verbatim. Generated anchors open in a new browsing context
/// and grant the target no `opener` back-reference.
pub fn convert_urls_to_anchors(s: &str) -> String {
    let re = url_regex();
    let mut out = String::with_capacity(s.len());
    let mut last = 0;

    for m in re.find_iter(s) {
        out.push_str(&s[last..m.start()]);
        let raw = m.as_str();
        // Sentence punctuation after a URL belongs to the prose, not the
        // link: "see https://x/terms." links "https://x/terms".
        let candidate = raw.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        if is_well_formed_url(candidate) {
            out.push_str(&format!(
                "<a href=\"{candidate}\" target=\"_blank\" rel=\"noopener noreferrer\">{candidate}</a>"
            ));
            out.push_str(&raw[candidate.len()..]);
        } else {
            out.push_str(raw);
        }
        last = m.end();
    }
    out.push_str(&s[last..]);
    out
}

fn is_well_formed_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(u) => {
            // `Url::parse` accepts degenerate hosts like ";"; a real host
            // has at least one alphanumeric character.
            (u.scheme() == "http" || u.scheme() == "https")
                && u.host_str()
                    .is_some_and(|h| h.chars().any(|c| c.is_ascii_alphanumeric()))
        }
        Err(_) => false,
    }
}
