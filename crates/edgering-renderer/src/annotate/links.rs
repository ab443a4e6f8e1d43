//! Link shortcut and link class passes.

use std::sync::LazyLock;

use regex::{Captures, Match, Regex};

use super::known_links::KnownLinks;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:mailto:)?([^\s<>@]+@[^\s<>@]+\.[a-zA-Z]{2,})>").unwrap()
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(http[^\s<>]*)>").unwrap());

static PDF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\[[^\[\]]+\])\(([^)]+\.pdf)\)").unwrap());

/// `<addr@domain.tld>` to `[addr@domain.tld](mailto:addr@domain.tld){.lnkMail}`.
///
/// ```
/// use edgering_renderer::annotate::email_shortcuts;
///
/// assert_eq!(
///     email_shortcuts("<a@b.co>"),
///     "[a@b.co](mailto:a@b.co){.lnkMail}"
/// );
/// ```
#[must_use]
pub fn email_shortcuts(text: &str) -> String {
    EMAIL_RE
        .replace_all(text, "[$1](mailto:$1){.lnkMail}")
        .into_owned()
}

/// `<http…>` to a markdown link whose text omits the `https://` scheme.
///
/// Angle-bracket content that doesn't start with `http` is left alone, so
/// inline HTML passes through.
#[must_use]
pub fn url_shortcuts(text: &str) -> String {
    URL_RE
        .replace_all(text, |caps: &Captures| {
            let url = &caps[1];
            let label = url.strip_prefix("https://").unwrap_or(url);
            format!("[{label}]({url})")
        })
        .into_owned()
}

/// Append `{.lnk<Class>}` to links pointing at a known platform.
///
/// The host must be `<platform>.com`, optionally with a scheme and `www.`.
/// Platforms on other domains (`youtu.be`) are not matched. A platform
/// with a blank class falls back to its capitalized name.
/// Images and links already followed by an attribute block are skipped.
#[must_use]
pub fn known_platform_links(text: &str, links: &KnownLinks) -> String {
    let Some(re) = platform_regex(links) else {
        return text.to_owned();
    };

    re.replace_all(text, |caps: &Captures| {
        let whole = &caps[0];
        if caps.get(0).is_some_and(|m| is_annotated_or_image(text, m)) {
            return whole.to_owned();
        }

        let platform = caps[3].to_lowercase();
        let class = links
            .class_for(&platform)
            .filter(|class| !class.is_empty())
            .map_or_else(|| capitalize(&platform), str::to_owned);
        format!("{}({}){{.lnk{class}}}", &caps[1], &caps[2])
    })
    .into_owned()
}

/// Append `{.lnkPDF}` to links whose target ends in `.pdf`.
#[must_use]
pub fn pdf_links(text: &str) -> String {
    PDF_RE
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            match caps.get(0) {
                Some(m) if !is_annotated_or_image(text, m) => format!("{whole}{{.lnkPDF}}"),
                _ => whole.to_owned(),
            }
        })
        .into_owned()
}

/// Link pattern for the platforms in `links`, or `None` when there are none.
fn platform_regex(links: &KnownLinks) -> Option<Regex> {
    if links.is_empty() {
        return None;
    }

    let platforms = links
        .platforms()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    let pattern =
        format!(r"(?i)(\[[^\[\]]+\])\(((?:https?://)?(?:www\.)?({platforms})\.com[^)]*)\)");

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid known-link pattern, skipping link classes");
            None
        }
    }
}

/// Whether the link matched at `m` is an image (`![…](…)`) or already
/// carries an attribute block.
fn is_annotated_or_image(text: &str, m: Match<'_>) -> bool {
    text[..m.start()].ends_with('!') || has_attribute_block(&text[m.end()..])
}

/// Whether `rest` starts with a `{...}` attribute block.
fn has_attribute_block(rest: &str) -> bool {
    rest.strip_prefix('{').is_some_and(|r| r.contains('}'))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
