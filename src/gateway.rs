//! oEmbed gateway: fetch a post's author display name and text via the
//! publish.twitter.com oEmbed endpoint. The only networked code in the
//! crate; everything it hands back is plain strings for the extractor.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use comiket_types::TwitterUser;

const OEMBED_ENDPOINT: &str = "https://publish.twitter.com/oembed";
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Not a twitter.com/x.com post URL, or no username in the path.
    #[error("not a recognizable post URL")]
    InvalidUrl,
    /// The oEmbed request failed. Distinct from "no location found":
    /// callers may retry or fall back to a username-only user.
    #[error("oEmbed fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    author_name: Option<String>,
    html: Option<String>,
}

// ── Pure helpers ───────────────────────────────────────────────────

/// Username from a post URL path: the first path segment, unless it is
/// the "i" pseudo-user used for non-profile routes.
pub fn extract_username_from_url(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    let first = parsed.path_segments()?.next()?;
    if first.is_empty() || first == "i" {
        return None;
    }
    Some(first.to_string())
}

/// Split an oEmbed author string "Display Name (@user)" into the display
/// name and the optional username.
pub fn parse_author_name(author: &str) -> (String, Option<String>) {
    static RE_AUTHOR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(.+?)(?:\s*\(@?(.+?)\))?$").unwrap());

    match RE_AUTHOR.captures(author) {
        Some(caps) => {
            let name = caps[1].to_string();
            let username = caps.get(2).map(|m| m.as_str().to_string());
            (name, username)
        }
        None => (author.to_string(), None),
    }
}

/// Reduce the oEmbed blockquote HTML to the plain tweet text.
pub fn extract_tweet_content(html: &str) -> String {
    static RE_BLOCKQUOTE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<blockquote[^>]*>(.*?)</blockquote>").unwrap());
    static RE_PARAGRAPH: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap());
    static RE_ANCHOR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"<a[^>]*href="[^"]*"[^>]*>([^<]*)</a>"#).unwrap());
    static RE_BR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
    static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

    let Some(blockquote) = RE_BLOCKQUOTE.captures(html) else {
        return String::new();
    };
    let Some(paragraph) = RE_PARAGRAPH.captures(blockquote.get(1).map_or("", |m| m.as_str()))
    else {
        return String::new();
    };

    let text = paragraph.get(1).map_or("", |m| m.as_str());
    let text = RE_ANCHOR.replace_all(text, "$1");
    let text = RE_BR.replace_all(&text, "\n");
    let text = RE_TAG.replace_all(&text, "");

    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

// ── Fetch ──────────────────────────────────────────────────────────

/// Fetch the post author via oEmbed.
///
/// `InvalidUrl` means the URL is not a twitter.com/x.com post; `Fetch`
/// means the request itself failed (the caller decides whether to retry
/// or fall back to a username-only user built from the URL).
pub fn fetch_twitter_user(tweet_url: &str) -> Result<TwitterUser, GatewayError> {
    if !tweet_url.contains("twitter.com") && !tweet_url.contains("x.com") {
        return Err(GatewayError::InvalidUrl);
    }
    let username_from_url =
        extract_username_from_url(tweet_url).ok_or(GatewayError::InvalidUrl)?;

    // x.com does not serve oEmbed; the twitter.com host still does.
    let modified_url = tweet_url.replace("x.com", "twitter.com");
    let embed_url = Url::parse_with_params(
        OEMBED_ENDPOINT,
        &[
            ("url", modified_url.as_str()),
            ("omit_script", "true"),
            ("hide_media", "false"),
        ],
    )
    .map_err(|_| GatewayError::InvalidUrl)?;

    let response = reqwest::blocking::Client::new()
        .get(embed_url)
        .header(USER_AGENT, BROWSER_UA)
        .send()?
        .error_for_status()?;
    let data: OEmbedResponse = response.json()?;

    let author = data.author_name.unwrap_or_default();
    let (display_name, username) = parse_author_name(&author);
    let display_name = if display_name.is_empty() {
        "Unknown".to_string()
    } else {
        display_name
    };
    let username = username
        .unwrap_or(username_from_url)
        .trim_start_matches('@')
        .to_string();

    let tweet_content = data.html.as_deref().map(extract_tweet_content).unwrap_or_default();

    Ok(TwitterUser {
        username,
        display_name,
        tweet_content,
        tweet_images: None,
    })
}

/// The user to fall back to when the oEmbed fetch fails but the URL was
/// valid: username only, no display name or text to parse.
pub fn fallback_user(username: &str) -> TwitterUser {
    let username = username.trim_start_matches('@').to_string();
    TwitterUser {
        display_name: username.clone(),
        username,
        tweet_content: String::new(),
        tweet_images: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_from_post_url() {
        assert_eq!(
            extract_username_from_url("https://x.com/shirayama_tae/status/1"),
            Some("shirayama_tae".into())
        );
        assert_eq!(
            extract_username_from_url("https://twitter.com/ogipote"),
            Some("ogipote".into())
        );
        // "i" routes are not profiles
        assert_eq!(extract_username_from_url("https://x.com/i/status/1"), None);
        assert_eq!(extract_username_from_url("not a url"), None);
    }

    #[test]
    fn author_name_with_handle() {
        let (name, user) = parse_author_name("白山たえ*日曜東5「ニ24ab」C106 (@shirayama)");
        assert_eq!(name, "白山たえ*日曜東5「ニ24ab」C106");
        assert_eq!(user.as_deref(), Some("shirayama"));
    }

    #[test]
    fn author_name_without_handle() {
        let (name, user) = parse_author_name("荻pote");
        assert_eq!(name, "荻pote");
        assert_eq!(user, None);
    }

    #[test]
    fn tweet_content_is_stripped_to_text() {
        let html = concat!(
            r#"<blockquote class="twitter-tweet"><p lang="ja">新刊あります<br>"#,
            r#"詳細は<a href="https://t.co/x">こちら</a> &amp; 会場で</p>"#,
            r#"&mdash; 白山たえ (@shirayama)</blockquote>"#
        );
        assert_eq!(
            extract_tweet_content(html),
            "新刊あります\n詳細はこちら & 会場で"
        );
    }

    #[test]
    fn no_blockquote_means_empty() {
        assert_eq!(extract_tweet_content("<div>nope</div>"), "");
    }

    #[test]
    fn non_post_url_is_invalid() {
        assert!(matches!(
            fetch_twitter_user("https://example.com/foo"),
            Err(GatewayError::InvalidUrl)
        ));
        assert!(matches!(
            fetch_twitter_user("https://x.com/i/status/1"),
            Err(GatewayError::InvalidUrl)
        ));
    }

    #[test]
    fn fallback_user_strips_the_at() {
        let user = fallback_user("@ogipote");
        assert_eq!(user.username, "ogipote");
        assert_eq!(user.display_name, "ogipote");
    }
}
