use tracing::warn;
use url::Url;

/// Paths that point at a section front or home page rather than a story.
const INDEX_PATHS: &[&str] = &[
    "", "/", "/home", "/news", "/category", "/categories", "/topics", "/ai", "/science", "/tech",
];

const TRACKING_PREFIX: &str = "utm_";

/// Normalizes a URL into a key that compares equal across trivial variations:
/// case of scheme and host, repeated or trailing slashes, `utm_*` tracking
/// parameters and fragments. Never fails; input the `url` crate rejects is
/// normalized textually instead.
pub fn canonicalize(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) => canonicalize_parsed(parsed),
        Err(e) => {
            warn!("URL {:?} did not parse ({}), normalizing textually", trimmed, e);
            canonicalize_loose(trimmed)
        }
    }
}

fn canonicalize_parsed(mut parsed: Url) -> String {
    if let Some(host) = parsed.host_str() {
        let lowered = host.to_lowercase();
        if lowered != host {
            // Opaque hosts of non-special schemes keep their case otherwise.
            let _ = parsed.set_host(Some(&lowered));
        }
    }

    if !parsed.cannot_be_a_base() {
        let path = normalize_path(parsed.path());
        parsed.set_path(&path);
    }

    if parsed.query().is_some() {
        let kept: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| !key.starts_with(TRACKING_PREFIX))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(kept);
        }
    }

    parsed.set_fragment(None);
    parsed.to_string()
}

fn canonicalize_loose(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let (base, query) = match without_fragment.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (without_fragment, None),
    };

    let mut out = match base.split_once("://") {
        Some((scheme, rest)) => {
            let (host, path) = match rest.find('/') {
                Some(idx) => rest.split_at(idx),
                None => (rest, ""),
            };
            format!(
                "{}://{}{}",
                scheme.to_lowercase(),
                host.to_lowercase(),
                normalize_path(path)
            )
        }
        None => normalize_path(base),
    };

    let kept: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !key.starts_with(TRACKING_PREFIX)
        })
        .collect();
    if !kept.is_empty() {
        out.push('?');
        out.push_str(&kept.join("&"));
    }
    out
}

/// Collapses runs of `/` and drops a trailing slash unless the path is `/`.
fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Heuristic flag for whether a URL points at an individual story. Section
/// fronts and single-segment paths are rejected. Informational only.
pub fn is_probable_article(url: &str) -> bool {
    let raw_path = match Url::parse(url.trim()) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => loose_path(url.trim()),
    };
    let path = raw_path.trim_end_matches('/').to_lowercase();

    if INDEX_PATHS.contains(&path.as_str()) {
        return false;
    }
    path.split('/').filter(|segment| !segment.is_empty()).count() > 1
}

fn loose_path(raw: &str) -> String {
    let base = raw
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    match base.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|idx| rest[idx..].to_string()).unwrap_or_default(),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_utm_and_trailing_slash() {
        let got = canonicalize("https://Example.com/blog/post/?utm_source=x&a=1");
        assert_eq!(got, "https://example.com/blog/post?a=1");
    }

    #[test]
    fn test_keeps_other_params_in_order() {
        let got = canonicalize("https://a.com/p?z=1&utm_medium=m&b=2&utm_campaign=c&a=3");
        assert_eq!(got, "https://a.com/p?z=1&b=2&a=3");
    }

    #[test]
    fn test_only_utm_underscore_prefix_is_tracking() {
        assert_eq!(canonicalize("https://a.com/p?utm=1"), "https://a.com/p?utm=1");
    }

    #[test]
    fn test_drops_empty_query_and_fragment() {
        assert_eq!(
            canonicalize("  HTTPS://A.COM//x///y/?utm_source=feed#comments "),
            "https://a.com/x/y"
        );
    }

    #[test]
    fn test_root_path_is_kept() {
        assert_eq!(canonicalize("https://a.com"), "https://a.com/");
        assert_eq!(canonicalize("https://a.com///"), "https://a.com/");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "https://Example.com/blog/post/?utm_source=x&a=1",
            "https://a.com/p?q=hello world&x=%7E",
            "http://a.com:80//a//b//?b=&a=1#frag",
            "example.com/Path//to/?utm_x=1&k=v",
            "",
            "not a url at all",
            "mailto:someone@example.com?utm_source=x&subject=hi",
        ];
        for input in inputs {
            let once = canonicalize(input);
            assert_eq!(canonicalize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_unparseable_input_is_normalized_textually() {
        assert_eq!(
            canonicalize("Example.com/a//b/?utm_source=x&k=v#top"),
            "Example.com/a/b?k=v"
        );
    }

    #[test]
    fn test_probable_article() {
        assert!(is_probable_article("https://openai.com/blog/reasoning"));
        assert!(is_probable_article(
            "https://techcrunch.com/2026/02/24/openai-reasoning-model/"
        ));
        assert!(!is_probable_article("https://openai.com/"));
        assert!(!is_probable_article("https://openai.com/News/"));
        assert!(!is_probable_article("https://example.com/topics"));
        assert!(!is_probable_article("https://example.com/story"));
    }
}
