use chrono::{DateTime, TimeZone, Utc};
use nb_analysis::prelude::*;
use nb_analysis::{
    canonicalize, cluster_articles_at, dedupe_articles, filter_with_auto_relax_at, stable_sort,
    title_similarity, RelaxNotice,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 25, 0, 0, 0).unwrap()
}

fn article(id: &str, title: &str, url: &str, content: Option<&str>) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        source_name: "Wire".to_string(),
        source_url: url.to_string(),
        published_at: "2026-02-24T10:00:00Z".to_string(),
        topic: "AI".to_string(),
        canonical_url: url.to_string(),
        original_url: url.to_string(),
        is_valid_source_url: true,
        source_url_status_code: Some(200),
        summary: String::new(),
        key_points: vec![],
        keywords: vec![],
        content_text: content.map(str::to_string),
        cluster_id: None,
        content_hash: None,
    }
}

fn ids(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn canonical_url_scenario() {
    let url = "https://Example.com/blog/post/?utm_source=x&a=1";
    let canonical = canonicalize(url);
    assert_eq!(canonical, "https://example.com/blog/post?a=1");
    assert_eq!(canonicalize(&canonical), canonical);
}

#[test]
fn dedupe_scenario() {
    let articles = vec![
        article("1", "OpenAI model released", "https://a.com/p?utm=1", Some("same content")),
        article("2", "OpenAI model released", "https://a.com/p", Some("same content")),
        article("3", "OpenAI model released today", "https://b.com/q", Some("different")),
    ];
    let out = dedupe_articles(articles, 0.95);
    assert_eq!(ids(&out), vec!["1", "3"]);
}

#[test]
fn dedupe_merges_identical_bodies_after_whitespace_and_case() {
    let articles = vec![
        article("1", "Battery record", "https://a.com/x/1", Some("Solid  state\nbattery")),
        article("2", "Unrelated headline", "https://b.com/y/2", Some("solid state BATTERY ")),
    ];
    assert_eq!(ids(&dedupe_articles(articles, 0.92)), vec!["1"]);
}

#[test]
fn title_similarity_is_symmetric() {
    let pairs = [
        ("OpenAI model released", "OpenAI model released today"),
        ("abc", "cab"),
        ("", "anything"),
    ];
    for (a, b) in pairs {
        assert_eq!(title_similarity(a, b), title_similarity(b, a));
        assert_eq!(title_similarity(a, a), 1.0);
    }
}

#[test]
fn cluster_scenario() {
    let mut a = article("1", "alpha bravo charlie delta echo", "", None);
    a.summary = "foxtrot golf hotel india juliet".to_string();
    let mut b = article("2", "alpha bravo charlie kilo lima", "", None);
    b.summary = "mike november oscar papa quebec".to_string();
    let c = article("3", "weather report", "", None);

    let (items, clusters) = cluster_articles_at(vec![a, b, c], 0.28, now());
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].cluster_id, "cluster-001");
    let unclustered: Vec<&str> = items
        .iter()
        .filter(|a| a.cluster_id.is_none())
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(unclustered, vec!["3"]);
}

#[test]
fn cluster_membership_ignores_input_permutation() {
    let titles = [
        "rocket launch orbit",
        "quantum network qubit",
        "rocket launch delayed",
        "weather report",
        "quantum network record",
    ];
    let articles: Vec<Article> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| article(&i.to_string(), t, "", None))
        .collect();
    let mut reversed = articles.clone();
    reversed.reverse();

    let members = |clusters: Vec<Cluster>| {
        let mut groups: Vec<Vec<String>> = clusters
            .into_iter()
            .map(|c| {
                let mut ids = c.article_ids;
                ids.sort();
                ids
            })
            .collect();
        groups.sort();
        groups
    };
    let (_, forward) = cluster_articles_at(articles, 0.5, now());
    let (_, backward) = cluster_articles_at(reversed, 0.5, now());
    assert_eq!(members(forward), members(backward));
}

#[test]
fn auto_relax_widens_in_order_and_stops_at_first_hit() {
    let mut week = article("week", "Story", "", None);
    week.published_at = "2026-02-20T00:00:00Z".to_string();
    let mut month = article("month", "Story", "", None);
    month.published_at = "2026-02-01T00:00:00Z".to_string();

    let query = ArticleQuery {
        topic: TopicFilter::All,
        period: Period::Day,
        keyword: String::new(),
    };
    let outcome = filter_with_auto_relax_at(&[month, week], &query, now()).unwrap();
    assert_eq!(ids(&outcome.items), vec!["week"]);
    assert_eq!(
        outcome.badge,
        Some(RelaxNotice::Expanded {
            requested: Period::Day,
            used: Period::Week
        })
    );
}

#[test]
fn sort_orders_are_mirror_images() {
    let mut articles = Vec::new();
    for (id, published) in [("a", "2026-02-24T10:00:00Z"), ("b", "2026-02-22T10:00:00Z"), ("c", "bogus")] {
        let mut a = article(id, "Story", "", None);
        a.published_at = published.to_string();
        articles.push(a);
    }
    let latest = stable_sort(articles.clone(), SortOrder::Latest);
    assert_eq!(ids(&latest), vec!["a", "b", "c"]);
    let mut oldest = stable_sort(articles, SortOrder::Oldest);
    oldest.reverse();
    assert_eq!(latest, oldest);
}

#[test]
fn pipeline_end_to_end() {
    let mut first = article("1", "OpenAI model released", "https://a.com/news/p?utm=1", Some("same content"));
    first.keywords = vec!["openai".to_string(), "model".to_string()];
    let mut dup = article("2", "OpenAI model released", "https://a.com/news/p", Some("same content"));
    dup.keywords = first.keywords.clone();
    let mut follow_up = article("3", "OpenAI model released today", "https://b.com/news/q", Some("different"));
    follow_up.keywords = vec!["openai".to_string(), "release".to_string()];
    let mut science = article("4", "Battery electrolyte study", "https://c.com/lab/4", None);
    science.topic = "ScienceTech".to_string();

    let pipeline = Pipeline::new(AnalysisConfig {
        title_threshold: 0.95,
        ..AnalysisConfig::default()
    })
    .unwrap();
    let feed = pipeline.run_at(vec![first, dup, follow_up, science], now()).unwrap();

    assert_eq!(ids(&feed.items), vec!["1", "3", "4"]);
    assert_eq!(feed.clusters.len(), 1);
    assert_eq!(feed.clusters[0].cluster_title, "OpenAI model released");
    assert_eq!(feed.trends.keywords_top[0].keyword, "openai");
    assert_eq!(feed.trends.keywords_top[0].count, 2);
    assert_eq!(feed.trends.topic_ratio.total(), 3);
    assert_eq!(feed.trends.topic_ratio.science_tech, 1);
}
