use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use nb_core::{Article, Error, Result};
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::sort::{stable_sort, SortOrder};

/// Time windows, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Day,
    Week,
    Month,
    All,
}

impl Period {
    pub const ASCENDING: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "24h",
            Period::Week => "7d",
            Period::Month => "30d",
            Period::All => "all",
        }
    }

    /// `None` for the unbounded window.
    pub fn window(&self) -> Option<Duration> {
        match self {
            Period::Day => Some(Duration::hours(24)),
            Period::Week => Some(Duration::days(7)),
            Period::Month => Some(Duration::days(30)),
            Period::All => None,
        }
    }

    /// Windows to try, starting with `self` and widening in fixed order.
    /// Narrower windows are never retried: they select a subset of a window
    /// that already came back empty.
    pub fn relax_sequence(&self) -> Vec<Period> {
        Self::ASCENDING
            .into_iter()
            .filter(|period| period >= self)
            .collect()
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Period::ASCENDING
            .into_iter()
            .find(|period| period.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidPeriod(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic restriction for a read query. `"All"` disables the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TopicFilter {
    #[default]
    All,
    Only(String),
}

impl TopicFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn matches(&self, topic: &str) -> bool {
        match self {
            TopicFilter::All => true,
            TopicFilter::Only(wanted) => wanted == topic,
        }
    }
}

impl FromStr for TopicFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == Self::ALL_LABEL {
            Ok(TopicFilter::All)
        } else {
            Ok(TopicFilter::Only(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub topic: TopicFilter,
    pub period: Period,
    pub keyword: String,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            topic: TopicFilter::All,
            period: Period::Day,
            keyword: String::new(),
        }
    }
}

/// Tells the reader the window they asked for was not the one used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxNotice {
    Expanded { requested: Period, used: Period },
    Exhausted { requested: Period },
}

impl fmt::Display for RelaxNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelaxNotice::Expanded { requested, used } => {
                write!(f, "Period expanded automatically: {} → {}", requested, used)
            }
            RelaxNotice::Exhausted { requested } => write!(
                f,
                "No matching articles from {} up to the widest window ({})",
                requested,
                Period::All
            ),
        }
    }
}

impl Serialize for RelaxNotice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub items: Vec<Article>,
    pub badge: Option<RelaxNotice>,
}

pub fn filter_with_auto_relax(articles: &[Article], query: &ArticleQuery) -> Result<FilterOutcome> {
    filter_with_auto_relax_at(articles, query, Utc::now())
}

/// Applies the query, widening the time window until something matches.
/// Results come back newest first. An empty result is not an error; an
/// unparseable `published_at` checked against a bounded window is.
pub fn filter_with_auto_relax_at(
    articles: &[Article],
    query: &ArticleQuery,
    now: DateTime<Utc>,
) -> Result<FilterOutcome> {
    let keyword = query.keyword.trim().to_lowercase();

    for period in query.period.relax_sequence() {
        let matched = filter_window(articles, &query.topic, period, &keyword, now)?;
        debug!("Window {} matched {} articles", period, matched.len());
        if matched.is_empty() {
            continue;
        }

        let badge = (period != query.period).then_some(RelaxNotice::Expanded {
            requested: query.period,
            used: period,
        });
        if let Some(notice) = &badge {
            info!("{}", notice);
        }
        return Ok(FilterOutcome {
            items: stable_sort(matched, SortOrder::Latest),
            badge,
        });
    }

    Ok(FilterOutcome {
        items: Vec::new(),
        badge: Some(RelaxNotice::Exhausted {
            requested: query.period,
        }),
    })
}

fn filter_window(
    articles: &[Article],
    topic: &TopicFilter,
    period: Period,
    keyword: &str,
    now: DateTime<Utc>,
) -> Result<Vec<Article>> {
    // a cutoff before the earliest representable instant bounds nothing
    let cutoff = period
        .window()
        .and_then(|window| now.checked_sub_signed(window));
    let mut matched = Vec::new();

    for article in articles {
        if !topic.matches(&article.topic) {
            continue;
        }
        if let Some(cutoff) = cutoff {
            if article.published_at_utc()? < cutoff {
                continue;
            }
        }
        if !keyword.is_empty() && !article.search_text().to_lowercase().contains(keyword) {
            continue;
        }
        matched.push(article.clone());
    }
    Ok(matched)
}
