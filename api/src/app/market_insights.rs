//! Market insights
//!
//! Aggregate statistics over a set of products: per-category counts and
//! averages, overall totals, and a naive suggested price band.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::entities::{ArtistStats, Category, Product};
use crate::domain::ports::ProductFilter;
use crate::error::DomainError;

/// Time window for insights queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    Month,
    Year,
}

impl Timeframe {
    pub fn days(&self) -> i64 {
        match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
            Timeframe::Year => 365,
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            _ => Err(format!("Unknown timeframe: {}", s)),
        }
    }
}

/// Parsed insights query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightsQuery {
    pub category: Option<Category>,
    pub price_range: Option<(f64, f64)>,
    pub timeframe: Option<Timeframe>,
}

impl InsightsQuery {
    /// Parse raw query values. `all` (or absence) disables a filter; an
    /// unrecognised timeframe is ignored.
    pub fn parse(
        category: Option<&str>,
        price_range: Option<&str>,
        timeframe: Option<&str>,
    ) -> Result<Self, DomainError> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case("all") => None,
            Some(c) => Some(c.parse::<Category>().map_err(DomainError::Validation)?),
        };

        let price_range = match price_range.map(str::trim) {
            None | Some("") => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_price_range(r)?),
        };

        let timeframe = timeframe.and_then(|t| t.parse::<Timeframe>().ok());

        Ok(Self {
            category,
            price_range,
            timeframe,
        })
    }

    /// Translate into a repository filter relative to `now`
    pub fn to_filter(&self, now: DateTime<Utc>) -> ProductFilter {
        ProductFilter {
            category: self.category,
            min_price: self.price_range.map(|(min, _)| min),
            max_price: self.price_range.map(|(_, max)| max),
            created_after: self.timeframe.map(|t| now - Duration::days(t.days())),
            ..Default::default()
        }
    }
}

/// Parse `"min-max"` into an inclusive price range
fn parse_price_range(raw: &str) -> Result<(f64, f64), DomainError> {
    let invalid = || DomainError::Validation(format!("Invalid price range: {}", raw));

    let (min, max) = raw.split_once('-').ok_or_else(invalid)?;
    let min: f64 = min.trim().parse().map_err(|_| invalid())?;
    let max: f64 = max.trim().parse().map_err(|_| invalid())?;

    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(invalid());
    }
    Ok((min, max))
}

/// Statistics for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub average_price: f64,
    pub total_likes: i64,
    pub average_likes: f64,
}

/// Statistics across all matching products
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSummary {
    pub total_products: usize,
    pub average_price: f64,
    pub total_likes: i64,
    pub total_views: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub categories: Vec<Category>,
}

/// Suggested listing price range, in whole dollars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceBand {
    pub low: i64,
    pub high: i64,
}

impl PriceBand {
    pub fn around(average_price: f64) -> Self {
        Self {
            low: (average_price * 0.8).floor() as i64,
            high: (average_price * 1.2).floor() as i64,
        }
    }
}

/// Full insights report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketInsights {
    pub summary: MarketSummary,
    pub category_stats: Vec<CategoryStats>,
    pub suggested_price_band: PriceBand,
    pub analysis: String,
}

#[derive(Default)]
struct Accumulator {
    count: usize,
    price_sum: f64,
    likes: i64,
}

/// Aggregate products into an insights report
pub fn compute_insights(products: &[Product]) -> MarketInsights {
    let mut groups: BTreeMap<&'static str, (Category, Accumulator)> = BTreeMap::new();
    let mut summary = MarketSummary::default();
    let mut price_sum = 0.0;

    for product in products {
        let (_, acc) = groups
            .entry(product.category.as_str())
            .or_insert_with(|| (product.category, Accumulator::default()));
        acc.count += 1;
        acc.price_sum += product.price;
        acc.likes += product.like_count;

        summary.total_products += 1;
        summary.total_likes += product.like_count;
        summary.total_views += product.views;
        price_sum += product.price;
        summary.min_price = Some(summary.min_price.map_or(product.price, |m| m.min(product.price)));
        summary.max_price = Some(summary.max_price.map_or(product.price, |m| m.max(product.price)));
    }

    if summary.total_products > 0 {
        summary.average_price = price_sum / summary.total_products as f64;
    }
    // BTreeMap keys are display names, so this is alphabetical
    summary.categories = groups.values().map(|(c, _)| *c).collect();

    let mut category_stats: Vec<CategoryStats> = groups
        .into_values()
        .map(|(category, acc)| CategoryStats {
            category,
            count: acc.count,
            average_price: acc.price_sum / acc.count as f64,
            total_likes: acc.likes,
            average_likes: acc.likes as f64 / acc.count as f64,
        })
        .collect();
    // Stable sort keeps alphabetical order among equal counts
    category_stats.sort_by(|a, b| b.count.cmp(&a.count));

    let suggested_price_band = PriceBand::around(summary.average_price);
    let analysis = render_analysis(&summary, &category_stats, suggested_price_band);

    MarketInsights {
        summary,
        category_stats,
        suggested_price_band,
        analysis,
    }
}

fn render_analysis(
    summary: &MarketSummary,
    category_stats: &[CategoryStats],
    band: PriceBand,
) -> String {
    let most_popular = category_stats
        .first()
        .map(|s| s.category.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let trending: Vec<&str> = category_stats
        .iter()
        .take(3)
        .map(|s| s.category.as_str())
        .collect();

    format!(
        "Market Analysis Summary:\n\
         - Total Products: {}\n\
         - Average Price: ${:.2}\n\
         - Most Popular Category: {}\n\
         - Total Engagement: {} interactions\n\
         \n\
         Trending Categories: {}\n\
         \n\
         Price Recommendations: Based on current market trends, products in the ${}-${} range show optimal engagement.",
        summary.total_products,
        summary.average_price,
        most_popular,
        summary.total_likes + summary.total_views,
        trending.join(", "),
        band.low,
        band.high,
    )
}

/// Pick the top artists: at least one product, most likes, then views,
/// then followers
pub fn rank_top_artists(mut stats: Vec<ArtistStats>, limit: usize) -> Vec<ArtistStats> {
    stats.retain(|s| s.total_products >= 1);
    stats.sort_by(|a, b| {
        b.total_likes
            .cmp(&a.total_likes)
            .then_with(|| b.total_views.cmp(&a.total_views))
            .then_with(|| b.followers_count.cmp(&a.followers_count))
    });
    stats.truncate(limit);
    stats
}
