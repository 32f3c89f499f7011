use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::features::search::navigation::NavigationContext;
use crate::features::search::schemas::{PAGE_SIZE, SearchQuery, SearchRequest};

/// Upstream call sites (hero search form, map page, direct links) use
/// inconsistent parameter names for the same concept. Each filter reads its
/// whole alias set from the URL first, then from navigation state.
const LOCATION_ALIASES: [&str; 4] = ["location", "searchLocation", "locationName", "city"];
const NAME_ALIASES: [&str; 2] = ["name", "searchName"];
const LOCATION_ID_ALIASES: [&str; 3] = ["locationId", "searchLocationId", "cityId"];
const HOST_ID_ALIASES: [&str; 1] = ["hostId"];
const FROM_DATE_ALIASES: [&str; 2] = ["startDate", "fromDate"];
const TO_DATE_ALIASES: [&str; 2] = ["endDate", "toDate"];
const GUESTS_ALIASES: [&str; 1] = ["guests"];
const MIN_PRICE_ALIASES: [&str; 1] = ["minPrice"];
const MAX_PRICE_ALIASES: [&str; 1] = ["maxPrice"];
const BEDS_ALIASES: [&str; 1] = ["beds"];
const BATHROOMS_ALIASES: [&str; 1] = ["bathrooms"];
const PAGE_ALIASES: [&str; 1] = ["page"];

static DAY_FIRST_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[/-]\d{1,2}[/-]\d{4}$").expect("day-first date pattern"));
static YEAR_FIRST_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}[/-]\d{1,2}[/-]\d{1,2}$").expect("year-first date pattern"));

/// A known upstream bug places a date string into a location-named slot.
/// Values that are entirely date-shaped are never accepted as a location.
fn is_date_shaped(value: &str) -> bool {
    let trimmed = value.trim();
    DAY_FIRST_DATE.is_match(trimmed) || YEAR_FIRST_DATE.is_match(trimmed)
}

/// Build one unambiguous `SearchQuery` from the navigation context. Pure:
/// no I/O, no globals, a fresh value on every call.
pub fn resolve(ctx: &NavigationContext) -> SearchQuery {
    let query = SearchQuery {
        name: first_value(ctx, &NAME_ALIASES),
        location: resolve_location(ctx),
        location_id: first_positive_i64(ctx, &LOCATION_ID_ALIASES),
        host_id: first_positive_i64(ctx, &HOST_ID_ALIASES),
        from_date: first_date(ctx, &FROM_DATE_ALIASES),
        to_date: first_date(ctx, &TO_DATE_ALIASES),
        min_price: first_positive_f64(ctx, &MIN_PRICE_ALIASES),
        max_price: first_positive_f64(ctx, &MAX_PRICE_ALIASES),
        guests: first_positive_u32(ctx, &GUESTS_ALIASES),
        beds: first_positive_u32(ctx, &BEDS_ALIASES),
        bathrooms: first_positive_u32(ctx, &BATHROOMS_ALIASES),
        page_number: first_positive_u32(ctx, &PAGE_ALIASES).unwrap_or(1),
        page_size: PAGE_SIZE,
    };
    debug!(?query, "resolved search query");
    query
}

/// Tolerant merge of the location aliases, preferring availability over
/// rejection:
/// 1. collect every aliased value, URL pairs in encounter order first, then
///    navigation state in alias order;
/// 2. take the first candidate that is neither date-shaped nor blank;
/// 3. otherwise fall back to the first `.get()` hit in alias order, still
///    refusing date-shaped values.
fn resolve_location(ctx: &NavigationContext) -> Option<String> {
    let mut candidates: Vec<String> = ctx
        .query_pairs()
        .iter()
        .filter(|(key, _)| LOCATION_ALIASES.contains(&key.as_str()))
        .map(|(_, value)| value.clone())
        .collect();
    for alias in LOCATION_ALIASES {
        if let Some(value) = ctx.state_string(alias) {
            candidates.push(value);
        }
    }

    if let Some(hit) = candidates
        .iter()
        .find(|candidate| !is_date_shaped(candidate) && !candidate.trim().is_empty())
    {
        return Some(hit.clone());
    }

    let fallback = LOCATION_ALIASES
        .iter()
        .find_map(|alias| ctx.query_first(alias).map(str::to_string))
        .or_else(|| {
            LOCATION_ALIASES
                .iter()
                .find_map(|alias| ctx.state_string(alias))
        })?;
    if is_date_shaped(&fallback) {
        debug!(candidate = %fallback, "location candidate rejected as date-shaped");
        return None;
    }
    Some(fallback)
}

/// First non-blank value across the alias set, URL before state. Blank values
/// do not short-circuit the chain.
fn first_value(ctx: &NavigationContext, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|alias| {
            ctx.query_first(alias)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .or_else(|| {
            aliases.iter().find_map(|alias| {
                ctx.state_string(alias)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
            })
        })
}

// Malformed or non-positive numeric filters are silently treated as absent.

fn first_positive_i64(ctx: &NavigationContext, aliases: &[&str]) -> Option<i64> {
    first_value(ctx, aliases)?.parse::<i64>().ok().filter(|n| *n > 0)
}

fn first_positive_u32(ctx: &NavigationContext, aliases: &[&str]) -> Option<u32> {
    first_value(ctx, aliases)?.parse::<u32>().ok().filter(|n| *n > 0)
}

fn first_positive_f64(ctx: &NavigationContext, aliases: &[&str]) -> Option<f64> {
    first_value(ctx, aliases)?
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n > 0.0)
}

fn first_date(ctx: &NavigationContext, aliases: &[&str]) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&first_value(ctx, aliases)?, "%Y-%m-%d").ok()
}

// -- =====================
// -- FILTER PRECEDENCE
// -- =====================

/// Which named filter dominates the result set. `host` wins over both
/// location forms, `location-id` over the free-text label.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchScope {
    Host(i64),
    LocationId(i64),
    Location(String),
    Unscoped,
}

pub fn search_scope(query: &SearchQuery) -> SearchScope {
    if let Some(host_id) = query.host_id {
        return SearchScope::Host(host_id);
    }
    if let Some(location_id) = query.location_id {
        return SearchScope::LocationId(location_id);
    }
    if let Some(location) = &query.location {
        return SearchScope::Location(location.clone());
    }
    SearchScope::Unscoped
}

type FilterResolver = fn(&SearchQuery, &mut SearchRequest) -> bool;

/// Evaluated in priority order; each resolver either contributes fields to
/// the outbound request or contributes nothing. `host` dominates result
/// scoping but does not drop the location fields from the request;
/// `location-id` suppresses the free-text label.
const FILTER_RESOLVERS: &[(&str, FilterResolver)] = &[
    ("host", resolve_host),
    ("location-id", resolve_location_id),
    ("location", resolve_location_text),
    ("stay-window", resolve_stay_window),
    ("price-range", resolve_price_range),
    ("capacity", resolve_capacity),
];

pub fn build_request(query: &SearchQuery) -> SearchRequest {
    let mut request = SearchRequest {
        name: query.name.clone(),
        page_number: query.page_number,
        page_size: query.page_size,
        ..Default::default()
    };
    for (name, resolver) in FILTER_RESOLVERS {
        if resolver(query, &mut request) {
            debug!(filter = *name, "filter contributed to search request");
        }
    }
    request
}

fn resolve_host(query: &SearchQuery, request: &mut SearchRequest) -> bool {
    request.host_id = query.host_id;
    request.host_id.is_some()
}

fn resolve_location_id(query: &SearchQuery, request: &mut SearchRequest) -> bool {
    request.location_id = query.location_id;
    request.location_id.is_some()
}

fn resolve_location_text(query: &SearchQuery, request: &mut SearchRequest) -> bool {
    if request.location_id.is_some() {
        return false;
    }
    request.location = query.location.clone();
    request.location.is_some()
}

fn resolve_stay_window(query: &SearchQuery, request: &mut SearchRequest) -> bool {
    request.from_date = query.from_date;
    request.to_date = query.to_date;
    request.from_date.is_some() || request.to_date.is_some()
}

fn resolve_price_range(query: &SearchQuery, request: &mut SearchRequest) -> bool {
    request.min_price = query.min_price;
    request.max_price = query.max_price;
    request.min_price.is_some() || request.max_price.is_some()
}

fn resolve_capacity(query: &SearchQuery, request: &mut SearchRequest) -> bool {
    request.beds = query.beds;
    request.bathrooms = query.bathrooms;
    request.beds.is_some() || request.bathrooms.is_some()
}
