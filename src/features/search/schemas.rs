use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use url::form_urlencoded;
use validator::Validate;

use crate::utilities::errors::AppError;

/// Display-tier constant: the listing page always shows five cards per page.
pub const PAGE_SIZE: u32 = 5;

// -- =====================
// -- QUERY
// -- =====================

/// Canonical search state of the listing page. Rebuilt from scratch on every
/// navigation event, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub location: Option<String>,
    pub location_id: Option<i64>,
    pub host_id: Option<i64>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub guests: Option<u32>,
    pub beds: Option<u32>,
    pub bathrooms: Option<u32>,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            name: None,
            location: None,
            location_id: None,
            host_id: None,
            from_date: None,
            to_date: None,
            min_price: None,
            max_price: None,
            guests: None,
            beds: None,
            bathrooms: None,
            page_number: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl SearchQuery {
    /// True when some location-ish filter scopes the result set. Drives the
    /// empty-state copy, not the outbound request.
    pub fn has_location_filter(&self) -> bool {
        self.host_id.is_some() || self.location_id.is_some() || self.location.is_some()
    }

    /// Encode into the canonical URL query string. `page` is omitted on the
    /// first page so the canonical first-page URL stays pager-param-free.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(name) = &self.name {
            serializer.append_pair("name", name);
        }
        if let Some(location) = &self.location {
            serializer.append_pair("location", location);
        }
        if let Some(location_id) = self.location_id {
            serializer.append_pair("locationId", &location_id.to_string());
        }
        if let Some(host_id) = self.host_id {
            serializer.append_pair("hostId", &host_id.to_string());
        }
        if let Some(from_date) = self.from_date {
            serializer.append_pair("startDate", &from_date.format("%Y-%m-%d").to_string());
        }
        if let Some(to_date) = self.to_date {
            serializer.append_pair("endDate", &to_date.format("%Y-%m-%d").to_string());
        }
        if let Some(guests) = self.guests {
            serializer.append_pair("guests", &guests.to_string());
        }
        if let Some(min_price) = self.min_price {
            serializer.append_pair("minPrice", &min_price.to_string());
        }
        if let Some(max_price) = self.max_price {
            serializer.append_pair("maxPrice", &max_price.to_string());
        }
        if let Some(beds) = self.beds {
            serializer.append_pair("beds", &beds.to_string());
        }
        if let Some(bathrooms) = self.bathrooms {
            serializer.append_pair("bathrooms", &bathrooms.to_string());
        }
        if self.page_number > 1 {
            serializer.append_pair("page", &self.page_number.to_string());
        }

        serializer.finish()
    }
}

// -- =====================
// -- OUT
// -- =====================

/// Body of the remote search operation. The search API owns all filtering,
/// sorting, and pagination semantics; this only shapes the request.
#[skip_serializing_none]
#[derive(Serialize, Validate, Default, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub name: Option<String>,
    pub host_id: Option<i64>,
    pub location_id: Option<i64>,
    pub location: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub beds: Option<u32>,
    pub bathrooms: Option<u32>,
    #[validate(range(min = 1))]
    pub page_number: u32,
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,
}

// -- =====================
// -- IN
// -- =====================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub price_per_night: Option<f64>,
    pub beds: Option<i32>,
    pub bathrooms: Option<i32>,
    pub thumbnail_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// The search API answers in one of two shapes: a bare listing array with no
/// pagination metadata, or a paged envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum SearchResponse {
    Paged {
        data: Vec<Listing>,
        pagination: Pagination,
    },
    Bare(Vec<Listing>),
}

/// One page of results, replaced wholesale on each fetch. `pagination` is
/// absent when the API returned a bare array, in which case the array is the
/// complete result set and no pager is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<Listing>,
    pub pagination: Option<Pagination>,
}

impl From<SearchResponse> for PageResult {
    fn from(response: SearchResponse) -> Self {
        match response {
            SearchResponse::Paged { data, pagination } => Self {
                items: data,
                pagination: Some(pagination),
            },
            SearchResponse::Bare(items) => Self {
                items,
                pagination: None,
            },
        }
    }
}

impl PageResult {
    /// Count shown in the "Total: N" label.
    pub fn total_count(&self) -> u64 {
        match &self.pagination {
            Some(pagination) => pagination.total_count,
            None => self.items.len() as u64,
        }
    }

    pub fn shows_pager(&self) -> bool {
        self.pagination
            .map(|pagination| pagination.total_pages > 1)
            .unwrap_or(false)
    }
}

// -- =====================
// -- VIEW STATE
// -- =====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoResultsForLocation,
    NoListingsYet,
}

/// What the listing page renders. A fetch failure fails closed: the listing
/// set is emptied, pagination cleared, and only the message survives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingView {
    pub listings: Vec<Listing>,
    pub pagination: Option<Pagination>,
    pub error: Option<String>,
}

impl ListingView {
    pub fn from_result(result: PageResult) -> Self {
        Self {
            listings: result.items,
            pagination: result.pagination,
            error: None,
        }
    }

    pub fn failed(error: &AppError) -> Self {
        Self {
            listings: Vec::new(),
            pagination: None,
            error: Some(error.user_message()),
        }
    }

    /// Empty result sets are not errors; the copy depends on whether a
    /// location filter was active.
    pub fn empty_state(&self, query: &SearchQuery) -> Option<EmptyState> {
        if !self.listings.is_empty() || self.error.is_some() {
            return None;
        }
        if query.has_location_filter() {
            Some(EmptyState::NoResultsForLocation)
        } else {
            Some(EmptyState::NoListingsYet)
        }
    }
}
