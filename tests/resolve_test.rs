use chrono::NaiveDate;
use serde_json::json;

use condotel_search::features::search::{
    NavigationContext, SearchQuery, SearchScope, build_request, page_transition, resolve,
    search_scope,
};

#[test]
fn query_round_trips_through_the_url() {
    let ctx = NavigationContext::from_query_string(
        "?name=Pearl&searchLocation=Da+Nang&startDate=2024-05-10&endDate=2024-05-14\
         &guests=2&minPrice=35.5&maxPrice=120&beds=2&bathrooms=1&page=3",
    );
    let query = resolve(&ctx);

    assert_eq!(query.name.as_deref(), Some("Pearl"));
    assert_eq!(query.location.as_deref(), Some("Da Nang"));
    assert_eq!(
        query.from_date,
        Some(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
    );
    assert_eq!(query.min_price, Some(35.5));
    assert_eq!(query.page_number, 3);

    let reparsed = resolve(&NavigationContext::from_query_string(
        &query.to_query_string(),
    ));
    assert_eq!(reparsed, query);
}

#[test]
fn date_shaped_location_is_dropped_but_the_stay_window_survives() {
    // A prior page accidentally navigated with the check-in date in the
    // location slot.
    let ctx = NavigationContext::from_query_string("?location=10/05/2024&startDate=2024-05-10");
    let query = resolve(&ctx);

    assert_eq!(query.location, None);
    assert_eq!(
        query.from_date,
        Some(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
    );
    assert!(!query.has_location_filter());
}

#[test]
fn navigation_state_fills_gaps_the_url_left() {
    let ctx = NavigationContext::from_query_string("?searchLocation=Da%20Nang&city=2024-01-01")
        .with_state("locationId", json!(12))
        .with_state("guests", json!("3"));
    let query = resolve(&ctx);

    assert_eq!(query.location.as_deref(), Some("Da Nang"));
    assert_eq!(query.location_id, Some(12));
    assert_eq!(query.guests, Some(3));

    // locationId dominates the free-text label both in scope and on the wire.
    assert_eq!(search_scope(&query), SearchScope::LocationId(12));
    let request = build_request(&query);
    assert_eq!(request.location_id, Some(12));
    assert_eq!(request.location, None);
}

#[test]
fn host_listings_page_keeps_the_guest_filters() {
    let ctx = NavigationContext::from_query_string(
        "?hostId=41&locationId=5&startDate=2024-06-01&endDate=2024-06-04&beds=2",
    );
    let query = resolve(&ctx);
    assert_eq!(search_scope(&query), SearchScope::Host(41));

    let request = build_request(&query);
    assert_eq!(request.host_id, Some(41));
    assert_eq!(request.location_id, Some(5));
    assert_eq!(
        request.from_date,
        Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    );
    assert_eq!(request.beds, Some(2));
}

#[test]
fn pager_navigation_keeps_the_search_and_canonicalizes_page_one() {
    let query_string = "searchLocation=Hue&minPrice=25&page=4";
    let back_to_first = page_transition(query_string, 1);
    assert_eq!(back_to_first, "searchLocation=Hue&minPrice=25");

    // page=1 via omitted parameter and via explicit parameter must produce
    // identical fetch requests.
    let implicit = resolve(&NavigationContext::from_query_string(&back_to_first));
    let explicit = resolve(&NavigationContext::from_query_string(
        "searchLocation=Hue&minPrice=25&page=1",
    ));
    assert_eq!(build_request(&implicit), build_request(&explicit));

    let forward = page_transition(&back_to_first, 2);
    assert_eq!(forward, "searchLocation=Hue&minPrice=25&page=2");
}

#[test]
fn outbound_request_serializes_camel_case_and_skips_absent_filters() {
    let query = SearchQuery {
        name: Some("Pearl".to_string()),
        location: Some("Da Nang".to_string()),
        min_price: Some(40.0),
        page_number: 2,
        ..Default::default()
    };
    let body = serde_json::to_value(build_request(&query)).unwrap();

    assert_eq!(
        body,
        json!({
            "name": "Pearl",
            "location": "Da Nang",
            "minPrice": 40.0,
            "pageNumber": 2,
            "pageSize": 5
        })
    );
}
