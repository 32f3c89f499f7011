//! Client-side search logic of the condotel booking marketplace listing page:
//! reconciles URL query parameters and navigation state into one canonical
//! search query, fetches one page of listings from the remote search API, and
//! exposes the pager contract the page renders.

pub mod features;
pub mod utilities;
