pub mod client;
pub mod navigation;
pub mod pager;
pub mod resolver;
pub mod schemas;

pub use client::{ListingFetcher, SearchApi};
pub use navigation::NavigationContext;
pub use pager::{PagerControls, PagerItem, page_transition, pager_items};
pub use resolver::{SearchScope, build_request, resolve, search_scope};
pub use schemas::{
    EmptyState, Listing, ListingView, PAGE_SIZE, PageResult, Pagination, SearchQuery,
    SearchRequest,
};
