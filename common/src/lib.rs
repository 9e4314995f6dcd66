//! Photo Gallery Common Library
//!
//! サーバー・CLI・Web(WASM)で共有される型とギャラリー状態管理

pub mod controller;
pub mod debounce;
pub mod error;
pub mod pagination;
pub mod types;

pub use controller::{FetchOutcome, FetchRequest, GalleryController, GalleryView};
pub use debounce::{DebounceTicket, Debouncer, SEARCH_DEBOUNCE};
pub use error::{Error, Result};
pub use pagination::{page_numbers, total_pages, CursorLookup, PageCursors};
pub use types::{
    api_error_message, DeleteRequest, ErrorBody, ImageResource, ListQuery, ListResponse,
    PublicConfig, DEFAULT_PAGE_SIZE, MAX_RESULTS_LIMIT,
};
