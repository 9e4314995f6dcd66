//! UIコンポーネント

pub mod footer;
pub mod header;
pub mod image_dialog;
pub mod image_grid;
pub mod pagination;
pub mod uploader;
