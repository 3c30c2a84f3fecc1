//! Media module for export parsing and link validation.

pub mod parser;
pub mod record;
pub mod url;

pub use parser::{
    extract_favorites, extract_own_items, extract_records, load_document, lookup_list,
};
pub use record::VideoRecord;
pub use url::is_supported_url;
