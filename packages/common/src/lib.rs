pub mod clipboard;
pub mod deep_link;
pub mod identifier;
pub mod qrx;

pub use identifier::normalize_qrx_id;
pub use qrx::{Entry, Media, MediaBuckets, MediaKind, NewsItem};
