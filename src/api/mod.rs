//! Backend API surface consumed by the runner

pub mod schema;

pub use schema::{
    is_canonical_uuid, BatchImageExtraction, ImageExtraction, NewsItem, NewsTicker, StatusCheck,
};
