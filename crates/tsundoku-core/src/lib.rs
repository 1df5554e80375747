pub mod config;
pub mod error;
pub mod models;
pub mod timeline;
pub mod view;

pub use error::CoreError;
pub use models::{
    CollectionFetchResult, CollectionItem, CollectionKind, StatusCategory, TypeCategory,
};
