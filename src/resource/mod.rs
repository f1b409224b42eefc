//! Resource loading: fetching, parsing, caching, and redirect resolution.
pub mod cache;
pub mod document;
pub mod error;
pub mod fetch;
pub mod loader;

pub use cache::ResourceCache;
pub use document::{
    KeyShape,
    LocaleEntry,
    RawResourceDocument,
};
pub use error::{
    FetchError,
    LoadError,
};
pub use fetch::{
    FsFetcher,
    MemoryFetcher,
    ResourceFetcher,
};
pub use loader::ResourceLoader;
