//! l10n-resolver
//!
//! ドキュメント中のマーク付き要素を、ロケール別の翻訳リソースから解決した文字列で置き換える。
//!
//! 1. [`Localizer::index`] で `<link>` からリソースを発見する
//! 2. [`Localizer::localize`] でロケールを読み込み、フォールバック順にマージし、要素へ適用する

pub mod binding;
pub mod config;
pub mod discovery;
pub mod document;
pub mod localizer;
pub mod logging;
pub mod merge;
pub mod resource;
pub mod substitution;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use binding::{
    ApplyReport,
    BindingApplier,
    TargetProperty,
    translate_element,
};
pub use config::LocalizerSettings;
pub use document::{
    Document,
    MemoryDocument,
};
pub use localizer::{
    LocalizeError,
    Localizer,
};
pub use resource::{
    FsFetcher,
    LoadError,
    MemoryFetcher,
    ResourceFetcher,
    ResourceLoader,
};
pub use types::{
    Arguments,
    EffectiveTable,
    Locale,
    LocaleList,
    ResourceId,
};
