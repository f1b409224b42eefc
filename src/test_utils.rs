//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use crate::document::{
    Document,
    MemoryDocument,
    NodeId,
};
use crate::types::{
    Arguments,
    EffectiveTable,
};

/// テスト用の EffectiveTable を作成する
///
/// # Arguments
/// * `entries` - キーと値のペア
pub(crate) fn effective_table(entries: &[(&str, &str)]) -> EffectiveTable {
    entries.iter().copied().collect()
}

/// テスト用の Arguments を作成する
pub(crate) fn arguments(entries: &[(&str, &str)]) -> Arguments {
    entries.iter().copied().collect()
}

/// ルート直下に `data-l10n-id` 付きの要素を追加する
///
/// # Returns
/// 追加した要素
pub(crate) fn marked_element(doc: &mut MemoryDocument, tag: &str, key: &str) -> NodeId {
    let root = doc.root();
    doc.element_with(root, tag, &[("data-l10n-id", key)])
}
