//! サブコマンドの実装

pub mod apply;
pub mod canonicalize;
pub mod diff;
pub mod plan;
pub mod validate;

use anyhow::Context;
use std::path::Path;

/// ACLポリシーファイルを読み込む
pub(crate) fn read_policy_file(path: &Path) -> anyhow::Result<String> {
    tracing::debug!("reading policy file: {}", path.display());
    std::fs::read_to_string(path)
        .with_context(|| format!("ファイルを読み込めません: {}", path.display()))
}
