use aclflow_core::AclDocument;
use colored::Colorize;
use std::path::Path;

/// 2つのACLポリシーが意味的に等価か判定する
///
/// 等価なら終了コード0、差分があれば1を返す。
pub fn run(old: &Path, new: &Path) -> anyhow::Result<()> {
    let old_doc = parse_file(old)?;
    let new_doc = parse_file(new)?;

    if aclflow_core::equivalent(&old_doc, &new_doc) {
        println!("{} {}", "=".green(), "2つのACLポリシーは等価です".green());
        Ok(())
    } else {
        println!("{} {}", "~".yellow(), "ACLポリシーに差分があります".yellow());
        anyhow::bail!("差分が検出されました");
    }
}

fn parse_file(path: &Path) -> anyhow::Result<AclDocument> {
    let text = super::read_policy_file(path)?;
    aclflow_core::parse(&text).map_err(|errors| {
        eprintln!("{} {}:", "✗ 無効なACLポリシー".red(), path.display());
        for error in &errors {
            eprintln!("  - {error}");
        }
        anyhow::anyhow!("{} は有効なACLポリシーではありません", path.display())
    })
}
