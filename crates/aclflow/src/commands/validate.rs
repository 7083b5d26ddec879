use colored::Colorize;
use std::path::Path;

/// ACLポリシーを検証し、全ての問題を一度に報告する
pub fn run(file: &Path) -> anyhow::Result<()> {
    let text = super::read_policy_file(file)?;

    match aclflow_core::parse(&text) {
        Ok(doc) => {
            println!(
                "{} {} (owner: {}, grants: {})",
                "✓".green(),
                "有効なACLポリシーです".green(),
                doc.owner.id,
                doc.grants.len()
            );
            Ok(())
        }
        Err(errors) => {
            eprintln!("{}", "✗ ACLポリシーが無効です:".red());
            for error in &errors {
                eprintln!("  - {error}");
            }
            anyhow::bail!("{} 件のエラーが見つかりました", errors.len());
        }
    }
}
