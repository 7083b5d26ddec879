use anyhow::Context;
use colored::Colorize;
use std::path::Path;

/// ACLポリシーを正規形に並べ替えて出力する
pub fn run(file: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let text = super::read_policy_file(file)?;

    let doc = match aclflow_core::parse(&text) {
        Ok(doc) => doc,
        Err(errors) => {
            eprintln!("{}", "✗ ACLポリシーが無効です:".red());
            for error in &errors {
                eprintln!("  - {error}");
            }
            anyhow::bail!("{} 件のエラーが見つかりました", errors.len());
        }
    };

    let canonical = aclflow_core::serialize(&aclflow_core::canonicalize(&doc));

    match output {
        Some(path) => {
            std::fs::write(path, &canonical)
                .with_context(|| format!("ファイルに書き込めません: {}", path.display()))?;
            println!("{} {}", "✓".green(), path.display());
        }
        None => print!("{canonical}"),
    }
    Ok(())
}
