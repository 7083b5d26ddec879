use aclflow_cloud::{FileStore, Reconciler};
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// プランを適用してストア上のACLを更新する
pub async fn run(resource: &str, file: &Path, store_dir: &Path, yes: bool) -> anyhow::Result<()> {
    let desired = super::read_policy_file(file)?;

    let reconciler = Reconciler::new(FileStore::new(store_dir));
    let plan = reconciler.plan(resource, &desired).await?;

    super::plan::print_plan(&plan);

    if !plan.has_changes {
        println!("{}", "変更はありません".green());
        return Ok(());
    }

    if !yes && !confirm("適用しますか？")? {
        println!("{}", "中止しました".yellow());
        return Ok(());
    }

    let result = reconciler.apply(&plan).await?;

    for success in &result.succeeded {
        println!("{} {}", "✓".green(), success.message);
    }
    for failure in &result.failed {
        let message = failure.error.as_deref().unwrap_or("不明なエラー");
        eprintln!("{} {}: {}", "✗".red(), failure.resource_id, message);
    }

    if !result.is_success() {
        anyhow::bail!("{} 件の適用に失敗しました", result.failed.len());
    }
    println!("{} ({}ms)", "適用が完了しました".green(), result.duration_ms);
    Ok(())
}

fn confirm(message: &str) -> anyhow::Result<bool> {
    print!("{message} [y/N]: ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
