use aclflow_cloud::{ActionType, FileStore, Plan, Reconciler};
use colored::Colorize;
use std::path::Path;

/// ストア上のACLと希望するACLを比較してプランを表示する
pub async fn run(resource: &str, file: &Path, store_dir: &Path, json: bool) -> anyhow::Result<()> {
    let desired = super::read_policy_file(file)?;

    let reconciler = Reconciler::new(FileStore::new(store_dir));
    let plan = reconciler.plan(resource, &desired).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    print_plan(&plan);
    Ok(())
}

pub(crate) fn print_plan(plan: &Plan) {
    for action in &plan.actions {
        match action.action_type {
            ActionType::Update => println!("{} {}", "~".yellow(), action.description),
            ActionType::NoOp => println!("{} {}", "=".green(), action.description),
        }
    }
    println!();
    println!("{}", plan.summary());
}
