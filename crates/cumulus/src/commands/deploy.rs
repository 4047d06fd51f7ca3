use colored::Colorize;
use cumulus_cloud::{DeployContext, Deployer, StackRegistry};
use cumulus_cloud_aws::{AwsArtifactStore, AwsStackService};

pub async fn handle(
    registry: &StackRegistry,
    region: String,
    account: String,
    stack: String,
    execute: bool,
) -> anyhow::Result<()> {
    let module = super::lookup(registry, &stack)?;

    println!(
        "{}",
        format!("Deploying stack {} in {}...", stack, region).blue().bold()
    );

    let config = cumulus_cloud_aws::load_config(&region).await;
    let service = AwsStackService::new(&config);
    let store = AwsArtifactStore::new(&config);

    let ctx = DeployContext::new(region, account, stack);
    let deployer = Deployer::new(&service, &store);
    let outcome = deployer.deploy(module, &ctx, execute).await?;

    println!();
    println!(
        "Change set {} ({})",
        outcome.change_set_name.cyan(),
        outcome.change_set_type
    );
    println!("{}", serde_yaml::to_string(&outcome.description)?);

    if outcome.executed {
        println!("{}", "Change set executed.".green().bold());
    } else {
        println!(
            "Created but not executed. Re-run with {} to apply it.",
            "--execute".cyan()
        );
    }
    Ok(())
}
