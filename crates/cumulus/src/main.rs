mod commands;
mod stacks;

use clap::{Parser, Subcommand};
use colored::Colorize;
use cumulus_cloud::CloudError;

#[derive(Parser)]
#[command(name = "cumulus")]
#[command(about = "Declarative AWS stack deployment via CloudFormation change sets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a stack by submitting a change set
    Deploy {
        /// AWS region the deployment occurs in
        #[arg(long, env = "AWS_REGION")]
        region: String,
        /// AWS account id
        #[arg(long)]
        account: String,
        /// Registered stack name
        #[arg(long)]
        stack: String,
        /// Execute the change set as soon as it is ready
        #[arg(long)]
        execute: bool,
    },
    /// Print a stack's template document
    Template {
        /// Registered stack name
        stack: String,
    },
    /// List registered stacks
    Stacks,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    let registry = stacks::registry();

    let result = match cli.command {
        Commands::Deploy {
            region,
            account,
            stack,
            execute,
        } => commands::deploy::handle(&registry, region, account, stack, execute).await,
        Commands::Template { stack } => commands::template::handle(&registry, &stack),
        Commands::Stacks => {
            commands::stacks::handle(&registry);
            Ok(())
        }
    };

    if let Err(err) = result {
        // A failed build command terminates the process with the
        // child's own exit code.
        if let Some(code) = err
            .downcast_ref::<CloudError>()
            .and_then(CloudError::exit_code)
        {
            eprintln!("{}", format!("error: {err:#}").red());
            std::process::exit(code);
        }
        return Err(err);
    }
    Ok(())
}
