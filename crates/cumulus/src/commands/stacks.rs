use colored::Colorize;
use cumulus_cloud::StackRegistry;

pub fn handle(registry: &StackRegistry) {
    println!("{}", "Registered stacks:".bold());
    for name in registry.names() {
        println!("  • {}", name.cyan());
    }
}
