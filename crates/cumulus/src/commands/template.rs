use cumulus_cloud::StackRegistry;

pub fn handle(registry: &StackRegistry, stack: &str) -> anyhow::Result<()> {
    let module = super::lookup(registry, stack)?;
    print!("{}", module.template_body()?);
    Ok(())
}
