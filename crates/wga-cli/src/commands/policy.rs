use anyhow::{bail, Context, Result};
use wga_policy::PolicyRegistry;

pub fn run_list(registry: &PolicyRegistry) -> Result<()> {
    for policy in registry.roles() {
        println!("{}", policy.name);
    }
    Ok(())
}

pub fn run_show(registry: &PolicyRegistry, role: &str) -> Result<()> {
    let Some(policy) = registry.get(role) else {
        bail!("no policy for role {role:?} (see `wga policy list`)");
    };
    let json = serde_json::to_string_pretty(policy).context("serialize role policy")?;
    println!("{json}");

    println!();
    println!("Permission levels:");
    for (axis, level) in policy.permission_levels.slots() {
        println!("  {axis}: {level}");
    }
    Ok(())
}

pub fn run_hash(registry: &PolicyRegistry) -> Result<()> {
    println!("{}", registry.content_hash()?);
    Ok(())
}
