use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    let path = Config::default_config_path();
    if Config::create_default_if_missing(&path)? {
        println!("✓ Created default config: {}", path.display());
    } else {
        println!("Config already exists: {}", path.display());
    }
    Ok(())
}
