use anyhow::Result;
use textlens_infrastructure::{TextLensPaths, load_config};

pub fn path() -> Result<()> {
    let config = load_config()?;
    println!("config:  {}", TextLensPaths::config_file()?.display());
    println!("history: {}", config.history_path()?.display());
    Ok(())
}

pub fn show() -> Result<()> {
    let config = load_config()?;
    print!("{}", config.to_toml()?);
    Ok(())
}
