pub mod batch;
pub mod config;
pub mod lines;
pub mod output;
pub mod tokens;

use std::fs;
use std::io::Read;
use std::path::Path;

use panx_core::models::config::PanxConfig;

/// Load the config file given with `--config`, or fall back to the user's
/// config file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PanxConfig> {
    if let Some(path) = config_path {
        return Ok(PanxConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(PanxConfig::from_file(&default_path)?)
    } else {
        Ok(PanxConfig::default())
    }
}

/// Read an input file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(fs::read_to_string(path)?)
}
