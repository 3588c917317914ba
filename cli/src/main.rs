use console_io::{ConsoleConfig, ConsoleError, StdConsole};
use std::fs::File;
use std::path::Path;

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "CONSOLE_IO_CONFIG";

fn load_config(path: Option<&Path>) -> Result<ConsoleConfig, ConsoleError> {
    let Some(path) = path else {
        return Ok(ConsoleConfig::default());
    };
    let file = File::open(path).map_err(|e| {
        ConsoleError::Config(format!("Failed to open {}: {e}", path.display()))
    })?;
    log::debug!("Loading console config from {}", path.display());
    ConsoleConfig::from_reader(file)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = std::env::var_os(CONFIG_ENV);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    let console = StdConsole::stdio(&config)?;

    console.print("Hello World");

    // Everything printed must reach stdout before the process exits
    console.flush();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(load_config(None).unwrap(), ConsoleConfig::default());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_config(Some(Path::new("/nonexistent/console.json"))).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }
}
