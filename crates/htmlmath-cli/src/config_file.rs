use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use htmlmath::MathConfig;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    #[serde(flatten)]
    pub math: MathConfig,
}

/// A config file that could not be used.
#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, err) => {
                write!(f, "cannot read config file '{}': {err}", path.display())
            }
            ConfigError::Parse(path, err) => {
                write!(f, "invalid config file '{}': {err}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(_, err) => Some(err),
            ConfigError::Parse(_, err) => Some(err),
        }
    }
}

/// Read converter options from a TOML file. Missing keys keep their defaults.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content =
        fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_owned(), err))?;
    toml::from_str(&content).map_err(|err| ConfigError::Parse(path.to_owned(), err))
}

#[cfg(test)]
mod tests {
    use std::env;

    use htmlmath::{MathDisplay, PrettyPrint};

    use super::*;

    fn parse(toml: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(toml)
    }

    #[test]
    fn all_keys() {
        let config = parse(
            r#"
pretty-print = "always"
xml-namespace = false
math-role = false
display = "block"
"#,
        )
        .unwrap();
        assert_eq!(config.math.pretty_print, PrettyPrint::Always);
        assert!(!config.math.xml_namespace);
        assert!(!config.math.math_role);
        assert_eq!(config.math.display, MathDisplay::Block);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = parse("math-role = false").unwrap();
        assert_eq!(config.math.pretty_print, PrettyPrint::Never);
        assert!(config.math.xml_namespace);
        assert!(!config.math.math_role);
    }

    #[test]
    fn unreadable_and_invalid_files() {
        let missing = Path::new("/nonexistent/htmlmath.toml");
        let err = load_config_file(missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read(..)));
        assert!(
            err.to_string()
                .starts_with("cannot read config file '/nonexistent/htmlmath.toml'")
        );

        let path = env::temp_dir().join(format!("htmlmath-config-{}.toml", std::process::id()));
        fs::write(&path, "pretty-print = 3").unwrap();
        let result = load_config_file(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse(..))));
    }
}
