//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[oracle]
native = 200000000000
mta = 100000000000

[router]
slippage_bps = 30

[factory]
creation_fee = 10_000000000000000000
treasury = treasury

[fund]
name = Integration Fund
assets = MTA,MTB
"#;

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("fund", "name"),
            Some("Integration Fund".to_string())
        );
        assert_eq!(
            adapter.get_string("factory", "treasury"),
            Some("treasury".to_string())
        );
    }

    #[test]
    fn from_file_parses_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("router", "slippage_bps", 0), 30);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("fund", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("router", "missing", 42), 42);
    }

    #[test]
    fn get_amount_parses_u128_with_separators() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_amount("factory", "creation_fee"),
            Some(10_000_000_000_000_000_000)
        );
        assert_eq!(adapter.get_amount("oracle", "native"), Some(200000000000));
    }

    #[test]
    fn get_amount_rejects_garbage() {
        let adapter = FileConfigAdapter::from_string("[a]\nx = not-a-number\n").unwrap();
        assert_eq!(adapter.get_amount("a", "x"), None);
        assert_eq!(adapter.get_amount("a", "missing"), None);
    }
}
