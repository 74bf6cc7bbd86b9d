//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;

    /// Base-unit amount accessor: parses a `u128`, tolerating `_` grouping
    /// separators. `None` if the key is missing or unparsable.
    fn get_amount(&self, section: &str, key: &str) -> Option<u128> {
        self.get_string(section, key)
            .and_then(|value| value.trim().replace('_', "").parse().ok())
    }
}
