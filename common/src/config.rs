use std::{collections::HashMap, path::Path};

use anyhow::{anyhow, Context, Result};
use hocon::{Hocon, HoconLoader};

/// Reads options from a HOCON document. A key is looked up in the process environment
/// first, then inside `scope`, then at the document root.
#[derive(Debug)]
pub struct ConfigLoader {
    hocon: Hocon,
    env: HashMap<String, String>,
    scope: String,
}

impl ConfigLoader {
    pub fn new(path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(anyhow!("The config file {:?} was not found", path));
        }

        let hocon = HoconLoader::new()
            .load_file(path)
            .with_context(|| format!("Failed to find or load config file at: {:?}", path))?
            .hocon()?;

        Ok(Self::with_env(hocon, scope))
    }

    pub fn from_str(contents: &str, scope: String) -> Result<Self> {
        let hocon = HoconLoader::new()
            .load_str(contents)
            .context("Failed to parse config")?
            .hocon()?;

        Ok(Self::with_env(hocon, scope))
    }

    /// A loader with no document behind it, so every option falls back to the environment or its default.
    pub fn empty(scope: String) -> Self {
        Self::with_env(Hocon::Hash(Default::default()), scope)
    }

    fn with_env(hocon: Hocon, scope: String) -> Self {
        let env = std::env::vars().collect::<HashMap<_, _>>();

        Self { hocon, env, scope }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.env.get(name) {
            return Some(Value::String(value.clone()));
        }

        let scope = &self.hocon[self.scope.as_str()];
        if matches!(scope, Hocon::Hash(_)) {
            if let Some(value) = Self::map_hocon(scope, name) {
                return Some(value);
            }
        }

        Self::map_hocon(&self.hocon, name)
    }

    pub fn get_usize(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(|v| v.as_usize())
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_f64())
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.as_bool())
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|v| v.as_string())
    }

    pub fn load<T: Config>(&self) -> Result<T> {
        let res = T::load(self)?;
        Ok(res)
    }

    fn map_hocon(hocon: &Hocon, name: &str) -> Option<Value> {
        match &hocon[name] {
            Hocon::Real(f64) => Some(Value::Float(*f64)),
            Hocon::Integer(i64) => Some(Value::Integer(*i64)),
            Hocon::String(string) => Some(Value::String(string.clone())),
            Hocon::Boolean(bool) => Some(Value::Boolean(*bool)),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(val) => Some(*val),
            Value::String(val) => Hocon::String(val.clone()).as_bool(),
            _ => None,
        }
    }

    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Integer(val) => usize::try_from(*val).ok(),
            Value::String(val) => val.parse::<usize>().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(val) => u64::try_from(*val).ok(),
            Value::String(val) => val.parse::<u64>().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(val) => Some(*val),
            Value::Integer(val) => Some(*val as f64),
            Value::String(val) => val.parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::String(val) => Some(val.clone()),
            Value::Boolean(true) => Some("true".to_string()),
            Value::Boolean(false) => Some("false".to_string()),
            Value::Float(val) => Some(val.to_string()),
            Value::Integer(val) => Some(val.to_string()),
        }
    }
}

pub trait Config {
    fn load(config: &ConfigLoader) -> Result<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        level = 1
        nested {
            level = 3
            exploration = 0.25
        }
        sequencer = "uct"
        stabilized = true
    "#;

    #[test]
    fn test_scope_overrides_root() {
        let config = ConfigLoader::from_str(CONFIG, "nested".to_string()).unwrap();

        assert_eq!(config.get_usize("level"), Some(3));
        assert_eq!(config.get_f64("exploration"), Some(0.25));
    }

    #[test]
    fn test_falls_back_to_root() {
        let config = ConfigLoader::from_str(CONFIG, "nested".to_string()).unwrap();

        assert_eq!(config.get_string("sequencer"), Some("uct".to_string()));
        assert_eq!(config.get_bool("stabilized"), Some(true));
    }

    #[test]
    fn test_missing_scope_reads_root() {
        let config = ConfigLoader::from_str(CONFIG, "absent".to_string()).unwrap();

        assert_eq!(config.get_usize("level"), Some(1));
    }

    #[test]
    fn test_empty_loads_defaults() {
        struct Level(usize);

        impl Config for Level {
            fn load(config: &ConfigLoader) -> Result<Self> {
                Ok(Level(config.get_usize("nested_test_level").unwrap_or(2)))
            }
        }

        let config = ConfigLoader::empty("nested".to_string());
        let level: Level = config.load().unwrap();

        assert_eq!(level.0, 2);
        assert_eq!(config.get_string("nested_test_level"), None);
    }

    #[test]
    fn test_empty_has_no_values() {
        let config = ConfigLoader::empty("nested".to_string());

        assert_eq!(config.get_usize("a_key_nobody_sets"), None);
    }

    #[test]
    fn test_integer_reads_as_float() {
        assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
        assert_eq!(Value::Integer(-2).as_usize(), None);
        assert_eq!(Value::String("17".to_string()).as_u64(), Some(17));
    }
}
