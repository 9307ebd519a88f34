//! Environment providers consulted by the walker.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;

/// Key lookup against a set of environment variables.
///
/// Keys are the upper-cased variable names resolved by the walker.
pub trait Lookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment.
///
/// Variables whose values are not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_process_env_lookup() {
        env::set_var("ENVBIND_LOOKUP_TEST", "value");
        assert_eq!(ProcessEnv.lookup("ENVBIND_LOOKUP_TEST"), Some("value".to_string()));

        env::remove_var("ENVBIND_LOOKUP_TEST");
        assert_eq!(ProcessEnv.lookup("ENVBIND_LOOKUP_TEST"), None);
    }

    #[test]
    fn test_map_lookup() {
        let vars = HashMap::from([("PORT".to_string(), "8080".to_string())]);
        assert_eq!(vars.lookup("PORT"), Some("8080".to_string()));
        assert_eq!(vars.lookup("port"), None);

        let ordered: BTreeMap<String, String> = vars.into_iter().collect();
        assert_eq!((&ordered).lookup("PORT"), Some("8080".to_string()));
    }
}
