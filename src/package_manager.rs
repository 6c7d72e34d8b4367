/// Variable through which package managers announce themselves to scripts.
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";

pub const DEFAULT_NAME: &str = "npm";

/// The package manager that launched us, as reported by its user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub name: String,
    pub version: String,
}

impl PackageManager {
    /// Parses `"<name>/<version> ..."`, e.g. `pnpm/8.6.0 npm/? node/v18.16.0 linux x64`.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let spec = user_agent.split(' ').next()?;
        let (name, version) = spec.split_once('/')?;

        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var(USER_AGENT_VAR)
            .ok()
            .and_then(|ua| Self::from_user_agent(&ua))
    }

    #[must_use]
    pub fn is_yarn1(&self) -> bool {
        self.name == "yarn" && self.version.starts_with("1.")
    }
}

/// Name of `pm`, falling back to `npm` when none was detected.
#[must_use]
pub fn name_or_default(pm: Option<&PackageManager>) -> &str {
    pm.map_or(DEFAULT_NAME, |pm| pm.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_agents() {
        let pm = PackageManager::from_user_agent("pnpm/8.6.0 npm/? node/v18.16.0 linux x64").unwrap();
        assert_eq!(pm.name, "pnpm");
        assert_eq!(pm.version, "8.6.0");
        assert!(!pm.is_yarn1());

        let yarn = PackageManager::from_user_agent("yarn/1.22.19 npm/? node/v18.16.0").unwrap();
        assert!(yarn.is_yarn1());

        let berry = PackageManager::from_user_agent("yarn/3.6.1 npm/? node/v18.16.0").unwrap();
        assert!(!berry.is_yarn1());
    }

    #[test]
    fn malformed_user_agents() {
        assert_eq!(PackageManager::from_user_agent(""), None);
        assert_eq!(PackageManager::from_user_agent("bun"), None);
        assert_eq!(PackageManager::from_user_agent("/1.0"), None);
    }

    #[test]
    fn defaults_to_npm() {
        assert_eq!(name_or_default(None), "npm");
        let bun = PackageManager::from_user_agent("bun/1.0.0").unwrap();
        assert_eq!(name_or_default(Some(&bun)), "bun");
    }
}
