//! Rewrites a catalog custom command for the package manager in use.

use std::fmt::{Display, Formatter};

use crate::{
    catalog::TARGET_DIR_PLACEHOLDER,
    package_manager::{self, PackageManager},
};

/// A custom command ready to hand to a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Display for CustomCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Rewrites the leading `npm create` / `npm exec` of `template` and fills in
/// `target_dir`.
///
/// | prefix | pnpm | yarn | yarn 1.x | npm / other |
/// |---|---|---|---|---|
/// | `npm create` | `pnpm create` | `yarn create` | `yarn create` | `npm create` |
/// | `npm exec` | `pnpm dlx` | `yarn dlx` | `npm exec` | `npm exec` |
///
/// Yarn 1.x can not parse a version on `create`, so the first `@latest` is
/// dropped for it.
#[must_use]
pub fn rewrite(template: &str, target_dir: &str, pm: Option<&PackageManager>) -> CustomCommand {
    let name = package_manager::name_or_default(pm);
    let is_yarn1 = pm.is_some_and(PackageManager::is_yarn1);

    let mut line = if let Some(rest) = template.strip_prefix("npm create") {
        let runner = match name {
            "pnpm" | "yarn" => name,
            _ => "npm",
        };
        format!("{runner} create{rest}")
    } else {
        template.to_string()
    };

    if is_yarn1 {
        line = line.replacen("@latest", "", 1);
    }

    if let Some(rest) = line.strip_prefix("npm exec") {
        let runner = match name {
            "pnpm" => "pnpm dlx",
            "yarn" if !is_yarn1 => "yarn dlx",
            _ => "npm exec",
        };
        line = format!("{runner}{rest}");
    }

    // Substitute per token so a target directory containing spaces stays one argument.
    let mut parts = line.split_whitespace().map(|part| {
        if part == TARGET_DIR_PLACEHOLDER {
            target_dir.to_string()
        } else {
            part.replace(TARGET_DIR_PLACEHOLDER, target_dir)
        }
    });

    CustomCommand {
        program: parts.next().unwrap_or_default(),
        args: parts.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm(ua: &str) -> PackageManager {
        PackageManager::from_user_agent(ua).unwrap()
    }

    #[test]
    fn pnpm_create() {
        let cmd = rewrite(
            "npm create vue@latest TARGET_DIR",
            "my-app",
            Some(&pm("pnpm/8.6.0 npm/? node/v18")),
        );
        assert_eq!(cmd.to_string(), "pnpm create vue@latest my-app");
        assert_eq!(cmd.program, "pnpm");
        assert_eq!(cmd.args, ["create", "vue@latest", "my-app"]);
    }

    #[test]
    fn yarn1_drops_latest_and_keeps_npm_exec() {
        let yarn1 = pm("yarn/1.22.19 npm/? node/v18");
        assert_eq!(
            rewrite("npm create svelte@latest TARGET_DIR", "app", Some(&yarn1)).to_string(),
            "yarn create svelte app"
        );
        assert_eq!(
            rewrite("npm exec nuxi init TARGET_DIR", "app", Some(&yarn1)).to_string(),
            "npm exec nuxi init app"
        );
    }

    #[test]
    fn modern_yarn_uses_dlx() {
        let yarn = pm("yarn/3.6.1 npm/? node/v18");
        assert_eq!(
            rewrite("npm exec nuxi init TARGET_DIR", "app", Some(&yarn)).to_string(),
            "yarn dlx nuxi init app"
        );
        assert_eq!(
            rewrite("npm create vue@latest TARGET_DIR", "app", Some(&yarn)).to_string(),
            "yarn create vue@latest app"
        );
    }

    #[test]
    fn pnpm_exec_is_dlx() {
        assert_eq!(
            rewrite("npm exec nuxi init TARGET_DIR", "app", Some(&pm("pnpm/8.0.0"))).to_string(),
            "pnpm dlx nuxi init app"
        );
    }

    #[test]
    fn npm_and_unknown_managers_keep_npm() {
        for agent in [None, Some(pm("npm/9.0.0 node/v18")), Some(pm("bun/1.0.0"))] {
            assert_eq!(
                rewrite("npm create vite-extra@latest TARGET_DIR", "x", agent.as_ref()).to_string(),
                "npm create vite-extra@latest x"
            );
            assert_eq!(
                rewrite("npm exec nuxi init TARGET_DIR", "x", agent.as_ref()).to_string(),
                "npm exec nuxi init x"
            );
        }
    }

    #[test]
    fn target_dir_with_spaces_stays_one_argument() {
        let cmd = rewrite("npm create vue@latest TARGET_DIR", "my app", None);
        assert_eq!(cmd.args.last().map(String::as_str), Some("my app"));
    }
}
