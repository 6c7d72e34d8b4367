use anyhow::{ensure, Context};
use derive_builder::Builder;
use directories::ProjectDirs;
use include_dir::{include_dir, Dir};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{error::ScaffoldError, package_manager::PackageManager, trace};

/// Environment variable naming a templates directory.
pub const TEMPLATES_VAR: &str = "CREATE_FRONTEND_TEMPLATES";

/// The `template-*` trees compiled into the binary.
pub static EMBEDDED_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Where `template-*` trees are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A directory on disk.
    Dir(PathBuf),
    /// [`EMBEDDED_TEMPLATES`]
    Embedded,
}

impl TemplateSource {
    /// Whether a tree named `dir_name` (e.g. `template-vue`) is available.
    #[must_use]
    pub fn has_template(&self, dir_name: &str) -> bool {
        match self {
            Self::Dir(dir) => dir.join(dir_name).is_dir(),
            Self::Embedded => EMBEDDED_TEMPLATES.get_dir(dir_name).is_some(),
        }
    }
}

impl From<PathBuf> for TemplateSource {
    fn from(dir: PathBuf) -> Self {
        Self::Dir(dir)
    }
}

impl From<&Path> for TemplateSource {
    fn from(dir: &Path) -> Self {
        Self::Dir(dir.to_path_buf())
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir(dir) => write!(f, "{}", dir.display()),
            Self::Embedded => write!(f, "<embedded>"),
        }
    }
}

/// Everything a run reads from its surroundings rather than from the user.
#[derive(Builder, Debug, Clone)]
pub struct Environment {
    #[builder(setter(into))]
    cwd: PathBuf,
    #[builder(setter(into))]
    templates: TemplateSource,
    #[builder(default)]
    package_manager: Option<PackageManager>,
}

impl Environment {
    /// Create a new [`Environment`] builder
    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::create_empty()
    }

    /// Reads the current directory, the templates directory and the
    /// package manager user agent.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the current directory is unavailable or no
    /// templates directory exists.
    pub fn detect(templates_override: Option<&Path>) -> anyhow::Result<Self> {
        let env = Self::builder()
            .cwd(std::env::current_dir().context("Failed to get current dir")?)
            .templates(Self::templates_from(templates_override)?)
            .package_manager(PackageManager::from_env())
            .build()?;

        trace!("Templates: {}", env.templates());
        trace!("Package manager: {:?}", env.package_manager());

        Ok(env)
    }

    /// Returns where `template-*` trees are read from
    ///
    /// Looks, in order, at:
    /// - the explicit override (`--templates-dir`)
    /// - `$CREATE_FRONTEND_TEMPLATES`
    /// - `<user data dir>/create-frontend/templates`, if it exists
    /// - the trees embedded in the binary
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingTemplateDir`] if an explicitly given
    /// path is not a directory.
    pub fn templates_from(templates_override: Option<&Path>) -> anyhow::Result<TemplateSource> {
        let explicit = templates_override
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(TEMPLATES_VAR).map(PathBuf::from));

        if let Some(dir) = explicit {
            ensure!(dir.is_dir(), ScaffoldError::MissingTemplateDir(dir));
            return Ok(TemplateSource::Dir(dir));
        }

        Ok(Self::user_templates_dir().map_or(TemplateSource::Embedded, TemplateSource::Dir))
    }

    fn user_templates_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "create-frontend")
            .map(|dirs| dirs.data_dir().join("templates"))
            .filter(|p| p.is_dir())
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        self.cwd.as_path()
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateSource {
        &self.templates
    }

    #[must_use]
    pub fn package_manager(&self) -> Option<&PackageManager> {
        self.package_manager.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let source = Environment::templates_from(Some(tmp.path())).unwrap();
        assert_eq!(source, TemplateSource::Dir(tmp.path().to_path_buf()));
    }

    #[test]
    fn missing_override_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = Environment::templates_from(Some(&missing)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::MissingTemplateDir(p)) if p == &missing
        ));
    }

    #[test]
    fn templates_are_embedded() {
        assert!(TemplateSource::Embedded.has_template("template-vanilla"));
        assert!(TemplateSource::Embedded.has_template("template-react-ts"));
        assert!(!TemplateSource::Embedded.has_template("template-react-swc-ts"));

        let manifest = EMBEDDED_TEMPLATES
            .get_file("template-vanilla/package.json")
            .and_then(|f| f.contents_utf8())
            .unwrap();
        assert!(manifest.contains("\"name\""));
    }

    #[test]
    fn directory_source_checks_disk() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("template-lit")).unwrap();

        let source = TemplateSource::from(tmp.path());
        assert!(source.has_template("template-lit"));
        assert!(!source.has_template("template-vue"));
        assert_eq!(source.to_string(), tmp.path().display().to_string());
    }

    #[test]
    fn builder_defaults_package_manager() {
        let env = Environment::builder()
            .cwd("/work")
            .templates(PathBuf::from("/work/templates"))
            .build()
            .unwrap();
        assert_eq!(env.package_manager(), None);
        assert_eq!(env.cwd(), Path::new("/work"));
    }
}
