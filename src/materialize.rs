//! Turns a resolved template selection into files under the target directory.

use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::{
    catalog,
    command::{self, CustomCommand},
    config::{Environment, TemplateSource, EMBEDDED_TEMPLATES},
    error::ScaffoldError,
    package_manager::{self, PackageManager},
    reconcile::{self, PreparedDir},
    trace,
};

const SWC_MARKER: &str = "-swc";
const MANIFEST: &str = "package.json";
const RENAMED_FILES: &[(&str, &str)] = &[("_gitignore", ".gitignore")];

const REACT_PLUGIN: &str = "@vitejs/plugin-react";
const REACT_SWC_PLUGIN: &str = "@vitejs/plugin-react-swc";
const REACT_SWC_PLUGIN_VERSION: &str = "^3.5.0";

/// What the user asked for, collected from the prompts and the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    pub target_dir: String,
    pub package_name: String,
    pub template: String,
    pub overwrite: bool,
}

/// A template name with the `-swc` flavor split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateChoice {
    pub name: String,
    pub is_react_swc: bool,
}

impl TemplateChoice {
    #[must_use]
    pub fn resolve(template: &str) -> Self {
        if template.contains(SWC_MARKER) {
            Self {
                name: template.replacen(SWC_MARKER, "", 1),
                is_react_swc: true,
            }
        } else {
            Self {
                name: template.to_string(),
                is_react_swc: false,
            }
        }
    }

    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("template-{}", self.name)
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// The template is bootstrapped by another tool.
    Delegated(CustomCommand),
    /// A bundled tree was copied; `files` are the written paths.
    Copied { root: PathBuf, files: Vec<PathBuf> },
}

/// Copies the bundled template, or builds the custom command that replaces it.
///
/// # Errors
///
/// Returns [`ScaffoldError::UnknownTemplate`] if there is no bundled tree for
/// the template, or an [`Err`] on any IO or manifest failure.
pub fn materialize(target: &ProjectTarget, dir: &PreparedDir, env: &Environment) -> Result<Outcome> {
    if let Some(custom) = catalog::lookup_custom_command(&target.template) {
        let cmd = command::rewrite(custom, &target.target_dir, env.package_manager());
        trace!("Delegating {} to `{cmd}`", target.template);
        return Ok(Outcome::Delegated(cmd));
    }

    let choice = TemplateChoice::resolve(&target.template);
    let dir_name = choice.dir_name();

    if !env.templates().has_template(&dir_name) {
        return Err(ScaffoldError::UnknownTemplate(choice.name).into());
    }

    let files = match env.templates() {
        TemplateSource::Dir(templates) => {
            copy_template(&templates.join(&dir_name), dir.root(), &target.package_name)?
        }
        TemplateSource::Embedded => {
            let template = EMBEDDED_TEMPLATES
                .get_dir(&dir_name)
                .ok_or_else(|| ScaffoldError::UnknownTemplate(choice.name.clone()))?;
            copy_embedded(template, dir.root(), &target.package_name)?
        }
    };

    if choice.is_react_swc {
        setup_react_swc(dir.root())?;
    }

    Ok(Outcome::Copied {
        root: dir.root().to_path_buf(),
        files,
    })
}

fn renamed(file_name: &str) -> &str {
    RENAMED_FILES
        .iter()
        .find(|(from, _)| *from == file_name)
        .map_or(file_name, |&(_, to)| to)
}

fn destination(root: &Path, relative: &Path) -> PathBuf {
    let file_name = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    root.join(relative).with_file_name(renamed(&file_name))
}

/// Removes a symlink sitting at `dest` so writes never go through it.
fn detach_link(dest: &Path) -> Result<()> {
    if dest
        .symlink_metadata()
        .is_ok_and(|m| m.file_type().is_symlink())
    {
        trace!("Replacing symlink {}", dest.display());
        reconcile::remove_path(dest)?;
    }

    Ok(())
}

fn create_dir(dest: &Path) -> Result<()> {
    detach_link(dest)?;
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))
}

/// Writes one template file. The root manifest gets `package_name`.
fn write_file(root: &Path, relative: &Path, contents: &[u8], package_name: &str) -> Result<PathBuf> {
    let dest = destination(root, relative);

    if let Some(parent) = relative.parent() {
        let mut dir = root.to_path_buf();
        for component in parent.components() {
            dir.push(component);
            detach_link(&dir)?;
        }
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    detach_link(&dest)?;

    let result = if relative == Path::new(MANIFEST) {
        let contents = std::str::from_utf8(contents).context("package.json is not UTF-8")?;
        fs::write(&dest, with_package_name(contents, package_name)?)
    } else {
        fs::write(&dest, contents)
    };
    result.with_context(|| format!("Failed to write {}", dest.display()))?;

    trace!("Wrote {}", dest.display());
    Ok(dest)
}

/// Copies every file of `template_dir` into `root`, keeping relative paths.
///
/// # Errors
///
/// Returns an [`Err`] on any IO failure or if the manifest is not valid JSON.
pub fn copy_template(template_dir: &Path, root: &Path, package_name: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for entry in WalkDir::new(template_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(template_dir)?;

        if entry.file_type().is_dir() {
            create_dir(&destination(root, relative))?;
            continue;
        }

        let contents = fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        written.push(write_file(root, relative, &contents, package_name)?);
    }

    Ok(written)
}

fn embedded_files<'a>(dir: &'a Dir<'a>, out: &mut Vec<&'a include_dir::File<'a>>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => embedded_files(sub, out),
            DirEntry::File(file) => out.push(file),
        }
    }
}

/// Same as [`copy_template`] for a tree compiled into the binary.
///
/// # Errors
///
/// Returns an [`Err`] on any IO failure or if the manifest is not valid JSON.
pub fn copy_embedded(template: &Dir<'_>, root: &Path, package_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    embedded_files(template, &mut files);
    files.sort_by(|a, b| a.path().cmp(b.path()));

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let relative = file.path().strip_prefix(template.path())?;
        written.push(write_file(root, relative, file.contents(), package_name)?);
    }

    Ok(written)
}

fn to_manifest_string(manifest: &Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(manifest)?;
    out.push('\n');
    Ok(out)
}

/// Sets the `name` field of a `package.json` document.
///
/// # Errors
///
/// Returns an [`Err`] if `contents` is not a JSON object.
pub fn with_package_name(contents: &str, package_name: &str) -> Result<String> {
    let mut manifest: Value = serde_json::from_str(contents).context("Invalid package.json")?;

    manifest
        .as_object_mut()
        .context("package.json is not an object")?
        .insert("name".to_string(), Value::from(package_name));

    to_manifest_string(&manifest)
}

/// Swaps the Babel React plugin for the SWC one in a freshly copied project.
///
/// # Errors
///
/// Returns an [`Err`] on any IO failure or an unreadable manifest.
pub fn setup_react_swc(root: &Path) -> Result<()> {
    let manifest_path = root.join(MANIFEST);
    let mut manifest: Value = serde_json::from_str(&fs::read_to_string(&manifest_path)?)
        .context("Invalid package.json")?;

    if let Some(dev) = manifest
        .get_mut("devDependencies")
        .and_then(Value::as_object_mut)
    {
        let had_plugin = dev.contains_key(REACT_PLUGIN);
        *dev = std::mem::take(dev)
            .into_iter()
            .map(|(name, version)| {
                if name == REACT_PLUGIN {
                    (REACT_SWC_PLUGIN.to_string(), Value::from(REACT_SWC_PLUGIN_VERSION))
                } else {
                    (name, version)
                }
            })
            .collect();

        if !had_plugin {
            dev.insert(
                REACT_SWC_PLUGIN.to_string(),
                Value::from(REACT_SWC_PLUGIN_VERSION),
            );
        }
    }

    fs::write(&manifest_path, to_manifest_string(&manifest)?)?;

    for config in ["vite.config.js", "vite.config.ts"] {
        let path = root.join(config);
        if !path.is_file() {
            continue;
        }

        let contents = fs::read_to_string(&path)?
            .replace(&format!("'{REACT_PLUGIN}'"), &format!("'{REACT_SWC_PLUGIN}'"))
            .replace(&format!("\"{REACT_PLUGIN}\""), &format!("\"{REACT_SWC_PLUGIN}\""));
        fs::write(&path, contents)?;
    }

    Ok(())
}

/// Commands the user runs next to start working in `root`.
#[must_use]
pub fn next_steps(root: &Path, cwd: &Path, pm: Option<&PackageManager>) -> Vec<String> {
    let mut steps = Vec::new();

    if root != cwd {
        let relative = root.strip_prefix(cwd).unwrap_or(root).display().to_string();
        if !relative.is_empty() {
            let relative = if relative.contains(' ') {
                format!("\"{relative}\"")
            } else {
                relative
            };
            steps.push(format!("cd {relative}"));
        }
    }

    match package_manager::name_or_default(pm) {
        "yarn" => {
            steps.push("yarn".to_string());
            steps.push("yarn dev".to_string());
        }
        name => {
            steps.push(format!("{name} install"));
            steps.push(format!("{name} run dev"));
        }
    }

    steps
}
