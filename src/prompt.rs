//! The interactive question sequence.
//!
//! Each question is skipped when earlier answers or the command line
//! already settle it. Nothing is written to disk here; the caller applies
//! the returned [`Reconciliation`] afterwards.

use anyhow::Result;
use inquire::{validator::Validation, Confirm, CustomUserError, InquireError, Select, Text};
use std::path::Path;

use crate::{
    catalog::{self, Framework, FrameworkVariant, FRAMEWORKS},
    error::ScaffoldError,
    materialize::ProjectTarget,
    name::{self, DEFAULT_TARGET_DIR},
    reconcile::{self, DirState, Reconciliation},
    trace,
};

/// Answers that came from the command line instead of a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    pub target_dir: Option<String>,
    pub template: Option<String>,
}

/// Source of answers for [`run_flow`].
pub trait Prompter {
    fn project_name(&mut self, default: &str) -> Result<String>;
    fn confirm_overwrite(&mut self, message: &str) -> Result<bool>;
    /// Must only return names accepted by [`name::is_valid_package_name`].
    fn package_name(&mut self, suggestion: &str) -> Result<String>;
    fn select_framework(&mut self, message: &str, choices: &[Framework]) -> Result<Framework>;
    fn select_variant(&mut self, choices: &[FrameworkVariant]) -> Result<FrameworkVariant>;
}

#[derive(Debug)]
pub struct Answers {
    pub target: ProjectTarget,
    pub reconciliation: Reconciliation,
}

fn overwrite_message(target_dir: &str) -> String {
    let location = if target_dir == "." {
        "Current directory".to_string()
    } else {
        format!("Target directory \"{target_dir}\"")
    };

    format!("{location} is not empty. Remove existing files and continue?")
}

fn framework_message(preset: Option<&str>) -> String {
    match preset {
        Some(template) => {
            format!("\"{template}\" isn't a valid template. Please choose from below: ")
        }
        None => "Select a framework:".to_string(),
    }
}

/// Asks whatever the command line left open and plans the target directory.
///
/// # Errors
///
/// Returns [`ScaffoldError::Cancelled`] if the user declines to overwrite a
/// non-empty directory or aborts a prompt.
pub fn run_flow(preset: &Preset, cwd: &Path, prompter: &mut impl Prompter) -> Result<Answers> {
    let target_dir = match name::format_target_dir(preset.target_dir.as_deref()) {
        Some(dir) => dir,
        None => name::format_target_dir(Some(&prompter.project_name(DEFAULT_TARGET_DIR)?))
            .unwrap_or_else(|| DEFAULT_TARGET_DIR.to_string()),
    };

    let root = if target_dir == "." {
        cwd.to_path_buf()
    } else {
        cwd.join(&target_dir)
    };

    let state = reconcile::inspect(&root)?;
    let overwrite = match state {
        DirState::Occupied => Some(prompter.confirm_overwrite(&overwrite_message(&target_dir))?),
        DirState::Missing | DirState::Empty => None,
    };
    let reconciliation = reconcile::plan(&root, state, overwrite)?;

    let project_name = name::project_name(&target_dir, cwd);
    let package_name = if name::is_valid_package_name(&project_name) {
        project_name
    } else {
        prompter.package_name(&name::to_valid_package_name(&project_name))?
    };

    let template = match preset.template.as_deref() {
        Some(t) if catalog::is_known_template(t) => t.to_string(),
        other => {
            let framework =
                prompter.select_framework(&framework_message(other), FRAMEWORKS)?;
            if framework.is_leaf() {
                framework.name.to_string()
            } else {
                prompter.select_variant(framework.variants)?.name.to_string()
            }
        }
    };

    trace!("Answers: dir={target_dir} package={package_name} template={template}");

    Ok(Answers {
        target: ProjectTarget {
            target_dir,
            package_name,
            template,
            overwrite: overwrite.unwrap_or(false),
        },
        reconciliation,
    })
}

/// [`Prompter`] backed by terminal prompts.
#[derive(Debug, Default)]
pub struct InquirePrompter;

fn map_cancel(err: InquireError) -> anyhow::Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            ScaffoldError::Cancelled.into()
        }
        other => other.into(),
    }
}

impl Prompter for InquirePrompter {
    fn project_name(&mut self, default: &str) -> Result<String> {
        Text::new("Project name:")
            .with_default(default)
            .prompt()
            .map_err(map_cancel)
    }

    fn confirm_overwrite(&mut self, message: &str) -> Result<bool> {
        Confirm::new(message)
            .with_default(false)
            .prompt()
            .map_err(map_cancel)
    }

    fn package_name(&mut self, suggestion: &str) -> Result<String> {
        Text::new("Package name:")
            .with_initial_value(suggestion)
            .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
                Ok(if name::is_valid_package_name(input) {
                    Validation::Valid
                } else {
                    Validation::Invalid("Invalid package.json name".into())
                })
            })
            .prompt()
            .map_err(map_cancel)
    }

    fn select_framework(&mut self, message: &str, choices: &[Framework]) -> Result<Framework> {
        Select::new(message, choices.to_vec())
            .with_starting_cursor(0)
            .prompt()
            .map_err(map_cancel)
    }

    fn select_variant(&mut self, choices: &[FrameworkVariant]) -> Result<FrameworkVariant> {
        Select::new("Select a variant:", choices.to_vec())
            .prompt()
            .map_err(map_cancel)
    }
}
