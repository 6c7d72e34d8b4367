pub use clap::Parser;
use std::path::PathBuf;

use crate::prompt::Preset;

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// Directory to create the project in [default: asked, or vite-project]
    pub target_dir: Option<String>,

    /// Template to use, skipping the framework and variant questions
    #[clap(long, short)]
    pub template: Option<String>,

    /// Directory holding the `template-*` trees [default: bundled templates]
    #[clap(long)]
    pub templates_dir: Option<PathBuf>,

    /// Print the bootstrap command of a custom template instead of running it
    #[clap(long)]
    pub no_exec: bool,

    /// Do not print the final error message on failure
    #[clap(long)]
    pub quiet_errors: bool,

    /// Extra positional arguments, accepted and ignored
    #[clap(hide = true)]
    pub rest: Vec<String>,
}

impl Args {
    #[must_use]
    pub fn no_errors(&self) -> bool {
        self.quiet_errors
    }

    /// The answers already given on the command line.
    #[must_use]
    pub fn preset(&self) -> Preset {
        Preset {
            target_dir: self.target_dir.clone(),
            template: self.template.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_flag_forms() {
        let long = Args::parse_from(["create-frontend", "app", "--template=vue-ts"]);
        assert_eq!(long.target_dir.as_deref(), Some("app"));
        assert_eq!(long.template.as_deref(), Some("vue-ts"));

        let short = Args::parse_from(["create-frontend", "-t", "lit", "app"]);
        assert_eq!(short.preset().template.as_deref(), Some("lit"));
        assert_eq!(short.preset().target_dir.as_deref(), Some("app"));
    }

    #[test]
    fn numeric_target_dir_is_a_string() {
        let args = Args::parse_from(["create-frontend", "0123"]);
        assert_eq!(args.target_dir.as_deref(), Some("0123"));
        assert!(args.template.is_none());
        assert!(!args.no_errors());
    }

    #[test]
    fn extra_positionals_are_ignored() {
        let args = Args::try_parse_from(["create-frontend", "app", "extra", "more", "-t", "vue"]).unwrap();
        assert_eq!(args.target_dir.as_deref(), Some("app"));
        assert_eq!(args.template.as_deref(), Some("vue"));
        assert_eq!(args.preset().target_dir.as_deref(), Some("app"));
    }
}
