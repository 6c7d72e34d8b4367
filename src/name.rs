//! Normalization of user supplied directory and package names.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Target directory used when none is given on the command line or prompt.
pub const DEFAULT_TARGET_DIR: &str = "vite-project";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static LEADING_DOT_OR_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[._]").expect("valid regex"));
static INVALID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9~-]+").expect("valid regex"));
static PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:@[a-z0-9*~-][a-z0-9*._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$").expect("valid regex")
});

/// Trims `raw` and strips every trailing path separator.
///
/// Returns [`None`] when there is no input or nothing is left afterwards,
/// so callers can fall back to [`DEFAULT_TARGET_DIR`].
#[must_use]
pub fn format_target_dir(raw: Option<&str>) -> Option<String> {
    let formatted = raw?
        .trim()
        .trim_end_matches(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR);

    (!formatted.is_empty()).then(|| formatted.to_string())
}

/// Whether `name` is accepted as an npm style package name, optionally scoped.
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

/// Rewrites `name` into something [`is_valid_package_name`] accepts.
///
/// Inputs that reduce to nothing (a lone `.` or `_`) become [`DEFAULT_TARGET_DIR`].
#[must_use]
pub fn to_valid_package_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = LEADING_DOT_OR_UNDERSCORE.replace(&hyphenated, "");
    let valid = INVALID_CHARS.replace_all(&stripped, "-");

    if valid.is_empty() {
        DEFAULT_TARGET_DIR.to_string()
    } else {
        valid.into_owned()
    }
}

/// Name of the project living in `target_dir`. For `.` that is the name of `cwd`.
#[must_use]
pub fn project_name(target_dir: &str, cwd: &Path) -> String {
    if target_dir == "." {
        cwd.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_TARGET_DIR.to_string())
    } else {
        target_dir.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_trailing_slashes() {
        assert_eq!(format_target_dir(Some("foo/")).as_deref(), Some("foo"));
        assert_eq!(format_target_dir(Some("foo///")).as_deref(), Some("foo"));
        assert_eq!(format_target_dir(Some("  nested/app/ ")).as_deref(), Some("nested/app"));
        assert_eq!(format_target_dir(None), None);
        assert_eq!(format_target_dir(Some("   ")), None);
    }

    #[test]
    fn package_name_grammar() {
        assert!(is_valid_package_name("my-app"));
        assert!(is_valid_package_name("@scope/my-app"));
        assert!(is_valid_package_name("a.b_c~d"));
        assert!(is_valid_package_name("123"));
        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name("My-App"));
        assert!(!is_valid_package_name(".hidden"));
        assert!(!is_valid_package_name("_private"));
        assert!(!is_valid_package_name("has space"));
        assert!(!is_valid_package_name("@scope/"));
    }

    #[test]
    fn corrects_package_names() {
        assert_eq!(to_valid_package_name("  My Cool   App "), "my-cool-app");
        assert_eq!(to_valid_package_name(".dotfile"), "dotfile");
        assert_eq!(to_valid_package_name("_under"), "under");
        assert_eq!(to_valid_package_name("*invalid"), "-invalid");
        assert_eq!(to_valid_package_name("a!!b"), "a-b");
        assert_eq!(to_valid_package_name("."), DEFAULT_TARGET_DIR);
    }

    #[test]
    fn project_name_for_current_dir() {
        let cwd = Path::new("/home/user/work/site");
        assert_eq!(project_name(".", cwd), "site");
        assert_eq!(project_name("other", cwd), "other");
    }

    proptest! {
        #[test]
        fn corrected_names_are_valid(s in "\\PC*") {
            prop_assume!(!s.trim().is_empty());
            prop_assert!(is_valid_package_name(&to_valid_package_name(&s)));
        }
    }
}
