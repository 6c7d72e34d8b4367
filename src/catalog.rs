//! The fixed set of frameworks and variants that can be scaffolded.
//!
//! Variant names share one namespace across every framework, so a bare
//! template name given with `--template` always points at a single entry.

use owo_colors::{AnsiColors, OwoColorize, Stream};
use std::fmt::{Display, Formatter};

/// Placeholder replaced by the target directory in a custom command.
pub const TARGET_DIR_PLACEHOLDER: &str = "TARGET_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framework {
    pub name: &'static str,
    pub display: &'static str,
    pub color: AnsiColors,
    pub variants: &'static [FrameworkVariant],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkVariant {
    pub name: &'static str,
    pub display: &'static str,
    pub color: AnsiColors,
    /// External bootstrap command used instead of copying a bundled tree.
    pub custom_command: Option<&'static str>,
}

const fn variant(name: &'static str, display: &'static str, color: AnsiColors) -> FrameworkVariant {
    FrameworkVariant {
        name,
        display,
        color,
        custom_command: None,
    }
}

const fn custom(
    name: &'static str,
    display: &'static str,
    color: AnsiColors,
    command: &'static str,
) -> FrameworkVariant {
    FrameworkVariant {
        name,
        display,
        color,
        custom_command: Some(command),
    }
}

pub static FRAMEWORKS: &[Framework] = &[
    Framework {
        name: "vanilla",
        display: "Vanilla",
        color: AnsiColors::Yellow,
        variants: &[],
    },
    Framework {
        name: "vue",
        display: "Vue",
        color: AnsiColors::Green,
        variants: &[
            variant("vue", "JavaScript", AnsiColors::Yellow),
            variant("vue-ts", "TypeScript", AnsiColors::Blue),
            custom(
                "custom-create-vue",
                "Customize with create-vue ↗",
                AnsiColors::Green,
                "npm create vue@latest TARGET_DIR",
            ),
            custom(
                "custom-nuxt",
                "Nuxt ↗",
                AnsiColors::BrightGreen,
                "npm exec nuxi init TARGET_DIR",
            ),
        ],
    },
    Framework {
        name: "react",
        display: "React",
        color: AnsiColors::Cyan,
        variants: &[
            variant("react", "JavaScript", AnsiColors::Yellow),
            variant("react-ts", "TypeScript", AnsiColors::Blue),
            variant("react-swc", "JavaScript + SWC", AnsiColors::Yellow),
            variant("react-swc-ts", "TypeScript + SWC", AnsiColors::Blue),
        ],
    },
    Framework {
        name: "preact",
        display: "Preact",
        color: AnsiColors::Magenta,
        variants: &[
            variant("preact", "JavaScript", AnsiColors::Yellow),
            variant("preact-ts", "TypeScript", AnsiColors::Blue),
        ],
    },
    Framework {
        name: "lit",
        display: "Lit",
        color: AnsiColors::BrightRed,
        variants: &[
            variant("lit", "JavaScript", AnsiColors::Yellow),
            variant("lit-ts", "TypeScript", AnsiColors::Blue),
        ],
    },
    Framework {
        name: "svelte",
        display: "Svelte",
        color: AnsiColors::Red,
        variants: &[
            variant("svelte", "JavaScript", AnsiColors::Yellow),
            variant("svelte-ts", "TypeScript", AnsiColors::Blue),
            custom(
                "custom-svelte-kit",
                "SvelteKit ↗",
                AnsiColors::Red,
                "npm create svelte@latest TARGET_DIR",
            ),
        ],
    },
    Framework {
        name: "others",
        display: "Others",
        color: AnsiColors::Default,
        variants: &[custom(
            "create-vite-extra",
            "create-vite-extra ↗",
            AnsiColors::Default,
            "npm create vite-extra@latest TARGET_DIR",
        )],
    },
];

impl Framework {
    /// A framework without variants is selectable on its own.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.variants.is_empty()
    }

    fn as_variant(&self) -> FrameworkVariant {
        FrameworkVariant {
            name: self.name,
            display: self.display,
            color: self.color,
            custom_command: None,
        }
    }
}

/// Every selectable template in declaration order.
#[must_use]
pub fn flatten() -> Vec<FrameworkVariant> {
    FRAMEWORKS
        .iter()
        .flat_map(|f| {
            if f.is_leaf() {
                vec![f.as_variant()]
            } else {
                f.variants.to_vec()
            }
        })
        .collect()
}

#[must_use]
pub fn find_template(name: &str) -> Option<FrameworkVariant> {
    flatten().into_iter().find(|v| v.name == name)
}

#[must_use]
pub fn is_known_template(name: &str) -> bool {
    find_template(name).is_some()
}

#[must_use]
pub fn lookup_custom_command(name: &str) -> Option<&'static str> {
    find_template(name).and_then(|v| v.custom_command)
}

fn colored(label: &str, color: AnsiColors, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
        f,
        "{}",
        label.if_supports_color(Stream::Stdout, |s| s.color(color))
    )
}

impl Display for Framework {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        colored(self.display, self.color, f)
    }
}

impl Display for FrameworkVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        colored(self.display, self.color, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn template_names_are_unique() {
        let all = flatten();
        let unique: HashSet<_> = all.iter().map(|v| v.name).collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn framework_names_are_unique() {
        let unique: HashSet<_> = FRAMEWORKS.iter().map(|f| f.name).collect();
        assert_eq!(FRAMEWORKS.len(), unique.len());
    }

    #[test]
    fn leaf_frameworks_are_templates() {
        assert!(is_known_template("vanilla"));
        assert!(!is_known_template("others"));
        assert_eq!(flatten().first().map(|v| v.name), Some("vanilla"));
    }

    #[test]
    fn known_templates() {
        assert!(is_known_template("react-swc-ts"));
        assert!(is_known_template("custom-nuxt"));
        assert!(!is_known_template("angular"));
        assert!(!is_known_template(""));
    }

    #[test]
    fn custom_command_lookup_matches_by_name() {
        assert_eq!(
            lookup_custom_command("custom-nuxt"),
            Some("npm exec nuxi init TARGET_DIR")
        );
        assert_eq!(lookup_custom_command("vue-ts"), None);
        assert_eq!(lookup_custom_command("missing"), None);

        // Lookups leave the catalog untouched.
        assert_eq!(FRAMEWORKS[1].variants[0].name, "vue");
        assert_eq!(FRAMEWORKS[1].variants[3].name, "custom-nuxt");
    }

    #[test]
    fn custom_commands_carry_placeholder() {
        for v in flatten() {
            if let Some(cmd) = v.custom_command {
                assert!(cmd.contains(TARGET_DIR_PLACEHOLDER), "{}", v.name);
            }
        }
    }
}
