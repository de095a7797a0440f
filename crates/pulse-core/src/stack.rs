//! Stack profile trait describing what a frontend skeleton consists of
//!
//! A profile fixes the scaffold arguments, the post-creation install chain,
//! the compiler configuration patch, the seeded files and folders, and the
//! upgrade set. Executables come from [`Settings`](crate::config::Settings).

use serde_json::Value;
use std::path::Path;

use crate::templates::{LINT_STAGED_CONFIG, PRETTIER_CONFIG};

/// A single package-manager step in the post-creation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallStep {
    pub label: &'static str,
    pub args: &'static [&'static str],
}

/// A field mutation applied to a generated JSON config file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigPatch {
    /// File path relative to the project root
    pub file: &'static str,
    /// Dotted field path
    pub field: &'static str,
    pub value: Value,
}

/// Configuration trait for supported frontend stacks
pub trait StackProfile: Clone + Send + Sync + 'static {
    /// Internal stack name
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Arguments passed to the scaffold runner to create `project_name`
    fn scaffold_args(&self, project_name: &str) -> Vec<String>;

    /// Ordered package-manager steps run after scaffolding
    fn install_chain(&self) -> &'static [InstallStep];

    /// Patch applied to the generated compiler configuration
    fn compiler_patch(&self) -> ConfigPatch;

    /// Template files copied into the project root
    fn seed_files(&self) -> &'static [&'static str];

    /// Folder, relative to the project root, that receives [`Self::source_folders`]
    fn source_root(&self) -> &'static str;

    fn source_folders(&self) -> &'static [&'static str];

    /// Dependencies whose versions the update pipeline reports
    fn tracked_dependencies(&self) -> &'static [&'static str];

    /// Package-manager arguments for the upgrade command
    fn upgrade_args(&self) -> &'static [&'static str];

    /// Where to read about upgrading
    fn upgrade_guide_url(&self) -> &'static str;

    /// Instructions shown after a successful creation
    fn next_steps(&self, dir: &Path, package_manager: &str) -> Vec<String>;
}

/// Next.js + TypeScript + Tailwind on the app router
#[derive(Debug, Clone, Copy, Default)]
pub struct NextStack;

const NEXT_INSTALL_CHAIN: &[InstallStep] = &[
    InstallStep {
        label: "@typescript-eslint/eslint-plugin",
        args: &["i", "@typescript-eslint/eslint-plugin"],
    },
    InstallStep {
        label: "prettier",
        args: &["i", "prettier", "--save-dev"],
    },
    InstallStep {
        label: "eslint-config-prettier",
        args: &["i", "eslint-config-prettier", "--save-dev"],
    },
    InstallStep {
        label: "husky",
        args: &["i", "husky", "--save-dev"],
    },
    InstallStep {
        label: "husky install",
        args: &["husky", "install"],
    },
    InstallStep {
        label: "pre-commit hook",
        args: &["husky", "add", ".husky/pre-commit", "pnpm lint-staged"],
    },
    InstallStep {
        label: "lint-staged",
        args: &["i", "lint-staged", "--save-dev"],
    },
];

impl StackProfile for NextStack {
    fn name(&self) -> &'static str {
        "next"
    }

    fn display_name(&self) -> &'static str {
        "Next.js"
    }

    fn scaffold_args(&self, project_name: &str) -> Vec<String> {
        [
            "create-next-app",
            project_name,
            "--use-pnpm",
            "--ts",
            "--eslint",
            "--app",
            "--src-dir",
            "--tailwind",
            "--import-alias",
            "@/*",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn install_chain(&self) -> &'static [InstallStep] {
        NEXT_INSTALL_CHAIN
    }

    fn compiler_patch(&self) -> ConfigPatch {
        ConfigPatch {
            file: "tsconfig.json",
            field: "compilerOptions.moduleResolution",
            value: Value::String("node".to_string()),
        }
    }

    fn seed_files(&self) -> &'static [&'static str] {
        &[LINT_STAGED_CONFIG, PRETTIER_CONFIG]
    }

    fn source_root(&self) -> &'static str {
        "src/app"
    }

    fn source_folders(&self) -> &'static [&'static str] {
        &["pages", "components", "utils", "hooks", "shared"]
    }

    fn tracked_dependencies(&self) -> &'static [&'static str] {
        &["next", "react", "react-dom"]
    }

    fn upgrade_args(&self) -> &'static [&'static str] {
        &[
            "up",
            "next",
            "react",
            "react-dom",
            "eslint-config-next",
            "--latest",
        ]
    }

    fn upgrade_guide_url(&self) -> &'static str {
        "https://nextjs.org/docs/pages/building-your-application/upgrading"
    }

    fn next_steps(&self, dir: &Path, package_manager: &str) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|cwd| dir.strip_prefix(cwd).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        steps.push(format!("{} dev", package_manager));

        steps
    }
}
