// relcfg - A declarative release configuration record.
// Copyright (C) 2026 The ERGS developers <ergsonomic@googlegroups.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The release configuration record.

mod v0_1;

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use indexmap::{IndexSet, indexmap};
use itertools::Itertools as _;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    bump::{BumpError, BumpRule, Rewrite},
    template::{self, Vars},
    tracing::LogResult as _,
};

/// The name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "relcfg.toml";
/// The current version of the configuration file.
pub const VERSION: &str = "0.1";

/// The release configuration of a project.
///
/// The record is immutable: it is built once by a loader or
/// [`Config::default`], then only read through its accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The version of the configuration format.
    version: String,
    /// The name of the project, also used as the GitHub repository name.
    project_name: String,
    /// The organisation hosting the repository.
    organization: String,
    /// The release activities, in execution order.
    activities: Vec<String>,
    /// The version bump rules, in application order.
    version_bump_rules: Vec<BumpRule>,
    /// The changelog file.
    changelog_filename: String,
    /// The changelog template file.
    changelog_template: String,
    /// The packages needed to build and install the project.
    packaging_dependencies: IndexSet<String>,
    /// The command installing the project in the build container.
    install_command: String,
    /// The URL template of the source archive.
    source_url_template: String,
}

/// An invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is empty.
    #[error("`{field}` must not be empty")]
    EmptyField {
        /// The name of the field.
        field: &'static str,
    },
    /// There is no activity.
    #[error("`activities` must contain at least one activity")]
    NoActivities,
    /// An activity name is empty.
    #[error("Activity #{position} has an empty name")]
    EmptyActivity {
        /// The position of the activity, starting at 1.
        position: usize,
    },
    /// An activity is listed twice.
    #[error("Activity `{activity}` is listed more than once")]
    DuplicateActivity {
        /// The duplicated activity.
        activity: String,
    },
    /// A version bump rule has an empty path.
    #[error("Version bump rule #{position} has an empty path")]
    EmptyBumpPath {
        /// The position of the rule, starting at 1.
        position: usize,
    },
    /// Two version bump rules target the same file.
    #[error("Several version bump rules target {}", path.display())]
    DuplicateBumpPath {
        /// The duplicated path.
        path: PathBuf,
    },
    /// The pattern of a version bump rule is not a valid regex.
    #[error("Invalid version pattern for {}", path.display())]
    InvalidPattern {
        /// The path targeted by the rule.
        path: PathBuf,
        /// The regex error.
        #[source]
        source: regex::Error,
    },
    /// A template does not reference the release version.
    #[error("The template of {field} does not contain `$VERSION`")]
    MissingVersionPlaceholder {
        /// The field holding the template.
        field: String,
    },
    /// A packaging dependency is empty.
    #[error("`packaging.dependencies` must not contain empty names")]
    EmptyDependency,
    /// The install command cannot be split into shell words.
    #[error("`packaging.install_command` is not a valid shell command")]
    InvalidInstallCommand(#[source] shell_words::ParseError),
    /// A file referenced by the configuration does not exist.
    #[error("{} does not exist", path.display())]
    MissingFile {
        /// The missing path.
        path: PathBuf,
    },
}

/// An error that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path of the configuration file cannot be resolved.
    #[error("Failed to get the configuration file path")]
    ConfigFileError(#[from] ConfigFileError),
    /// There is no configuration file.
    #[error("No {CONFIG_FILE_NAME} found")]
    NoConfigFile,
    /// The configuration file cannot be read.
    #[error("Failed to read {CONFIG_FILE_NAME}")]
    ReadError(#[source] io::Error),
    /// The configuration file is invalid.
    #[error("Invalid configuration in {CONFIG_FILE_NAME}")]
    InvalidConfig(#[from] FromTomlError),
}

/// An error that can occur when parsing the TOML.
#[derive(Debug, Error)]
pub enum FromTomlError {
    /// The version of the configuration is not supported.
    #[error("Configuration version {version} is not supported")]
    UnsupportedVersion {
        /// The unsupported version.
        version: String,
    },
    /// The TOML cannot be parsed into a configuration.
    #[error("Failed to parse into a valid configuration")]
    ParseError(#[from] toml::de::Error),
    /// The configuration is parsed but invalid.
    #[error("The configuration is invalid")]
    Invalid(#[from] ConfigError),
}

/// An error that can occur when building the config file path.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The Git repo root cannot be determined.
    #[error("Failed to get the Git repo root")]
    RepoRootError(#[from] RepoRootError),
    /// The current directory cannot be determined.
    #[error("Failed to get the current directory")]
    CurrentDir(#[source] io::Error),
}

/// An error that can occur when getting the Git repo root.
#[derive(Debug, Error)]
pub enum RepoRootError {
    /// The `git` command cannot be run.
    #[error("Failed to run the git command")]
    CannotRunGit(#[source] io::Error),
    /// Git has returned an error.
    #[error("{0}")]
    GitError(String),
    /// The output of Git is not valid UTF-8.
    #[error("The output of the git command is not proper UTF-8")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

/// A minimal configuration to get the version.
///
/// The configuration format can evolve with time. It is versioned for this
/// purpose, so that relcfg is able to select the proper parser. This struct
/// allows to parse any configuration as long as it contains a version field.
#[derive(Debug, Deserialize)]
struct MinimalConfig {
    /// The version of the configuration.
    version: String,
}

impl Default for Config {
    /// Returns the release configuration of fixie-batch.
    fn default() -> Self {
        let activities = [
            "run tests",
            "bump version",
            "write changelog",
            "tag release",
            "push tag",
            "publish package",
            "create GitHub release",
        ];

        let packaging_dependencies = [
            "cyclus",
            "cycamore",
            "fixie",
            "pprintpp",
            "pytest",
            "pytest-tornado",
        ];

        Self {
            version: String::from(VERSION),
            project_name: String::from("fixie-batch"),
            organization: String::from("ergs"),
            activities: activities.into_iter().map(String::from).collect(),
            version_bump_rules: vec![BumpRule::new(
                "setup.py",
                r"VERSION\s*=.*",
                "VERSION = '$VERSION'",
            )],
            changelog_filename: String::from("CHANGELOG.rst"),
            changelog_template: String::from("TEMPLATE.rst"),
            packaging_dependencies: packaging_dependencies
                .into_iter()
                .map(String::from)
                .collect(),
            install_command: String::from("./setup.py install"),
            source_url_template: String::from(
                "https://pypi.io/packages/source/f/$PROJECT/$PROJECT-$VERSION.tar.gz",
            ),
        }
    }
}

impl Config {
    /// Loads the configuration from the project root.
    #[tracing::instrument(name = "load_config", level = "trace")]
    pub fn load() -> Result<Self, LoadError> {
        Self::load_from(&config_file()?)
    }

    /// Loads the configuration from `path`.
    #[tracing::instrument(level = "trace")]
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        match fs::read_to_string(path) {
            Ok(toml) => {
                tracing::debug!(?path, "loading the configuration");
                let config = Self::from_toml(&toml).log_err()?;
                tracing::debug!(?config);
                Ok(config)
            }

            Err(error) => {
                if error.kind() == io::ErrorKind::NotFound {
                    tracing::debug!(?path, "no configuration file");
                    Err(LoadError::NoConfigFile)
                } else {
                    Err(LoadError::ReadError(error)).log_err()
                }
            }
        }
    }

    /// Builds the configuration from its TOML representation.
    ///
    /// The configuration is validated before being returned.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_toml(toml: &str) -> Result<Self, FromTomlError> {
        let minimal_config: MinimalConfig = toml::from_str(toml)?;

        let config: Self = match minimal_config.version.as_str() {
            VERSION => toml::from_str::<v0_1::Config>(toml)?.into(),
            version => {
                return Err(FromTomlError::UnsupportedVersion {
                    version: version.to_owned(),
                });
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Returns the canonical TOML representation of the configuration.
    #[expect(
        clippy::missing_panics_doc,
        clippy::expect_used,
        reason = "We control the format, so a serialisation error would be a \
            bug in the code, not an error."
    )]
    pub fn to_toml(&self) -> String {
        toml::to_string(&v0_1::Config::from(self))
            .expect("Failed to serialise the configuration")
    }

    /// Returns the version of the configuration format.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the name of the project.
    ///
    /// This is also the name of the GitHub repository.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Returns the organisation hosting the repository.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Returns the release activities, in execution order.
    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Returns the version bump rules, in application order.
    pub fn version_bump_rules(&self) -> &[BumpRule] {
        &self.version_bump_rules
    }

    /// Returns the changelog file.
    pub fn changelog_filename(&self) -> &str {
        &self.changelog_filename
    }

    /// Returns the changelog template file.
    pub fn changelog_template(&self) -> &str {
        &self.changelog_template
    }

    /// Returns the packages needed to build and install the project.
    pub fn packaging_dependencies(&self) -> &IndexSet<String> {
        &self.packaging_dependencies
    }

    /// Returns the command installing the project.
    pub fn install_command(&self) -> &str {
        &self.install_command
    }

    /// Returns the URL template of the source archive.
    pub fn source_url_template(&self) -> &str {
        &self.source_url_template
    }

    /// Returns the variables available to templates for a release.
    pub fn template_vars(&self, version: &str) -> Vars {
        indexmap! {
            "PROJECT" => self.project_name.clone(),
            "GITHUB_ORG" => self.organization.clone(),
            "GITHUB_REPO" => self.project_name.clone(),
            "VERSION" => version.to_owned(),
        }
    }

    /// Returns the URL of the source archive for a release.
    pub fn source_url(&self, version: &str) -> String {
        template::expand(&self.source_url_template, &self.template_vars(version))
    }

    /// Returns the install command split into shell words.
    pub fn install_args(&self) -> Vec<String> {
        // The command has been validated when building the record.
        shell_words::split(&self.install_command).unwrap_or_default()
    }

    /// Applies the version bump rules to the files under `root`.
    ///
    /// Every rule is first read and rewritten in memory, in order. The files
    /// are then written only when `write` is true and no rule has failed, so
    /// an error never leaves the project partially bumped.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn bump_versions(
        &self,
        root: &Path,
        version: &str,
        write: bool,
    ) -> Result<Vec<(&BumpRule, Rewrite)>, BumpError> {
        let vars = self.template_vars(version);

        let rewrites = self
            .version_bump_rules
            .iter()
            .map(|rule| rule.plan(root, &vars).map(|rewrite| (rule, rewrite)))
            .collect::<Result<Vec<_>, _>>()?;

        if write {
            for (rule, rewrite) in &rewrites {
                rule.write(root, rewrite)?;
            }
        }

        Ok(rewrites)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("project", &self.project_name),
            ("organization", &self.organization),
            ("changelog.filename", &self.changelog_filename),
            ("changelog.template", &self.changelog_template),
            ("packaging.install_command", &self.install_command),
            ("source.url_template", &self.source_url_template),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }

        self.validate_activities()?;
        self.validate_bump_rules()?;

        if self.packaging_dependencies.iter().any(|dep| dep.trim().is_empty())
        {
            return Err(ConfigError::EmptyDependency);
        }

        shell_words::split(&self.install_command)
            .map_err(ConfigError::InvalidInstallCommand)?;

        if !template::has_placeholder(&self.source_url_template, "VERSION") {
            return Err(ConfigError::MissingVersionPlaceholder {
                field: String::from("source.url_template"),
            });
        }

        Ok(())
    }

    /// Checks that the files referenced by the configuration exist under
    /// `root`.
    ///
    /// This covers the files targeted by the version bump rules and the
    /// changelog template. The changelog itself may not exist before the first
    /// release.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_files(&self, root: &Path) -> Result<(), ConfigError> {
        let referenced = self
            .version_bump_rules
            .iter()
            .map(BumpRule::path)
            .chain([Path::new(&self.changelog_template)]);

        for path in referenced {
            tracing::trace!(?path, "checking the file exists");
            if !root.join(path).exists() {
                return Err(ConfigError::MissingFile {
                    path: path.to_owned(),
                })
                .log_err();
            }
        }

        Ok(())
    }

    /// Validates the activities.
    fn validate_activities(&self) -> Result<(), ConfigError> {
        if self.activities.is_empty() {
            return Err(ConfigError::NoActivities);
        }

        if let Some(index) = self
            .activities
            .iter()
            .position(|activity| activity.trim().is_empty())
        {
            return Err(ConfigError::EmptyActivity {
                position: index + 1,
            });
        }

        if let Some(activity) = self.activities.iter().duplicates().next() {
            return Err(ConfigError::DuplicateActivity {
                activity: activity.clone(),
            });
        }

        Ok(())
    }

    /// Validates the version bump rules.
    fn validate_bump_rules(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.version_bump_rules.iter().enumerate() {
            if rule.path().as_os_str().is_empty() {
                return Err(ConfigError::EmptyBumpPath {
                    position: index + 1,
                });
            }

            rule.regex().map_err(|source| ConfigError::InvalidPattern {
                path: rule.path().to_owned(),
                source,
            })?;

            if !template::has_placeholder(rule.template(), "VERSION") {
                return Err(ConfigError::MissingVersionPlaceholder {
                    field: format!(
                        "the version bump rule for {}",
                        rule.path().display()
                    ),
                });
            }
        }

        if let Some(rule) = self
            .version_bump_rules
            .iter()
            .duplicates_by(|rule| rule.normalized_path())
            .next()
        {
            return Err(ConfigError::DuplicateBumpPath {
                path: rule.path().to_owned(),
            });
        }

        Ok(())
    }
}

/// Returns the path of the configuration file.
pub fn config_file() -> Result<PathBuf, ConfigFileError> {
    Ok(project_root()?.join(CONFIG_FILE_NAME))
}

/// Returns the root of the project.
///
/// This is the root of the Git repository, or the current directory when not
/// in a Git repository.
#[tracing::instrument(level = "trace")]
pub fn project_root() -> Result<PathBuf, ConfigFileError> {
    match repo_root() {
        Ok(repo_root) => Ok(repo_root),
        Err(
            error @ (RepoRootError::GitError(_)
            | RepoRootError::CannotRunGit(_)),
        ) => {
            tracing::debug!(
                %error,
                "not in a Git repository, using the current directory"
            );
            env::current_dir().map_err(ConfigFileError::CurrentDir)
        }
        Err(error) => Err(error.into()),
    }
}

/// Returns the root of the Git repository.
fn repo_root() -> Result<PathBuf, RepoRootError> {
    let git_rev_parse = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(RepoRootError::CannotRunGit)?;

    if git_rev_parse.status.success() {
        let repo_root = String::from_utf8(git_rev_parse.stdout)?;
        Ok(PathBuf::from(repo_root.trim()))
    } else {
        let git_error = String::from_utf8(git_rev_parse.stderr)?;
        Err(RepoRootError::GitError(git_error.trim().to_owned()))
    }
}

impl From<v0_1::Config> for Config {
    fn from(config: v0_1::Config) -> Self {
        Self {
            version: config.version,
            project_name: config.project,
            organization: config.organization,
            activities: config.activities,
            version_bump_rules: config.version_bump,
            changelog_filename: config.changelog.filename,
            changelog_template: config.changelog.template,
            packaging_dependencies: config.packaging.dependencies,
            install_command: config.packaging.install_command,
            source_url_template: config.source.url_template,
        }
    }
}

impl From<&Config> for v0_1::Config {
    fn from(config: &Config) -> Self {
        Self {
            version: config.version.clone(),
            project: config.project_name.clone(),
            organization: config.organization.clone(),
            activities: config.activities.clone(),
            version_bump: config.version_bump_rules.clone(),
            changelog: v0_1::Changelog {
                filename: config.changelog_filename.clone(),
                template: config.changelog_template.clone(),
            },
            packaging: v0_1::Packaging {
                dependencies: config.packaging_dependencies.clone(),
                install_command: config.install_command.clone(),
            },
            source: v0_1::Source {
                url_template: config.source_url_template.clone(),
            },
        }
    }
}
