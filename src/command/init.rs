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

//! The `init` subcommand.

use std::fs;

use askama::Template;
use clap::Parser;
use eyre::{Result, bail};
use inquire::Text;
use thiserror::Error;

use crate::{
    config::{self, CONFIG_FILE_NAME, Config, config_file},
    hint, success,
};

/// The init command.
#[derive(Debug, Parser)]
pub struct Init {
    /// Use the default configuration.
    #[arg(long, short = 'd')]
    default: bool,
    /// Force the init process.
    #[arg(long, short = 'f')]
    force: bool,
}

/// Usage errors of `relcfg init`.
#[derive(Debug, Error)]
pub enum InitError {
    /// A configuration already exists.
    #[error("There is already a {CONFIG_FILE_NAME} in the current project")]
    ExistingConfig,
}

/// Parameters to generate a `relcfg.toml`.
#[derive(Debug, Template)]
#[template(path = "relcfg.toml.jinja", escape = "none")]
struct ConfigFile {
    /// The version of the configuration.
    version: &'static str,
    /// The name of the project, as a TOML string.
    project: String,
    /// The organisation hosting the repository, as a TOML string.
    organization: String,
}

impl super::Command for Init {
    fn run(&self) -> Result<()> {
        let config_file = config_file()?;

        if !self.force && config_file.exists() {
            bail!(InitError::ExistingConfig);
        }

        let template = if self.default {
            ConfigFile::default()
        } else {
            ConfigFile::run_wizard()?
        };

        let toml = template.render()?;

        // Ensure the answers of the wizard lead to a valid configuration.
        Config::from_toml(&toml)?;

        fs::write(config_file, format!("{toml}\n"))?;

        success!("A {CONFIG_FILE_NAME} has been created!");
        hint!("You can now edit it to adjust the configuration.");

        Ok(())
    }
}

impl ConfigFile {
    /// Builds the parameters for a project.
    fn new(project: &str, organization: &str) -> Self {
        Self {
            version: config::VERSION,
            project: toml_string(project),
            organization: toml_string(organization),
        }
    }

    /// Runs the wizard to fill the parameters for the configuration.
    fn run_wizard() -> Result<Self> {
        let defaults = Config::default();

        let project = Text::new("Project name")
            .with_default(defaults.project_name())
            .with_help_message("Also used as the name of the GitHub repository")
            .prompt()?;

        let organization = Text::new("GitHub organisation")
            .with_default(defaults.organization())
            .prompt()?;

        Ok(Self::new(&project, &organization))
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = Config::default();
        Self::new(defaults.project_name(), defaults.organization())
    }
}

/// Represents `value` as a TOML string.
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_owned()).to_string()
}
