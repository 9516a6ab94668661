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

//! The `check` subcommand.

use clap::Parser;
use eyre::Result;

use crate::{
    config::{CONFIG_FILE_NAME, Config, project_root},
    success,
};

/// The check command.
#[derive(Debug, Parser)]
pub struct Check {
    /// Also check that the files referenced by the configuration exist.
    #[arg(long)]
    files: bool,
}

impl super::Command for Check {
    fn run(&self) -> Result<()> {
        let config = Config::load()?;

        if self.files {
            config.check_files(&project_root()?)?;
        }

        success!("The configuration in {CONFIG_FILE_NAME} is valid.");
        Ok(())
    }
}
