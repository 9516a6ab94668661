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

//! The `show` subcommand.

use clap::Parser;
use eyre::Result;

use crate::config::Config;

/// The show command.
#[derive(Debug, Parser)]
pub struct Show;

impl super::Command for Show {
    fn run(&self) -> Result<()> {
        let config = Config::load()?;
        print!("{}", config.to_toml());
        Ok(())
    }
}
