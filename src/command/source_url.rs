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

//! The `source-url` subcommand.

use clap::{Parser, builder::NonEmptyStringValueParser};
use eyre::Result;

use crate::config::Config;

/// The source-url command.
#[derive(Debug, Parser)]
pub struct SourceUrl {
    /// The version of the release.
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    version: String,
}

impl super::Command for SourceUrl {
    fn run(&self) -> Result<()> {
        let config = Config::load()?;
        println!("{}", config.source_url(&self.version));
        Ok(())
    }
}
