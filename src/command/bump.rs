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

//! The `bump` subcommand.

use clap::{Parser, builder::NonEmptyStringValueParser};
use eyre::Result;

use crate::{
    config::{Config, project_root},
    hint, success, warning,
};

/// The bump command.
#[derive(Debug, Parser)]
pub struct Bump {
    /// The version of the release.
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    version: String,
    /// Write the new versions instead of only printing them.
    #[arg(long, short = 'w')]
    write: bool,
}

impl super::Command for Bump {
    fn run(&self) -> Result<()> {
        let config = Config::load()?;
        let root = project_root()?;

        let rewrites = config.bump_versions(&root, &self.version, self.write)?;

        for (rule, rewrite) in &rewrites {
            let path = rule.path().display();

            if rewrite.replacements.is_empty() {
                warning!("{path}: no line matches `{}`.", rule.pattern());
                continue;
            }

            for replacement in &rewrite.replacements {
                println!(
                    "{path}:{}: {} -> {}",
                    replacement.line, replacement.old, replacement.new
                );
            }
        }

        let replaced: usize = rewrites.iter().map(|(_, r)| r.replaced()).sum();

        if self.write {
            success!("{replaced} version declaration(s) updated.");
        } else {
            hint!("Run `relcfg bump {} --write` to apply.", self.version);
        }

        Ok(())
    }
}
