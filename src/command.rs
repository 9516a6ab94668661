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

//! The command line interface.

mod bump;
mod check;
mod init;
mod show;
mod source_url;

use clap::Parser;
use eyre::Result;

use self::{
    bump::Bump,
    check::Check,
    init::{Init, InitError},
    show::Show,
    source_url::SourceUrl,
};
use crate::{config::LoadError, error, hint};

/// A declarative release configuration record.
#[derive(Debug, Parser)]
#[command(author, version)]
pub enum Relcfg {
    /// Initialises the release configuration.
    Init(Init),
    /// Prints the release configuration.
    Show(Show),
    /// Validates the release configuration.
    Check(Check),
    /// Rewrites the version declarations for a release.
    Bump(Bump),
    /// Prints the URL of the source archive of a release.
    SourceUrl(SourceUrl),
}

trait Command {
    /// Runs the command.
    fn run(&self) -> Result<()>;
}

impl Relcfg {
    /// Runs relcfg.
    pub fn run() -> Result<()> {
        let result = match Self::parse() {
            Self::Init(init) => init.run(),
            Self::Show(show) => show.run(),
            Self::Check(check) => check.run(),
            Self::Bump(bump) => bump.run(),
            Self::SourceUrl(source_url) => source_url.run(),
        };

        match result {
            Err(e) => handle_errors(e),
            Ok(()) => Ok(()),
        }
    }
}

fn handle_errors(e: color_eyre::Report) -> Result<()> {
    if let Some(e) = e.downcast_ref::<InitError>() {
        match e {
            InitError::ExistingConfig => {
                error!("{e}");
                hint!("You can force the command by running `relcfg init -f`.");
            }
        }
        std::process::exit(exitcode::USAGE);
    } else if let Some(e @ LoadError::NoConfigFile) =
        e.downcast_ref::<LoadError>()
    {
        error!("{e}");
        hint!("You can create one by running `relcfg init`.");
        std::process::exit(exitcode::CONFIG);
    } else {
        Err(e)
    }
}
