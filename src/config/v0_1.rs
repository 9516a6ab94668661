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

//! Configuration for relcfg, version 0.1.

// NOTE: Never update the fields of the types defined in this file. Create a new
// version instead.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::bump::BumpRule;

/// The relcfg configuration file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The version of the configuration.
    pub version: String,
    /// The name of the project, also used as the GitHub repository name.
    pub project: String,
    /// The organisation hosting the repository.
    pub organization: String,
    /// The release activities, in execution order.
    pub activities: Vec<String>,
    /// The version bump rules.
    #[serde(default)]
    pub version_bump: Vec<BumpRule>,
    /// The changelog configuration.
    pub changelog: Changelog,
    /// The packaging configuration.
    pub packaging: Packaging,
    /// The source archive configuration.
    pub source: Source,
}

/// Changelog configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Changelog {
    /// The changelog file.
    pub filename: String,
    /// The changelog template file.
    pub template: String,
}

/// Packaging configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Packaging {
    /// The packages needed to build and install the project.
    #[serde(default)]
    pub dependencies: IndexSet<String>,
    /// The command installing the project in the build container.
    pub install_command: String,
}

/// Source archive configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Source {
    /// The URL template of the source archive.
    pub url_template: String,
}
