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

//! A declarative release configuration record.
//!
//! The [`config::Config`] record describes how a project is released: its
//! identity, the ordered release activities, the version bump rules, the
//! changelog files, the packaging dependencies and the source archive URL. It
//! is loaded once from `relcfg.toml`, validated, then only read.

pub mod bump;
mod command;
pub mod config;
pub mod helpers;
pub mod template;
pub mod tracing;

pub use command::Relcfg;
