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

//! Version bump rules.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    template::{self, Vars},
    tracing::LogResult as _,
};

/// A rule rewriting the version declarations of a file.
///
/// Each line of the file whose start matches `pattern` is replaced as a whole
/// by `template`, expanded with the release variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BumpRule {
    /// The path of the file, relative to the project root.
    path: PathBuf,
    /// The regex matching the start of a version declaration line.
    pattern: String,
    /// The template of the new line.
    template: String,
}

/// The result of applying a [`BumpRule`] to some contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten contents.
    pub contents: String,
    /// The replaced lines.
    pub replacements: Vec<Replacement>,
}

/// A replaced line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// The line number, starting at 1.
    pub line: usize,
    /// The original line, without its line ending.
    pub old: String,
    /// The new line, without its line ending.
    pub new: String,
}

/// Errors that can occur when applying a [`BumpRule`] to a file.
#[derive(Debug, Error)]
pub enum BumpError {
    /// The pattern of the rule is not a valid regex.
    #[error("Invalid version pattern for {}", path.display())]
    InvalidPattern {
        /// The path targeted by the rule.
        path: PathBuf,
        /// The regex error.
        #[source]
        source: regex::Error,
    },
    /// The file cannot be read.
    #[error("Failed to read {}", path.display())]
    Read {
        /// The path of the file.
        path: PathBuf,
        /// The IO error.
        #[source]
        source: io::Error,
    },
    /// The file cannot be written.
    #[error("Failed to write {}", path.display())]
    Write {
        /// The path of the file.
        path: PathBuf,
        /// The IO error.
        #[source]
        source: io::Error,
    },
}

impl BumpRule {
    /// Builds a new rule.
    pub fn new(
        path: impl Into<PathBuf>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            pattern: pattern.into(),
            template: template.into(),
        }
    }

    /// Returns the path of the targeted file, relative to the project root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the pattern matching version declarations.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the template of the new version declaration.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Builds the regex matching version declarations.
    ///
    /// The pattern is anchored at the start of the line.
    pub fn regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!("^(?:{})", self.pattern))
    }

    /// Rewrites the version declarations in `contents`.
    ///
    /// Line endings are preserved, including the absence of a final one.
    pub fn rewrite(
        &self,
        contents: &str,
        vars: &Vars,
    ) -> Result<Rewrite, regex::Error> {
        let regex = self.regex()?;
        let new_line = template::expand(&self.template, vars);

        let mut rewritten = String::with_capacity(contents.len());
        let mut replacements = vec![];

        for (index, line) in contents.split_inclusive('\n').enumerate() {
            let (body, ending) = split_line_ending(line);

            if regex.is_match(body) {
                tracing::trace!(line = index + 1, old = body, new = %new_line);
                rewritten.push_str(&new_line);
                rewritten.push_str(ending);
                replacements.push(Replacement {
                    line: index + 1,
                    old: body.to_owned(),
                    new: new_line.clone(),
                });
            } else {
                rewritten.push_str(line);
            }
        }

        Ok(Rewrite {
            contents: rewritten,
            replacements,
        })
    }

    /// Applies the rule to its file under `root`.
    ///
    /// The file is only written back when `write` is true and at least one
    /// line has been replaced.
    #[tracing::instrument(level = "trace", skip(vars))]
    pub fn apply(
        &self,
        root: &Path,
        vars: &Vars,
        write: bool,
    ) -> Result<Rewrite, BumpError> {
        let rewrite = self.plan(root, vars)?;

        if write {
            self.write(root, &rewrite)?;
        }

        Ok(rewrite)
    }

    /// Reads the file of the rule under `root` and rewrites it in memory.
    #[tracing::instrument(level = "trace", skip(vars))]
    pub fn plan(&self, root: &Path, vars: &Vars) -> Result<Rewrite, BumpError> {
        let path = root.join(&self.path);

        let contents = fs::read_to_string(&path)
            .map_err(|source| BumpError::Read {
                path: path.clone(),
                source,
            })
            .log_err()?;

        let rewrite = self
            .rewrite(&contents, vars)
            .map_err(|source| BumpError::InvalidPattern {
                path: self.path.clone(),
                source,
            })
            .log_err()?;

        if rewrite.replacements.is_empty() {
            tracing::warn!(
                ?path,
                pattern = %self.pattern,
                "no line matches the version pattern"
            );
        }

        Ok(rewrite)
    }

    /// Writes a rewrite planned by [`BumpRule::plan`] to the file under
    /// `root`.
    ///
    /// Nothing is written when no line has been replaced.
    #[tracing::instrument(level = "trace", skip(rewrite))]
    pub fn write(&self, root: &Path, rewrite: &Rewrite) -> Result<(), BumpError> {
        if rewrite.replacements.is_empty() {
            return Ok(());
        }

        let path = root.join(&self.path);
        tracing::debug!(?path, "writing the new version");

        fs::write(&path, &rewrite.contents)
            .map_err(|source| BumpError::Write { path, source })
            .log_err()
    }

    /// Returns the path of the targeted file, lexically normalised.
    ///
    /// `.` components are dropped and `dir/..` pairs are collapsed, so two
    /// spellings of the same relative path give the same key. Symbolic links
    /// are not resolved.
    pub fn normalized_path(&self) -> PathBuf {
        let mut normalized = PathBuf::new();

        for component in self.path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    let parent_is_normal = matches!(
                        normalized.components().next_back(),
                        Some(Component::Normal(_))
                    );

                    if parent_is_normal {
                        normalized.pop();
                    } else {
                        normalized.push(component);
                    }
                }
                Component::Prefix(_)
                | Component::RootDir
                | Component::Normal(_) => normalized.push(component),
            }
        }

        normalized
    }
}

impl Rewrite {
    /// Returns the number of replaced lines.
    pub fn replaced(&self) -> usize {
        self.replacements.len()
    }
}

/// Splits a line from its line ending.
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
