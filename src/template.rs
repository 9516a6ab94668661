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

//! Expansion of `$VARIABLE` placeholders in templates.
//!
//! Templates reference variables either as `$NAME` or as `${NAME}`, where
//! `NAME` is made of ASCII letters, digits and underscores. The braced form
//! allows a variable to be directly followed by such a character, like in
//! `${VERSION}rc1`.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Variables available to templates, by name.
pub type Vars = IndexMap<&'static str, String>;

/// Matches `${NAME}` in group 1 or `$NAME` in group 2.
#[expect(
    clippy::expect_used,
    reason = "The regex is a literal, so failing to build it would be a bug."
)]
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))")
        .expect("Invalid regex")
});

/// Expands the variables in `template`.
///
/// Variables missing from `vars` are left untouched.
pub fn expand(template: &str, vars: &Vars) -> String {
    VARIABLE
        .replace_all(template, |captures: &Captures<'_>| {
            let placeholder = captures.get(0).map_or("", |m| m.as_str());
            vars.get(variable_name(captures))
                .cloned()
                .unwrap_or_else(|| placeholder.to_owned())
        })
        .into_owned()
}

/// Returns whether `template` references the variable `name`.
pub fn has_placeholder(template: &str, name: &str) -> bool {
    VARIABLE
        .captures_iter(template)
        .any(|captures| variable_name(&captures) == name)
}

/// Returns the name of the variable matched by [`VARIABLE`].
fn variable_name<'h>(captures: &Captures<'h>) -> &'h str {
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map_or("", |m| m.as_str())
}
