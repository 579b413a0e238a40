// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! File names for generated group pages.

/// Extension appended to every generated page.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Accented characters folded to ASCII. Applied after lowercasing.
const FOLDS: [(char, char); 6] = [
    ('á', 'a'),
    ('é', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ú', 'u'),
    ('ñ', 'n'),
];

/// Maps a group's display name to its page file name.
///
/// The name is lowercased, spaces become underscores, and the Spanish
/// accented vowels and `ñ` are folded to ASCII. Every other character,
/// including `/` and non-Latin letters, is kept as is.
///
/// # Example
///
/// ```
/// use insomnia2md::filename::md_filename;
///
/// assert_eq!(md_filename("Usuarios á"), "usuarios_a.md");
/// assert_eq!(md_filename("Año Fiscal"), "ano_fiscal.md");
/// ```
#[must_use]
pub fn md_filename(name: &str) -> String {
    let mut out: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            c => FOLDS
                .iter()
                .find_map(|&(from, to)| (from == c).then_some(to))
                .unwrap_or(c),
        })
        .collect();
    out.push_str(MARKDOWN_EXTENSION);
    out
}
