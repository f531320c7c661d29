//! String utility functions for names derived from workshop titles.
//!
//! Mods are served to Linux game servers, so every file and directory name
//! that ends up in the mods directory goes through [`safe_name`].

/// Characters kept as-is besides alphanumerics
const SAFE_PUNCTUATION: [char; 4] = [' ', '.', '_', '@'];

/// Prefix the game expects on mod directory names
pub const MOD_DIR_PREFIX: &str = "@";

/// Return a unix safe version of the given file name
///
/// Lowercases, drops everything but alphanumerics and `' ' . _ @`, trims
/// trailing spaces and turns the remaining spaces into underscores.
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
/// ```ignore
/// assert_eq!(safe_name("cTab.pbo.Gundy.bisign"), "ctab.pbo.gundy.bisign");
/// assert_eq!(safe_name("[BW] Bush Wars v1.3"), "bw_bush_wars_v1.3");
/// ```
pub fn safe_name(name: &str) -> String {
    // Lowercase first: some uppercase letters lower to sequences containing
    // combining marks, which the filter below has to see.
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || SAFE_PUNCTUATION.contains(c))
        .collect();
    kept.trim_end_matches(' ').replace(' ', "_")
}

/// Directory name an item with the given title is installed under
pub fn directory_name_for_title(title: &str) -> String {
    format!("{MOD_DIR_PREFIX}{}", safe_name(title))
}
