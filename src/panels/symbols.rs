// SPDX-License-Identifier: GPL-3.0-only

//! Fixed grid of special characters.

/// Panel title.
pub const SYMBOLS_TITLE: &str = "Posebni znakovi";

/// Symbols grid, four rows of eight.
pub const SYMBOL_ROWS: [[&str; 8]; 4] = [
    ["!", "@", "#", "$", "%", "^", "&", "*"],
    ["(", ")", "-", "_", "=", "+", "[", "]"],
    ["{", "}", "\\", "|", ";", ":", "'", "\""],
    ["<", ">", ",", ".", "?", "/", "~", "`"],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_has_32_unique_symbols() {
        let unique: HashSet<&str> = SYMBOL_ROWS.iter().flatten().copied().collect();
        assert_eq!(unique.len(), 32);
    }
}
