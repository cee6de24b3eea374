use std::collections::HashMap;

use crate::error::{Error, Result};

const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];

const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

const BUILTIN_PALETTES: &[(&str, &[&str])] = &[
    ("tableau10", TABLEAU10),
    ("category10", CATEGORY10),
    ("dark2", DARK2),
    ("set3", SET3),
];

pub const DEFAULT_PALETTE: &str = "tableau10";

pub fn builtin_palette(name: &str) -> Result<&'static [&'static str]> {
    let normalized = name.trim().to_ascii_lowercase().replace(['-', '_'], "");
    BUILTIN_PALETTES
        .iter()
        .find(|(n, _)| *n == normalized)
        .map(|(_, colors)| *colors)
        .ok_or_else(|| Error::UnknownPalette {
            name: name.to_string(),
            available: list_palettes().join(", "),
        })
}

pub fn list_palettes() -> Vec<&'static str> {
    BUILTIN_PALETTES.iter().map(|(n, _)| *n).collect()
}

/// Ordinal scale mapping each domain value to a palette colour.
///
/// The i-th domain value gets `palette[i % palette.len()]`, so colours
/// repeat once the domain outgrows the palette.
#[derive(Debug, Clone)]
pub struct CategoricalScale {
    palette: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoricalScale {
    pub fn new<S: AsRef<str>>(domain: &[S], palette: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(domain.len());
        for value in domain {
            let next = index.len();
            index.entry(value.as_ref().to_string()).or_insert(next);
        }
        Self { palette, index }
    }

    /// Colour for a domain value; `None` for values outside the domain or
    /// an empty palette.
    pub fn color(&self, value: &str) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        let slot = self.index.get(value)?;
        Some(self.palette[slot % self.palette.len()].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tableau() -> Vec<String> {
        TABLEAU10.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn assigns_palette_in_domain_order() {
        let scale = CategoricalScale::new(&["Action", "RPG", "Sports"], tableau());
        assert_eq!(scale.color("Action"), Some("#4e79a7"));
        assert_eq!(scale.color("RPG"), Some("#f28e2c"));
        assert_eq!(scale.color("Sports"), Some("#e15759"));
        assert_eq!(scale.color("Puzzle"), None);
    }

    #[test]
    fn cycles_when_domain_exceeds_palette() {
        let domain: Vec<String> = (0..12).map(|i| format!("genre-{i}")).collect();
        let scale = CategoricalScale::new(&domain, tableau());
        assert_eq!(scale.color("genre-10"), scale.color("genre-0"));
        assert_eq!(scale.color("genre-11"), scale.color("genre-1"));
        assert_ne!(scale.color("genre-9"), scale.color("genre-0"));
    }

    #[test]
    fn repeated_domain_values_keep_their_first_slot() {
        let scale = CategoricalScale::new(&["RPG", "RPG", "Action"], tableau());
        assert_eq!(scale.color("Action"), Some("#f28e2c"));
    }

    #[test]
    fn builtin_palette_names_are_forgiving() {
        assert_eq!(builtin_palette("Tableau-10").unwrap().len(), 10);
        assert_eq!(builtin_palette(" category_10 ").unwrap()[0], "#1f77b4");
        let err = builtin_palette("viridis").unwrap_err();
        assert!(err.to_string().contains("tableau10"));
    }
}
