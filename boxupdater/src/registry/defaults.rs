//! Repositories tracked on first start.

use super::Repository;

/// Asset filter shared by the built-in firmware repositories.
const UF2_FILTER: &str = r"\.uf2$";

/// (owner, name, description)
const DEFAULTS: [(&str, &str, &str); 4] = [
    ("JonnyHaystack", "HayBox", "HayBox"),
    ("OpenStickCommunity", "GP2040-CE", "GP2040-CE Firmware"),
    ("JulienBernard3383279", "pico-rectangle", "Pico Rectangle"),
    ("GRAMCTRL", "HayBox-GRAM", "HayBox-GRAM"),
];

/// Returns the built-in repository set.
pub fn default_repositories() -> Vec<Repository> {
    DEFAULTS
        .iter()
        .map(|(owner, name, description)| Repository {
            name: name.to_string(),
            display_name: name.to_string(),
            owner: owner.to_string(),
            description: description.to_string(),
            asset_filter: UF2_FILTER.to_string(),
        })
        .collect()
}
