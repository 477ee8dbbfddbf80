//! Country and category catalog
//!
//! The static data behind the pickers: countries the provider serves and
//! the category sections of its feed, plus the search used by the country
//! dropdown (prefix matches first, then substring matches, capped).

use crate::prefs::Country;
use once_cell::sync::Lazy;

/// Maximum entries the country picker shows at once
pub const PICKER_LIMIT: usize = 50;

/// Categories of the provider's feed, in menu order. "top" is the
/// provider's name for the front-page mix.
pub const CATEGORIES: &[&str] = &[
    "top",
    "business",
    "crime",
    "domestic",
    "education",
    "entertainment",
    "environment",
    "food",
    "health",
    "lifestyle",
    "politics",
    "science",
    "sports",
    "technology",
    "tourism",
    "world",
    "other",
];

/// Check a category against the provider's sections
pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category.to_lowercase().as_str())
}

/// URL slug for a category label: lowercase, whitespace runs become "-"
pub fn category_slug(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Countries served by the provider: (name, ISO code)
const COUNTRY_TABLE: &[(&str, &str)] = &[
    ("Argentina", "ar"),
    ("Australia", "au"),
    ("Austria", "at"),
    ("Bangladesh", "bd"),
    ("Belgium", "be"),
    ("Brazil", "br"),
    ("Canada", "ca"),
    ("Chile", "cl"),
    ("China", "cn"),
    ("Colombia", "co"),
    ("Czech Republic", "cz"),
    ("Denmark", "dk"),
    ("Egypt", "eg"),
    ("Finland", "fi"),
    ("France", "fr"),
    ("Germany", "de"),
    ("Greece", "gr"),
    ("Hong Kong", "hk"),
    ("Hungary", "hu"),
    ("India", "in"),
    ("Indonesia", "id"),
    ("Ireland", "ie"),
    ("Israel", "il"),
    ("Italy", "it"),
    ("Japan", "jp"),
    ("Kenya", "ke"),
    ("Malaysia", "my"),
    ("Mexico", "mx"),
    ("Morocco", "ma"),
    ("Netherlands", "nl"),
    ("New Zealand", "nz"),
    ("Nigeria", "ng"),
    ("Norway", "no"),
    ("Pakistan", "pk"),
    ("Peru", "pe"),
    ("Philippines", "ph"),
    ("Poland", "pl"),
    ("Portugal", "pt"),
    ("Romania", "ro"),
    ("Saudi Arabia", "sa"),
    ("Singapore", "sg"),
    ("Slovakia", "sk"),
    ("South Africa", "za"),
    ("South Korea", "kr"),
    ("Spain", "es"),
    ("Sweden", "se"),
    ("Switzerland", "ch"),
    ("Taiwan", "tw"),
    ("Thailand", "th"),
    ("Turkey", "tr"),
    ("Ukraine", "ua"),
    ("United Arab Emirates", "ae"),
    ("United Kingdom", "gb"),
    ("United States", "us"),
    ("Venezuela", "ve"),
    ("Vietnam", "vn"),
];

/// The catalog as typed records, in table order
pub static COUNTRIES: Lazy<Vec<Country>> = Lazy::new(|| {
    COUNTRY_TABLE
        .iter()
        .map(|(name, code)| Country::new(*name, *code))
        .collect()
});

/// Look a country up by its ISO code
pub fn country_by_code(code: &str) -> Option<&'static Country> {
    let code = code.to_lowercase();
    COUNTRIES.iter().find(|c| c.code == code)
}

/// Picker search: case-insensitive, names starting with the term rank
/// before names merely containing it, both runs sorted alphabetically,
/// capped at [`PICKER_LIMIT`]. An empty term lists the first entries.
pub fn search_countries(term: &str) -> Vec<&'static Country> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return COUNTRIES.iter().take(PICKER_LIMIT).collect();
    }

    let mut starts_with: Vec<&Country> = Vec::new();
    let mut contains: Vec<&Country> = Vec::new();

    for country in COUNTRIES.iter() {
        let name = country.name.to_lowercase();
        if name.starts_with(&needle) {
            starts_with.push(country);
        } else if name.contains(&needle) {
            contains.push(country);
        }
    }

    starts_with.sort_by(|a, b| a.name.cmp(&b.name));
    contains.sort_by(|a, b| a.name.cmp(&b.name));

    starts_with
        .into_iter()
        .chain(contains)
        .take(PICKER_LIMIT)
        .collect()
}
