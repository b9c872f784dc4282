//! Name forms derived from a command name
//!
//! The deriver turns one verbatim command name into every form a template
//! may reference: the raw name, its last path segment, and English plural
//! and singular forms.

use crate::{models::ParameterBinding, request::ScaffoldRequest};

/// Binding key for the verbatim command name
pub const COMMAND_NAME: &str = "commandName";
/// Binding key for the last `/` segment of the command name
pub const COMMAND_BASE_NAME: &str = "commandBaseName";
/// Binding key for the command name with its last segment pluralized
pub const COMMAND_NAME_PLURAL: &str = "commandNamePlural";
/// Binding key for the command name with its last segment singularized
pub const COMMAND_NAME_SINGULAR: &str = "commandNameSingular";

/// Words whose plural and singular forms are identical
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
];

/// (singular, plural) pairs that suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("analysis", "analyses"),
    ("axis", "axes"),
    ("bus", "buses"),
    ("calf", "calves"),
    ("campus", "campuses"),
    ("child", "children"),
    ("criterion", "criteria"),
    ("echo", "echoes"),
    ("elf", "elves"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("hero", "heroes"),
    ("index", "indices"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("loaf", "loaves"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("potato", "potatoes"),
    ("quiz", "quizzes"),
    ("self", "selves"),
    ("shelf", "shelves"),
    ("status", "statuses"),
    ("thief", "thieves"),
    ("tomato", "tomatoes"),
    ("tooth", "teeth"),
    ("veto", "vetoes"),
    ("vertex", "vertices"),
    ("virus", "viruses"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

/// Singular nouns ending in `s` that take `-es` in the plural
const SINGULAR_ENDING_IN_S: &[&str] = &[
    "alias", "atlas", "bias", "canvas", "gas", "iris", "lens", "pancreas", "thermos",
];

/// Singular nouns whose `-ie`/`-che` ending the suffix rules would strip
const SINGULAR_ENDING_IN_E: &[&str] = &[
    "ache", "avalanche", "cache", "cliche", "cookie", "die", "headache", "lie", "movie",
    "niche", "pie", "quiche", "rookie", "tie", "zombie",
];

/// Computes the parameter binding for a scaffold request
pub struct NameDeriver;

impl NameDeriver {
    /// Derive every name form from the request's command name
    ///
    /// Pure: the same request always yields the same binding.
    pub fn derive(request: &ScaffoldRequest) -> ParameterBinding {
        let name = request.command_name();
        let (prefix, base) = match name.rfind('/') {
            Some(idx) => (&name[..=idx], &name[idx + 1..]),
            None => ("", name),
        };

        [
            (COMMAND_NAME, name.to_string()),
            (COMMAND_BASE_NAME, base.to_string()),
            (COMMAND_NAME_PLURAL, format!("{}{}", prefix, pluralize(base))),
            (
                COMMAND_NAME_SINGULAR,
                format!("{}{}", prefix, singularize(base)),
            ),
        ]
        .into_iter()
        .collect()
    }
}

/// Pluralize the last word of an identifier using English rules
///
/// Already-plural words are returned unchanged. The case of the input is
/// kept: `Person` -> `People`, `CHILD` -> `CHILDREN`, `order_item` ->
/// `order_items`, `shipOrder` -> `shipOrders`.
pub fn pluralize(word: &str) -> String {
    inflect_last_word(word, pluralize_lower)
}

/// Singularize the last word of an identifier using English rules
///
/// Already-singular words are returned unchanged.
pub fn singularize(word: &str) -> String {
    inflect_last_word(word, singularize_lower)
}

fn pluralize_lower(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return plural.to_string();
    }
    if SINGULAR_ENDING_IN_S.contains(&word) {
        return format!("{}es", word);
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == word) || looks_plural(word) {
        return word.to_string();
    }

    if word.len() > 2 && word.ends_with("is") {
        format!("{}es", &word[..word.len() - 2])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        format!("{}es", word)
    } else if ends_with_consonant_y(word) {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{}s", word)
    }
}

fn singularize_lower(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return singular.to_string();
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == word) || !looks_plural(word) {
        return word.to_string();
    }

    if let Some(stem) = word
        .strip_suffix("es")
        .filter(|stem| SINGULAR_ENDING_IN_S.contains(stem))
    {
        return stem.to_string();
    }
    if let Some(stem) = word
        .strip_suffix('s')
        .filter(|stem| SINGULAR_ENDING_IN_E.contains(stem))
    {
        return stem.to_string();
    }

    if word.len() > 3 && word.ends_with("ies") {
        format!("{}y", &word[..word.len() - 3])
    } else if ["sses", "shes", "ches", "xes", "zes"]
        .iter()
        .any(|s| word.ends_with(s))
    {
        word[..word.len() - 2].to_string()
    } else {
        word[..word.len() - 1].to_string()
    }
}

/// A lowercase word ending in `s` that is not `-ss`, `-us`, `-is` or a
/// known singular
fn looks_plural(word: &str) -> bool {
    word.len() > 1
        && !SINGULAR_ENDING_IN_S.contains(&word)
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
}

fn ends_with_consonant_y(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('y'), Some(prev)) => !"aeiou".contains(prev),
        _ => false,
    }
}

/// Apply a lowercase inflection to the trailing word, keeping the rest
///
/// The trailing word starts after the last `_`, `-`, space or at the last
/// lowercase-to-uppercase boundary.
fn inflect_last_word(word: &str, inflect: fn(&str) -> String) -> String {
    if word.is_empty() {
        return String::new();
    }

    let start = last_word_start(word);
    let (head, tail) = word.split_at(start);
    if tail.is_empty() {
        return word.to_string();
    }

    let lower = tail.to_lowercase();
    let inflected = inflect(&lower);
    format!("{}{}", head, restore_case(tail, &lower, &inflected))
}

fn last_word_start(word: &str) -> usize {
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (idx, c) in word.char_indices() {
        if matches!(c, '_' | '-' | ' ') {
            start = idx + c.len_utf8();
        } else if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            start = idx;
        }
        prev = Some(c);
    }
    start
}

/// Map the casing of `original` onto `inflected`
///
/// The shared prefix keeps the original characters; an all-uppercase
/// original yields an all-uppercase result.
fn restore_case(original: &str, lower: &str, inflected: &str) -> String {
    let alphabetic: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if alphabetic.len() > 1 && alphabetic.iter().all(|c| c.is_uppercase()) {
        return inflected.to_uppercase();
    }

    let shared = lower
        .char_indices()
        .zip(inflected.chars())
        .take_while(|((_, a), b)| a == b)
        .last()
        .map(|((idx, c), _)| idx + c.len_utf8())
        .unwrap_or(0);

    let original_prefix: String = original.chars().take(lower[..shared].chars().count()).collect();
    let mut result = original_prefix;
    let rest = &inflected[shared..];
    if shared == 0 && original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = rest.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    } else {
        result.push_str(rest);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(name: &str) -> ParameterBinding {
        NameDeriver::derive(&ScaffoldRequest::new(name).unwrap())
    }

    #[test]
    fn test_derive_simple_name() {
        let binding = derive("ship");
        assert_eq!(binding.get(COMMAND_NAME), Some("ship"));
        assert_eq!(binding.get(COMMAND_BASE_NAME), Some("ship"));
        assert_eq!(binding.get(COMMAND_NAME_PLURAL), Some("ships"));
        assert_eq!(binding.get(COMMAND_NAME_SINGULAR), Some("ship"));
    }

    #[test]
    fn test_derive_nested_name() {
        let binding = derive("users/category");
        assert_eq!(binding.get(COMMAND_NAME), Some("users/category"));
        assert_eq!(binding.get(COMMAND_BASE_NAME), Some("category"));
        assert_eq!(binding.get(COMMAND_NAME_PLURAL), Some("users/categories"));
        assert_eq!(binding.get(COMMAND_NAME_SINGULAR), Some("users/category"));
    }

    #[test]
    fn test_derive_keeps_case() {
        let binding = derive("ShipOrder");
        assert_eq!(binding.get(COMMAND_NAME), Some("ShipOrder"));
        assert_eq!(binding.get(COMMAND_NAME_PLURAL), Some("ShipOrders"));
    }

    #[test]
    fn test_derive_is_pure() {
        assert_eq!(derive("box"), derive("box"));
    }

    #[test]
    fn test_pluralize_suffix_rules() {
        assert_eq!(pluralize("ship"), "ships");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("batch"), "batches");
        assert_eq!(pluralize("wish"), "wishes");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("basis"), "bases");
    }

    #[test]
    fn test_pluralize_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("knife"), "knives");
    }

    #[test]
    fn test_pluralize_already_plural() {
        assert_eq!(pluralize("users"), "users");
        assert_eq!(pluralize("people"), "people");
    }

    #[test]
    fn test_pluralize_preserves_case() {
        assert_eq!(pluralize("Person"), "People");
        assert_eq!(pluralize("CHILD"), "CHILDREN");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("order_item"), "order_items");
        assert_eq!(pluralize("shipOrder"), "shipOrders");
        assert_eq!(pluralize("big-box"), "big-boxes");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("ships"), "ship");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("Statuses"), "Status");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("class"), "class");
        assert_eq!(singularize("ship"), "ship");
        assert_eq!(singularize("order_items"), "order_item");
    }

    #[test]
    fn test_singular_nouns_ending_in_s() {
        assert_eq!(pluralize("alias"), "aliases");
        assert_eq!(pluralize("gas"), "gases");
        assert_eq!(pluralize("canvas"), "canvases");
        assert_eq!(pluralize("Atlas"), "Atlases");
        assert_eq!(pluralize("bias"), "biases");
        assert_eq!(pluralize("aliases"), "aliases");
        assert_eq!(singularize("aliases"), "alias");
        assert_eq!(singularize("gases"), "gas");
        assert_eq!(singularize("alias"), "alias");
        assert_eq!(singularize("thermoses"), "thermos");
    }

    #[test]
    fn test_nouns_keeping_trailing_e() {
        assert_eq!(singularize("movies"), "movie");
        assert_eq!(singularize("cookies"), "cookie");
        assert_eq!(singularize("caches"), "cache");
        assert_eq!(singularize("niches"), "niche");
        assert_eq!(singularize("ties"), "tie");
        assert_eq!(singularize("pies"), "pie");
        assert_eq!(singularize("user_caches"), "user_cache");
        assert_eq!(pluralize("movie"), "movies");
        assert_eq!(pluralize("cache"), "caches");
        assert_eq!(singularize("batches"), "batch");
        assert_eq!(singularize("stories"), "story");
    }

    #[test]
    fn test_empty_word() {
        assert_eq!(pluralize(""), "");
        assert_eq!(singularize(""), "");
    }
}
