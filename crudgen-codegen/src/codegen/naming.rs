//! Naming utilities for code generation
//!
//! Only the first character of an identifier is ever re-cased; internal
//! capitals of mixed-case names such as `inDiVIdual` are left untouched.

/// Upper-case the first character, leaving the rest unchanged
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest unchanged
pub fn uncapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Irregular plurals (matched against the last word segment)
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("datum", "data"),
    ("medium", "media"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
];

/// Words with no distinct plural form
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "moose",
    "data",
    "metadata",
    "news",
];

/// Pluralize an identifier using English grammar rules
///
/// Irregular and uncountable nouns are recognised on the last segment of a
/// camelCase or snake_case identifier (`salesPerson` -> `salesPeople`).
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return word.to_string();
    }

    let segment_start = last_segment_start(word);
    let (head, segment) = word.split_at(segment_start);
    let segment_lower = segment.to_lowercase();

    if UNCOUNTABLES.contains(&segment_lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULARS {
        if segment_lower == *singular {
            let plural = if segment.starts_with(|c: char| c.is_uppercase()) {
                capitalize(plural)
            } else {
                plural.to_string()
            };
            return format!("{}{}", head, plural);
        }
    }

    // ASCII lower-casing keeps byte offsets aligned with `word`
    let lower = word.to_ascii_lowercase();

    // Words ending in -is → -es (analysis → analyses, basis → bases)
    if lower.ends_with("is") && lower.len() > 2 {
        return format!("{}es", &word[..word.len() - 2]);
    }

    // Words ending in -f or -fe → -ves (leaf → leaves, knife → knives)
    if lower.ends_with("fe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    let f_to_ves: &[&str] = &[
        "leaf", "shelf", "self", "half", "calf", "loaf", "thief", "wolf",
    ];
    if f_to_ves.contains(&segment_lower.as_str()) {
        return format!("{}ves", &word[..word.len() - 1]);
    }

    // Words ending in -o: some take -es
    let o_to_oes: &[&str] = &["hero", "potato", "tomato", "echo", "veto"];
    if o_to_oes.contains(&segment_lower.as_str()) {
        return format!("{}es", word);
    }

    // Standard rules: -s, -x, -z, -ch, -sh → add -es
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{}es", word);
    }

    // Words ending in consonant + y → -ies
    if lower.ends_with('y') && lower.len() > 1 {
        let before_y = lower.as_bytes()[lower.len() - 2];
        if !b"aeiou".contains(&before_y) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    // Default: just add -s
    format!("{}s", word)
}

/// Byte offset of the last word in a camelCase / snake_case identifier
fn last_segment_start(word: &str) -> usize {
    let after_underscore = word.rfind('_').map(|i| i + 1).unwrap_or(0);
    word[after_underscore..]
        .char_indices()
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| after_underscore + i)
        .last()
        .unwrap_or(after_underscore)
}
