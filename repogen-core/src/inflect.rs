//! English plural to singular conversion for identifiers.
//!
//! Works on the trailing word of a PascalCase or lowercase identifier, so
//! `InvoiceItems` becomes `InvoiceItem`. The rules cover the names tables are
//! usually given; they are not a full English inflector.

/// Words that are the same in singular and plural.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "media",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// (plural, singular) pairs that the suffix rules get wrong, including
/// singulars that end in `s` themselves.
const IRREGULAR: &[(&str, &str)] = &[
    ("aliases", "alias"),
    ("analyses", "analysis"),
    ("atlases", "atlas"),
    ("biases", "bias"),
    ("bonuses", "bonus"),
    ("buses", "bus"),
    ("caches", "cache"),
    ("campuses", "campus"),
    ("canvases", "canvas"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("criteria", "criterion"),
    ("feet", "foot"),
    ("gases", "gas"),
    ("geese", "goose"),
    ("indices", "index"),
    ("lenses", "lens"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("menus", "menu"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("people", "person"),
    ("quizzes", "quiz"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("vertices", "vertex"),
    ("viruses", "virus"),
    ("women", "woman"),
];

/// Convert the trailing word of `s` to its singular form.
///
/// Idempotent: singular input comes back unchanged.
pub fn singularize(s: &str) -> String {
    let lower = s.to_ascii_lowercase();

    if UNCOUNTABLE
        .iter()
        .any(|word| ends_with_word(s, &lower, word))
    {
        return s.to_string();
    }

    for (plural, singular) in IRREGULAR {
        if ends_with_word(s, &lower, singular) {
            return s.to_string();
        }
        if ends_with_word(s, &lower, plural) {
            return replace_suffix(s, plural.len(), singular);
        }
    }

    if lower.len() > 3 && lower.ends_with("ies") {
        return replace_suffix(s, 3, "y");
    }

    if ["sses", "shes", "ches", "xes", "zzes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return s[..s.len() - 2].to_string();
    }

    if ["ss", "us", "is"].iter().any(|suffix| lower.ends_with(suffix)) {
        return s.to_string();
    }

    if lower.len() > 1 && lower.ends_with('s') {
        return s[..s.len() - 1].to_string();
    }

    s.to_string()
}

/// Whether `word` ends `s` and starts at a word boundary: the start of the
/// string or an uppercase letter.
fn ends_with_word(s: &str, lower: &str, word: &str) -> bool {
    if !lower.ends_with(word) {
        return false;
    }
    let start = s.len() - word.len();
    start == 0 || s[start..].starts_with(|c: char| c.is_ascii_uppercase())
}

/// Replace the last `len` bytes with `replacement`, keeping the case of the
/// first replaced character.
fn replace_suffix(s: &str, len: usize, replacement: &str) -> String {
    let start = s.len() - len;
    let upper = s[start..].starts_with(|c: char| c.is_ascii_uppercase());
    let mut out = s[..start].to_string();
    let mut chars = replacement.chars();
    if let Some(first) = chars.next() {
        if upper {
            out.push(first.to_ascii_uppercase());
        } else {
            out.push(first);
        }
        out.extend(chars);
    }
    out
}
