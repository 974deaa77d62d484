//! Named string transforms.
//!
//! A fixed registry of pure string functions addressed by name from template
//! configurations (`transform`, `transform_default`) and registered as
//! filters on the substitution engine (`{{ name | kebabCase }}`). Unknown
//! names are a configuration error — there is no dynamic-callable fallback.

use serde_json::Value;

use super::error::DomainError;

/// Every registered transform name, in registry order. Adapters use this to
/// expose the same set as template filters.
pub const NAMES: &[&str] = &[
    "abbreviate",
    "camelCase",
    "dashCase",
    "dotCase",
    "kebabCase",
    "lowercase",
    "pascalCase",
    "pathCase",
    "plural",
    "singular",
    "snakeCase",
    "titleCase",
    "uppercase",
    "words",
];

/// Apply a single named transform to a string.
pub fn apply(value: &str, name: &str) -> Result<String, DomainError> {
    let transformed = match name {
        "abbreviate" => abbreviate(value),
        "camelCase" => camel_case(value),
        "dashCase" | "kebabCase" => kebab_case(value),
        "dotCase" => dot_case(value),
        "lowercase" => value.to_lowercase(),
        "pascalCase" => pascal_case(value),
        "pathCase" => path_case(value),
        "plural" => plural(value),
        "singular" => singular(value),
        "snakeCase" => snake_case(value),
        "titleCase" | "words" => title_case(value),
        "uppercase" => value.to_uppercase(),
        _ => {
            return Err(DomainError::UnknownTransform {
                name: name.to_string(),
            });
        }
    };
    Ok(transformed)
}

/// Apply a list of named transforms to a value, in order.
///
/// Strings are transformed directly; arrays transform each string element
/// (multi-select answers). Other value types pass through unchanged.
pub fn apply_all(value: Value, transforms: &[String]) -> Result<Value, DomainError> {
    let mut value = value;
    for name in transforms {
        value = apply_value(value, name)?;
    }
    Ok(value)
}

fn apply_value(value: Value, name: &str) -> Result<Value, DomainError> {
    match value {
        Value::String(s) => Ok(Value::String(apply(&s, name)?)),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(apply_value(item, name)?);
            }
            Ok(Value::Array(out))
        }
        other => Ok(other),
    }
}

// ── case conversions ──────────────────────────────────────────────────────────

fn snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

fn dot_case(s: &str) -> String {
    split_words(s).join(".")
}

fn path_case(s: &str) -> String {
    split_words(s).join("/")
}

fn pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

fn camel_case(s: &str) -> String {
    let mut words = split_words(s).into_iter();
    let mut out = match words.next() {
        Some(first) => first,
        None => return String::new(),
    };
    for word in words {
        out.push_str(&capitalize(&word));
    }
    out
}

fn title_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// First letter of each word, joined: "My Plugin" -> "mp".
fn abbreviate(s: &str) -> String {
    split_words(s)
        .iter()
        .filter_map(|w| w.chars().next())
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

// ── inflection ────────────────────────────────────────────────────────────────

/// Pluralize an English word. Covers the regular rules; irregulars beyond
/// these are out of scope for template identifiers.
fn plural(s: &str) -> String {
    let lower = s.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{s}es")
    } else if lower.ends_with('y') && !ends_with_vowel_y(&lower) {
        format!("{}ies", &s[..s.len() - 1])
    } else {
        format!("{s}s")
    }
}

fn singular(s: &str) -> String {
    let lower = s.to_lowercase();
    if lower.ends_with("ies") && s.len() > 3 {
        format!("{}y", &s[..s.len() - 3])
    } else if (lower.ends_with("ses")
        || lower.ends_with("xes")
        || lower.ends_with("zes")
        || lower.ends_with("ches")
        || lower.ends_with("shes"))
        && s.len() > 2
    {
        s[..s.len() - 2].to_string()
    } else if lower.ends_with('s') && !lower.ends_with("ss") {
        s[..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

/// Whether the word ends in a vowel followed by `y` ("day" -> "days", not
/// "daies").
fn ends_with_vowel_y(lower: &str) -> bool {
    let mut chars = lower.chars().rev();
    chars.next(); // the trailing 'y'
    matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

// ── word splitting ────────────────────────────────────────────────────────────

/// Split a string into lowercase words on separators (`_`, `-`, whitespace),
/// camelCase transitions, and acronym boundaries (`HTTPRequest` splits
/// between `P` and `R`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        // Explicit separators always end the current word
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // camelCase transition: "myApp" -> "my" + "App"
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // Acronym boundary: "HTTPServer" -> "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kebab_case_from_spaces() {
        assert_eq!(apply("My Plugin", "kebabCase").unwrap(), "my-plugin");
    }

    #[test]
    fn dash_case_is_kebab_alias() {
        assert_eq!(apply("My Plugin", "dashCase").unwrap(), "my-plugin");
    }

    #[test]
    fn snake_case_from_camel() {
        assert_eq!(apply("myAwesomeApp", "snakeCase").unwrap(), "my_awesome_app");
    }

    #[test]
    fn pascal_case_handles_acronyms() {
        assert_eq!(apply("XMLHttpRequest", "pascalCase").unwrap(), "XmlHttpRequest");
    }

    #[test]
    fn camel_case_from_kebab() {
        assert_eq!(apply("my-plugin-name", "camelCase").unwrap(), "myPluginName");
    }

    #[test]
    fn dot_and_path_case() {
        assert_eq!(apply("My Plugin", "dotCase").unwrap(), "my.plugin");
        assert_eq!(apply("My Plugin", "pathCase").unwrap(), "my/plugin");
    }

    #[test]
    fn abbreviate_takes_initials() {
        assert_eq!(apply("My Awesome Plugin", "abbreviate").unwrap(), "map");
    }

    #[test]
    fn title_case_and_words() {
        assert_eq!(apply("my-plugin", "titleCase").unwrap(), "My Plugin");
        assert_eq!(apply("myPlugin", "words").unwrap(), "My Plugin");
    }

    #[test]
    fn plural_rules() {
        assert_eq!(apply("plugin", "plural").unwrap(), "plugins");
        assert_eq!(apply("box", "plural").unwrap(), "boxes");
        assert_eq!(apply("entity", "plural").unwrap(), "entities");
        assert_eq!(apply("day", "plural").unwrap(), "days");
    }

    #[test]
    fn singular_rules() {
        assert_eq!(apply("plugins", "singular").unwrap(), "plugin");
        assert_eq!(apply("boxes", "singular").unwrap(), "box");
        assert_eq!(apply("entities", "singular").unwrap(), "entity");
        assert_eq!(apply("class", "singular").unwrap(), "class");
    }

    #[test]
    fn unknown_transform_is_an_error() {
        let err = apply("x", "reverse").unwrap_err();
        assert!(matches!(err, DomainError::UnknownTransform { name } if name == "reverse"));
    }

    #[test]
    fn apply_all_runs_in_order() {
        let value = apply_all(json!("My Plugin"), &["snakeCase".into(), "uppercase".into()]).unwrap();
        assert_eq!(value, json!("MY_PLUGIN"));
    }

    #[test]
    fn apply_all_maps_over_arrays() {
        let value = apply_all(json!(["My Plugin", "Other One"]), &["kebabCase".into()]).unwrap();
        assert_eq!(value, json!(["my-plugin", "other-one"]));
    }

    #[test]
    fn apply_all_passes_non_strings_through() {
        assert_eq!(apply_all(json!(42), &["uppercase".into()]).unwrap(), json!(42));
    }
}
