//! Directive and attribute name normalization.

const DATA_PREFIX: &str = "data-";

/// Returns the selector name of an attribute, with any `data-` prefix removed.
///
/// Names shorter than the prefix that are themselves a prefix of `data-`
/// (`"d"`, `"dat"`, `"data"`, ...) normalize to the empty string.
///
/// ```
/// use ng_template_parser::short_name;
///
/// assert_eq!(short_name("data-min-date"), "min-date");
/// assert_eq!(short_name("ng-if"), "ng-if");
/// assert_eq!(short_name("dat"), "");
/// ```
pub fn short_name(name: &str) -> &str {
    if let Some(stripped) = name.strip_prefix(DATA_PREFIX) {
        stripped
    } else if name.len() < DATA_PREFIX.len() && DATA_PREFIX.starts_with(name) {
        ""
    } else {
        name
    }
}

/// Converts `min-date` to `minDate`.
///
/// Only a hyphen followed by a word character (`[A-Za-z0-9_]`) is folded, so
/// stray or doubled hyphens survive.
pub fn kebab_to_camel(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && is_word_char(next) => {
                result.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}

/// Converts `minDate` to `min-date`.
///
/// A hyphen goes between each lowercase-uppercase pair, then the whole name
/// is lowercased.
pub fn camel_to_kebab(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            result.push('-');
        }
        result.push(c);
        prev = Some(c);
    }

    result.to_lowercase()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_data_prefix() {
        assert_eq!(short_name("data-min-date"), "min-date");
        assert_eq!(short_name("data-"), "");
        assert_eq!(short_name("ng-model"), "ng-model");
        assert_eq!(short_name("database"), "database");
    }

    #[test]
    fn test_short_name_prefix_of_data_is_empty() {
        assert_eq!(short_name(""), "");
        assert_eq!(short_name("d"), "");
        assert_eq!(short_name("da"), "");
        assert_eq!(short_name("dat"), "");
        assert_eq!(short_name("data"), "");
        assert_eq!(short_name("dx"), "dx");
        assert_eq!(short_name("id"), "id");
    }

    #[test]
    fn test_kebab_to_camel() {
        assert_eq!(kebab_to_camel("min-date"), "minDate");
        assert_eq!(kebab_to_camel("ng-model-options"), "ngModelOptions");
        assert_eq!(kebab_to_camel("tab-2"), "tab2");
        assert_eq!(kebab_to_camel("a--b"), "a-B");
        assert_eq!(kebab_to_camel("trailing-"), "trailing-");
        assert_eq!(kebab_to_camel("plain"), "plain");
    }

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("minDate"), "min-date");
        assert_eq!(camel_to_kebab("ngModelOptions"), "ng-model-options");
        assert_eq!(camel_to_kebab("URLPath"), "urlpath");
        assert_eq!(camel_to_kebab("aBC"), "a-bc");
        assert_eq!(camel_to_kebab("plain"), "plain");
    }
}
