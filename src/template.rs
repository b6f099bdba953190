//! Text templating for profile resources.
//!
//! Templates carry `{key}` placeholders that are replaced with the string
//! form of the matching configuration value. There is no escaping syntax;
//! the boot resources this crate renders never need a literal brace.

use std::collections::BTreeMap;

/// Replace every `{key}` occurrence in `text` with its mapped value.
///
/// Placeholders with no matching key are left verbatim. This is
/// intentional: the same template may be rendered incrementally, or carry
/// placeholders a different caller resolves.
pub fn render(text: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn replaces_every_occurrence() {
        let rendered = render(
            "Welcome to {name}. {name} is based on Arch.",
            &values(&[("name", "MyDistro")]),
        );
        assert_eq!(rendered, "Welcome to MyDistro. MyDistro is based on Arch.");
    }

    #[test]
    fn unknown_placeholders_left_verbatim() {
        let rendered = render("ID={id} VERSION={version}", &values(&[("id", "myos")]));
        assert_eq!(rendered, "ID=myos VERSION={version}");
    }

    #[test]
    fn rendering_is_deterministic() {
        let v = values(&[("a", "1"), ("b", "2")]);
        let text = "{a}-{b}-{a}";
        assert_eq!(render(text, &v), render(text, &v));
        assert_eq!(render(text, &v), "1-2-1");
    }

    #[test]
    fn empty_map_is_identity() {
        let text = "nothing {here} changes";
        assert_eq!(render(text, &BTreeMap::new()), text);
    }
}
