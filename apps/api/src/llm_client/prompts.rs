// Shared prompt fragments. Each feature module that calls the model keeps its
// own prompts.rs alongside it and pulls cross-cutting pieces from here.

/// Appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Return ONLY a valid JSON object matching the structure above. \
Do not add commentary before or after the JSON. \
If you wrap it in a code block, use a single ```json fence.";

/// Fills `{name}` placeholders in a single pass. Substituted values are never
/// rescanned, so user text containing `{...}` passes through untouched.
/// Braces that do not form a known placeholder are copied as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        let hit = vars.iter().find_map(|(name, value)| {
            let len = name.len() + 2;
            let matches = tail.len() >= len
                && tail.as_bytes()[len - 1] == b'}'
                && &tail[1..len - 1] == *name;
            matches.then_some((len, *value))
        });

        match hit {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_known_placeholders() {
        let out = render("Hi {name}, you are {age}.", &[("name", "Ada"), ("age", "36")]);
        assert_eq!(out, "Hi Ada, you are 36.");
    }

    #[test]
    fn test_render_keeps_json_braces() {
        let out = render(r#"{"domain": "{domain}"}"#, &[("domain", "Web")]);
        assert_eq!(out, r#"{"domain": "Web"}"#);
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render("{a} {b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(out, "{b} x");
    }

    #[test]
    fn test_render_unknown_placeholder_untouched() {
        assert_eq!(render("{nope} {", &[("a", "1")]), "{nope} {");
    }
}
