/// Substitute `$KEY$` placeholders in `template` with their bindings.
///
/// Substitution is a single pass, so bound values are never rescanned and
/// unknown placeholders are left as written.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('$') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let key = &after[..end];
        match bindings.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('$');
                rest = after;
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
    fn test_render_replaces_every_occurrence() {
        let out = render("Is \"$WORD$\" a word? $WORD$!", &[("WORD", "cat")]);
        assert_eq!(out, "Is \"cat\" a word? cat!");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render("$DEFN$ for $WORD$", &[("WORD", "cat"), ("DEFN", "costs $WORD$")]);
        assert_eq!(out, "costs $WORD$ for cat");
    }

    #[test]
    fn test_render_keeps_stray_dollars() {
        let out = render("costs $5 for $WORD$ and $", &[("WORD", "cat")]);
        assert_eq!(out, "costs $5 for cat and $");
    }
}
