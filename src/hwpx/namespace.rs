//! HWPX XML carries `hh:`/`hp:`/`hc:`-style namespace prefixes on every
//! element. `quick-xml`'s serde integration matches tag names literally, so
//! this strips prefixes (and drops `xmlns`/`xmlns:*` declarations) before
//! deserialization rather than requiring every field to declare a
//! namespace-qualified rename.

pub fn strip_namespace_prefixes(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        rest = &rest[lt..];

        let Some(gt) = rest.find('>') else {
            out.push_str(rest);
            break;
        };
        let tag = &rest[..=gt];
        out.push_str(&strip_tag_namespaces(tag));
        rest = &rest[gt + 1..];
    }
    out.push_str(rest);
    out
}

fn strip_tag_namespaces(tag: &str) -> String {
    if tag.starts_with("<!") || tag.starts_with("<?") {
        return tag.to_string();
    }

    let inner = &tag[1..tag.len() - 1];
    let closing = inner.starts_with('/');
    let self_closing = inner.ends_with('/');
    let without_slashes = inner.strip_prefix('/').unwrap_or(inner);
    let without_slashes = without_slashes.strip_suffix('/').unwrap_or(without_slashes);
    let core = without_slashes.trim();

    let tokens = tokenize(core);
    if tokens.is_empty() {
        return tag.to_string();
    }

    let mut out = String::from("<");
    if closing {
        out.push('/');
    }
    out.push_str(&strip_prefix_from_name(&tokens[0]));

    for token in &tokens[1..] {
        if token.starts_with("xmlns") {
            continue;
        }
        match token.find('=') {
            Some(eq) => {
                let (name, value) = token.split_at(eq);
                out.push(' ');
                out.push_str(&strip_prefix_from_name(name));
                out.push_str(value);
            }
            None => {
                out.push(' ');
                out.push_str(token);
            }
        }
    }

    if self_closing {
        out.push('/');
    }
    out.push('>');
    out
}

fn tokenize(core: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;

    for c in core.chars() {
        match in_quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    in_quote = None;
                }
            }
            None if c == '"' || c == '\'' => {
                in_quote = Some(c);
                current.push(c);
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn strip_prefix_from_name(name: &str) -> String {
    match name.split_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_element_prefixes() {
        let xml = r#"<hp:p hp:id="0"><hp:run><hp:t>Hi</hp:t></hp:run></hp:p>"#;
        assert_eq!(
            strip_namespace_prefixes(xml),
            r#"<p id="0"><run><t>Hi</t></run></p>"#
        );
    }

    #[test]
    fn drops_xmlns_declarations() {
        let xml = r#"<sec xmlns:hp="uri" xmlns="default"><hp:p/></sec>"#;
        assert_eq!(strip_namespace_prefixes(xml), "<sec><p/></sec>");
    }

    #[test]
    fn leaves_text_content_untouched() {
        let xml = r#"<hp:t>a:b:c</hp:t>"#;
        assert_eq!(strip_namespace_prefixes(xml), "<t>a:b:c</t>");
    }
}
