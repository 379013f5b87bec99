// file: src/extract/markdown.rs
// description: markdown-to-plain-text rendering with YAML frontmatter support
// reference: https://docs.rs/pulldown-cmark, https://docs.rs/yaml-rust

use pulldown_cmark::{Event, Parser, TagEnd};
use yaml_rust::{Yaml, YamlLoader};

/// Plain-text rendering of one markdown note, with its frontmatter title if
/// the file carried one.
#[derive(Debug, Clone)]
pub struct MarkdownNote {
    pub title: Option<String>,
    pub plain_text: String,
}

/// Renders markdown to the plain text that gets grounded into the model
/// prompt. Headings and paragraphs become lines; inline markup is dropped;
/// code blocks are kept verbatim.
pub fn extract_markdown(content: &str) -> MarkdownNote {
    let (title, body) = split_frontmatter(content);

    let parser = Parser::new(body);
    let mut plain_text = String::new();

    for event in parser {
        match event {
            Event::End(TagEnd::CodeBlock) => {
                newline(&mut plain_text);
            }
            Event::Text(text) | Event::Code(text) => {
                plain_text.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => {
                newline(&mut plain_text);
            }
            Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Item) => {
                newline(&mut plain_text);
            }
            _ => {}
        }
    }

    MarkdownNote {
        title,
        plain_text: plain_text.trim().to_string(),
    }
}

fn newline(text: &mut String) {
    while text.ends_with(' ') {
        text.pop();
    }
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Splits a leading `---` YAML frontmatter block off the body and pulls the
/// `title:` field out of it. Malformed frontmatter is treated as absent
/// rather than failing the upload.
fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    if !content.starts_with("---") {
        return (None, content);
    }

    let mut parts = content.splitn(3, "---");
    parts.next();
    let (Some(yaml_block), Some(body)) = (parts.next(), parts.next()) else {
        return (None, content);
    };

    let Ok(docs) = YamlLoader::load_from_str(yaml_block) else {
        return (None, body);
    };

    let title = docs.first().and_then(|doc| match doc {
        Yaml::Hash(hash) => hash.iter().find_map(|(key, value)| {
            match (key, value) {
                (Yaml::String(k), Yaml::String(v)) if k == "title" => Some(v.clone()),
                _ => None,
            }
        }),
        _ => None,
    });

    (title, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_rendering() {
        let note = extract_markdown("# Airway\n\nOpen the airway **first**.\n\n- suction\n- position");
        assert_eq!(note.title, None);
        assert_eq!(note.plain_text, "Airway\nOpen the airway first.\nsuction\nposition");
    }

    #[test]
    fn test_frontmatter_title() {
        let note = extract_markdown("---\ntitle: Bradycardia\n---\n\nHR < 60/min.");
        assert_eq!(note.title, Some("Bradycardia".to_string()));
        assert_eq!(note.plain_text, "HR < 60/min.");
    }

    #[test]
    fn test_quoted_frontmatter_title() {
        let note = extract_markdown("---\ntitle: \"UP 15: Suspected Sepsis\"\n---\nbody");
        assert_eq!(note.title, Some("UP 15: Suspected Sepsis".to_string()));
    }

    #[test]
    fn test_malformed_frontmatter_ignored() {
        let note = extract_markdown("---\n: : :\n---\nbody text");
        assert_eq!(note.title, None);
        assert!(note.plain_text.contains("body text"));
    }

    #[test]
    fn test_inline_code_kept() {
        let note = extract_markdown("Dose is `0.1 mg/kg` IV.");
        assert_eq!(note.plain_text, "Dose is 0.1 mg/kg IV.");
    }
}
