//! Note rendering: synthesized frontmatter header + verbatim body.

use vaultsmith_spec::NoteSpec;

/// Render the final document for one note.
///
/// Pure and deterministic. The header field order is a compatibility
/// contract that downstream note tools parse against:
/// `title`, `created_at`, `modified_at`, `priority`, `status`, the
/// free-form frontmatter keys in definition order, `tags`, `folder_type`.
/// The optional fields are suppressed when empty or absent; `title` is
/// always present. The closing delimiter is followed by one blank line
/// and then the body, unmodified.
pub fn render_note(note: &NoteSpec, global_tags: &[String], folder_type: &str) -> String {
    let mut lines = vec!["---".to_string()];
    lines.push(format!("title: {}", note.title));
    push_unless_empty(&mut lines, "created_at", &note.created_at);
    push_unless_empty(&mut lines, "modified_at", &note.modified_at);
    push_unless_empty(&mut lines, "priority", &note.priority);
    push_unless_empty(&mut lines, "status", &note.status);

    for (key, value) in note.frontmatter.iter() {
        lines.push(format!("{key}: {value}"));
    }

    let tags = merge_tags(&note.tags, global_tags);
    if !tags.is_empty() {
        lines.push(format!("tags: [{}]", tags.join(", ")));
    }
    push_unless_empty(&mut lines, "folder_type", folder_type);
    lines.push("---".to_string());

    let mut document = lines.join("\n");
    document.push_str("\n\n");
    document.push_str(&note.content);
    document
}

/// Set union of note tags and vault-wide tags, deduplicated.
///
/// Order is first-seen: note tags before global tags. Kept stable so the
/// rendered header is identical across runs of the same spec.
pub fn merge_tags(note_tags: &[String], global_tags: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(note_tags.len() + global_tags.len());
    for tag in note_tags.iter().chain(global_tags) {
        if !merged.iter().any(|seen| seen == tag) {
            merged.push(tag.clone());
        }
    }
    merged
}

fn push_unless_empty(lines: &mut Vec<String>, key: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("{key}: {value}"));
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use vaultsmith_spec::{FrontmatterValue, NoteSpec};

    fn note(filename: &str, title: &str, content: &str) -> NoteSpec {
        NoteSpec {
            filename: Some(filename.to_string()),
            title: title.to_string(),
            content: content.to_string(),
            ..NoteSpec::default()
        }
    }

    // ── header synthesis order ─────────────────────────────────────────────

    #[test]
    fn full_header_field_order() {
        let mut spec = note("n.md", "My Note", "Body here");
        spec.created_at = "2026-01-02".to_string();
        spec.modified_at = "2026-01-03".to_string();
        spec.priority = "high".to_string();
        spec.status = "open".to_string();
        spec.tags = vec!["a".to_string()];
        spec.frontmatter.insert("author", FrontmatterValue::Text("sam".to_string()));
        spec.frontmatter.insert("rank", FrontmatterValue::Number(2.0));

        let rendered = render_note(&spec, &[], "zettel");
        let expected = "---\n\
                        title: My Note\n\
                        created_at: 2026-01-02\n\
                        modified_at: 2026-01-03\n\
                        priority: high\n\
                        status: open\n\
                        author: sam\n\
                        rank: 2\n\
                        tags: [a]\n\
                        folder_type: zettel\n\
                        ---\n\
                        \n\
                        Body here";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn title_line_always_present_even_when_empty() {
        let rendered = render_note(&note("n.md", "", ""), &[], "");
        assert!(rendered.starts_with("---\ntitle: \n---"));
    }

    // ── omission rules ─────────────────────────────────────────────────────

    #[test]
    fn unset_created_at_omits_the_line() {
        let rendered = render_note(&note("n.md", "T", "x"), &[], "");
        assert!(!rendered.contains("created_at:"));
        assert!(!rendered.contains("modified_at:"));
        assert!(!rendered.contains("priority:"));
        assert!(!rendered.contains("status:"));
    }

    #[test]
    fn empty_created_at_also_omits_the_line() {
        let mut spec = note("n.md", "T", "x");
        spec.created_at = String::new();
        let rendered = render_note(&spec, &[], "");
        assert!(!rendered.contains("created_at:"));
    }

    #[test]
    fn empty_folder_type_omits_the_line() {
        let rendered = render_note(&note("n.md", "T", "x"), &[], "");
        assert!(!rendered.contains("folder_type:"));
    }

    #[test]
    fn no_tags_line_when_both_sets_empty() {
        let rendered = render_note(&note("n.md", "T", "x"), &[], "");
        assert!(!rendered.contains("tags:"));
    }

    // ── tag merge ──────────────────────────────────────────────────────────

    #[test]
    fn tag_merge_is_a_deduplicated_union() {
        let merged = merge_tags(
            &["a".to_string(), "b".to_string()],
            &["b".to_string(), "c".to_string()],
        );
        assert_eq!(merged, vec!["a", "b", "c"]);
    }

    #[test]
    fn tag_merge_keeps_first_seen_order() {
        let merged = merge_tags(
            &["z".to_string(), "a".to_string()],
            &["m".to_string(), "z".to_string()],
        );
        assert_eq!(merged, vec!["z", "a", "m"]);
    }

    #[test]
    fn global_tags_alone_still_render() {
        let mut spec = note("n.md", "T", "x");
        spec.tags = vec![];
        let rendered = render_note(&spec, &["shared".to_string()], "");
        assert!(rendered.contains("tags: [shared]"));
    }

    // ── body handling ──────────────────────────────────────────────────────

    #[test]
    fn body_follows_closing_delimiter_after_one_blank_line() {
        let rendered = render_note(&note("a.md", "", "Hello"), &[], "");
        assert!(rendered.ends_with("---\n\nHello"));
    }

    #[test]
    fn body_is_verbatim_including_wiki_links() {
        let body = "See [[Other Note]] and keep\nline breaks.\n";
        let rendered = render_note(&note("a.md", "T", body), &[], "");
        assert!(rendered.ends_with(body));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut spec = note("n.md", "T", "body");
        spec.tags = vec!["x".to_string(), "y".to_string()];
        let first = render_note(&spec, &["y".to_string(), "z".to_string()], "log");
        let second = render_note(&spec, &["y".to_string(), "z".to_string()], "log");
        assert_eq!(first, second);
    }
}
