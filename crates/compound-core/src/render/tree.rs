use crate::settings::JunctureMode;
use crate::splitter::{Decomposition, Piece};

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn leaf(label: &str, text: &str) -> String {
    format!(r#"<tree label="{label}">{}</tree>"#, escape_text(text))
}

fn node(label: &str, children: &str) -> String {
    format!(r#"<tree label="{label}">{children}</tree>"#)
}

/// Render a decomposition as nested `<tree>` elements.
///
/// The last segment is a `SEGMENT` leaf preceded by a left-branching chain of
/// `comp_mod` nodes, one per earlier segment:
///
/// ```text
/// <tree label="comp_mod"><tree label="SEGMENT">ab</tree><tree label="JUNC">@es@</tree></tree><tree label="SEGMENT">c</tree>
/// ```
///
/// With `dependency`, `JUNC` leaves are wrapped in a unary `junc` node.
pub fn render_tree(decomposition: &Decomposition, mode: JunctureMode, dependency: bool) -> String {
    // (form, juncture following it)
    let mut parts: Vec<(&str, &str)> = Vec::new();
    for piece in decomposition.pieces() {
        match piece {
            Piece::Segment(s) => parts.push((s.form.as_str(), "")),
            Piece::Juncture(j) => {
                if let Some(last) = parts.last_mut() {
                    last.1 = j.as_str();
                }
            }
        }
    }
    let Some(((head, _), modifiers)) = parts.split_last() else {
        return String::new();
    };

    let mut left = String::new();
    for &(form, juncture) in modifiers {
        let segment = match mode {
            JunctureMode::Merge => leaf("SEGMENT+JUNC", &format!("{form}{juncture}@@")),
            JunctureMode::Omit | JunctureMode::Write => leaf("SEGMENT", form),
        };
        let junc = match mode {
            JunctureMode::Write => {
                let junc = leaf("JUNC", &format!("@{juncture}@"));
                if dependency {
                    node("junc", &junc)
                } else {
                    junc
                }
            }
            JunctureMode::Omit | JunctureMode::Merge => String::new(),
        };
        left = node("comp_mod", &format!("{left}{segment}{junc}"));
    }
    left.push_str(&leaf("SEGMENT", head));
    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::Segment;

    fn decomposition(parts: &[&str]) -> Decomposition {
        // even indices are segments, odd ones junctures
        Decomposition::new(
            parts
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    if i % 2 == 0 {
                        Piece::Segment(Segment {
                            surface: p.to_string(),
                            form: p.to_string(),
                            freq: 10,
                        })
                    } else {
                        Piece::Juncture(p.to_string())
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn test_tree_omit() {
        let d = decomposition(&["ab", "es", "c"]);
        assert_eq!(
            render_tree(&d, JunctureMode::Omit, false),
            r#"<tree label="comp_mod"><tree label="SEGMENT">ab</tree></tree><tree label="SEGMENT">c</tree>"#
        );
    }

    #[test]
    fn test_tree_write() {
        let d = decomposition(&["ab", "es", "c"]);
        assert_eq!(
            render_tree(&d, JunctureMode::Write, false),
            r#"<tree label="comp_mod"><tree label="SEGMENT">ab</tree><tree label="JUNC">@es@</tree></tree><tree label="SEGMENT">c</tree>"#
        );
    }

    #[test]
    fn test_tree_write_dependency() {
        let d = decomposition(&["ab", "es", "c"]);
        assert_eq!(
            render_tree(&d, JunctureMode::Write, true),
            r#"<tree label="comp_mod"><tree label="SEGMENT">ab</tree><tree label="junc"><tree label="JUNC">@es@</tree></tree></tree><tree label="SEGMENT">c</tree>"#
        );
    }

    #[test]
    fn test_tree_merge() {
        let d = decomposition(&["ab", "es", "c"]);
        assert_eq!(
            render_tree(&d, JunctureMode::Merge, false),
            r#"<tree label="comp_mod"><tree label="SEGMENT+JUNC">abes@@</tree></tree><tree label="SEGMENT">c</tree>"#
        );
    }

    #[test]
    fn test_tree_three_segments_nest_left() {
        let d = decomposition(&["a", "", "b", "", "c"]);
        assert_eq!(
            render_tree(&d, JunctureMode::Omit, false),
            concat!(
                r#"<tree label="comp_mod">"#,
                r#"<tree label="comp_mod"><tree label="SEGMENT">a</tree></tree>"#,
                r#"<tree label="SEGMENT">b</tree>"#,
                r#"</tree>"#,
                r#"<tree label="SEGMENT">c</tree>"#,
            )
        );
    }

    #[test]
    fn test_tree_escapes_text() {
        let d = decomposition(&["a&b", "", "<c>"]);
        assert_eq!(
            render_tree(&d, JunctureMode::Omit, false),
            r#"<tree label="comp_mod"><tree label="SEGMENT">a&amp;b</tree></tree><tree label="SEGMENT">&lt;c&gt;</tree>"#
        );
    }
}
