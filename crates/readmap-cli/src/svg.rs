//! Static SVG rendering of a laid-out roadmap.

use readmap_layout::{Book, Roadmap};
use std::fmt::Write as _;

const EDGE_COLOR: &str = "#94a3b8";
const EDGE_HIGHLIGHT: &str = "#2563eb";
const NODE_FILL: &str = "#ffffff";
const NODE_STROKE: &str = "#cbd5e1";
const NODE_FOCUS: &str = "#2563eb";
const TEXT_COLOR: &str = "#0f172a";
const MUTED_TEXT: &str = "#64748b";

// Rough average glyph advance for the 13px title font.
const TITLE_CHAR_WIDTH: f64 = 7.0;

#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    pub title: Option<String>,
    /// Book whose incoming connections are drawn highlighted.
    pub focus: Option<String>,
}

pub fn render_roadmap_svg(roadmap: &Roadmap, books: &[Book], options: &SvgOptions) -> String {
    let mut out = String::new();
    let w = fmt(roadmap.content_size.width);
    let h = fmt(roadmap.content_size.height);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" class="readmap readmap-{viewport}">"#,
        viewport = viewport_name(roadmap),
    );
    out.push_str(
        r#"<defs><marker id="readmap-arrow" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="context-stroke"/></marker></defs>"#,
    );

    if let Some(title) = options.title.as_deref() {
        let _ = write!(
            out,
            r#"<text x="{x}" y="40" text-anchor="middle" font-family="sans-serif" font-size="20" font-weight="600" fill="{TEXT_COLOR}">{text}</text>"#,
            x = fmt(roadmap.canvas.width / 2.0),
            text = escape_xml(title),
        );
    }

    out.push_str(r#"<g class="connections">"#);
    let focus = options.focus.as_deref();
    // Highlighted curves go last so they paint over their neighbours.
    let (lit, dim): (Vec<_>, Vec<_>) = roadmap
        .connections
        .iter()
        .partition(|c| c.is_highlighted(None, focus));
    for (conn, highlighted) in dim
        .into_iter()
        .map(|c| (c, false))
        .chain(lit.into_iter().map(|c| (c, true)))
    {
        let (stroke, width) = if highlighted {
            (EDGE_HIGHLIGHT, 2.5)
        } else {
            (EDGE_COLOR, 1.5)
        };
        let _ = write!(
            out,
            r#"<path id="{id}" d="{d}" fill="none" stroke="{stroke}" stroke-width="{width}" marker-end="url(#readmap-arrow)"/>"#,
            id = escape_xml(&conn.id),
            d = conn.path.to_svg_path(),
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &roadmap.nodes {
        let book = books.iter().find(|b| b.id == node.id);
        let b = node.bounds();
        let stroke = if focus == Some(node.id.as_str()) {
            NODE_FOCUS
        } else {
            NODE_STROKE
        };
        let _ = write!(
            out,
            r#"<g class="node level-{level}" data-id="{id}"><rect x="{x}" y="{y}" width="{nw}" height="{nh}" rx="12" fill="{NODE_FILL}" stroke="{stroke}"/>"#,
            level = node.level,
            id = escape_xml(&node.id),
            x = fmt(b.min_x),
            y = fmt(b.min_y),
            nw = fmt(node.size.width),
            nh = fmt(node.size.height),
        );

        let label = book
            .map(|b| b.title.as_str())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(node.id.as_str());
        let max_chars = ((node.size.width - 24.0) / TITLE_CHAR_WIDTH).max(4.0) as usize;
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="13" font-weight="600" fill="{TEXT_COLOR}">{text}</text>"#,
            x = fmt(node.center.x),
            y = fmt(node.center.y - 4.0),
            text = escape_xml(&truncate(label, max_chars)),
        );
        if let Some(category) = book.and_then(Book::primary_category) {
            let _ = write!(
                out,
                r#"<text x="{x}" y="{y}" text-anchor="middle" font-family="sans-serif" font-size="11" fill="{MUTED_TEXT}">{text}</text>"#,
                x = fmt(node.center.x),
                y = fmt(node.center.y + 16.0),
                text = escape_xml(&truncate(category, max_chars)),
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g></svg>\n");
    out
}

fn viewport_name(roadmap: &Roadmap) -> &'static str {
    match roadmap.viewport {
        readmap_layout::ViewportClass::Compact => "compact",
        readmap_layout::ViewportClass::Medium => "medium",
        readmap_layout::ViewportClass::Full => "full",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn fmt(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmap_layout::{Size, layout_roadmap};

    fn books() -> Vec<Book> {
        vec![
            Book::new("a", 1).with_title("Structure & Interpretation"),
            Book::new("b", 2)
                .with_title("A Follow-up With A Rather Long Title That Will Not Fit On One Card")
                .with_prerequisites([1]),
        ]
    }

    #[test]
    fn renders_nodes_and_connections() {
        let books = books();
        let roadmap = layout_roadmap(&books, Size::new(1400.0, 900.0)).unwrap();
        let svg = render_roadmap_svg(&roadmap, &books, &SvgOptions::default());

        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<rect ").count(), 2);
        assert!(svg.contains(r#"id="a-&gt;b""#));
        assert!(svg.contains("Structure &amp; Interpretation"));
        assert!(svg.contains('…'));
        assert!(svg.contains(&roadmap.connections[0].path.to_svg_path()));
    }

    #[test]
    fn focus_highlights_incoming_connections() {
        let books = books();
        let roadmap = layout_roadmap(&books, Size::new(1400.0, 900.0)).unwrap();
        let plain = render_roadmap_svg(&roadmap, &books, &SvgOptions::default());
        assert!(!plain.contains(EDGE_HIGHLIGHT));

        let focused = render_roadmap_svg(
            &roadmap,
            &books,
            &SvgOptions {
                focus: Some("b".into()),
                ..Default::default()
            },
        );
        assert!(focused.contains(&format!(r#"stroke="{EDGE_HIGHLIGHT}" stroke-width="2.5""#)));
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(-0.001), "0");
        assert_eq!(fmt(1.0 / 3.0), "0.33");
    }
}
