use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

#[derive(Clone, Copy)]
pub struct MarkdownStyles {
    pub base: Style,
    pub heading: Style,
    pub marker: Style,
    pub code: Style,
    pub quote: Style,
}

impl MarkdownStyles {
    fn strong(self) -> Style {
        self.base.add_modifier(Modifier::BOLD)
    }

    fn italic(self) -> Style {
        self.base.add_modifier(Modifier::ITALIC)
    }
}

/// Renders the generated brief: headings, bullet and numbered lists, quotes,
/// fenced code, inline code and `*`/`**` emphasis. Anything else is plain text.
pub fn render_markdown(text: &str, styles: MarkdownStyles) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let mut in_code = false;

    for raw in text.lines() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("```") {
            in_code = !in_code;
            continue;
        }
        if in_code {
            out.push(Line::from(Span::styled(format!("    {raw}"), styles.code)));
            continue;
        }

        if trimmed.starts_with('#') {
            let level = trimmed.chars().take_while(|c| *c == '#').count();
            let title = trimmed[level..].trim_start();
            let mut heading = styles.heading.add_modifier(Modifier::BOLD);
            if level == 1 {
                heading = heading.add_modifier(Modifier::UNDERLINED);
            }
            out.push(Line::from(Span::styled(title.replace("**", ""), heading)));
            continue;
        }

        if trimmed == "---" || trimmed == "***" {
            out.push(Line::from(Span::styled("─".repeat(24), styles.marker)));
            continue;
        }

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let indent = " ".repeat(raw.len() - trimmed.len());
            push_with_inline_code(&mut out, &format!("{indent}  • "), item, styles);
            continue;
        }

        if let Some(quote) = trimmed.strip_prefix("> ") {
            push_with_inline_code(
                &mut out,
                "  │ ",
                quote,
                MarkdownStyles {
                    base: styles.quote,
                    ..styles
                },
            );
            continue;
        }

        if let Some(dot) = trimmed.find(". ") {
            if dot > 0 && trimmed[..dot].chars().all(|c| c.is_ascii_digit()) {
                let (number, rest) = trimmed.split_at(dot + 2);
                let mut spans = vec![Span::styled(
                    format!("  {number}"),
                    styles.marker.add_modifier(Modifier::BOLD),
                )];
                append_emphasis_spans(&mut spans, rest, styles);
                out.push(Line::from(spans));
                continue;
            }
        }

        push_with_inline_code(&mut out, "", raw, styles);
    }
    out
}

fn push_with_inline_code(
    out: &mut Vec<Line<'static>>,
    prefix: &str,
    text: &str,
    styles: MarkdownStyles,
) {
    let mut spans = Vec::new();
    if !prefix.is_empty() {
        spans.push(Span::styled(prefix.to_string(), styles.marker));
    }
    let mut rest = text;
    let mut code_mode = false;
    while let Some(idx) = rest.find('`') {
        let (head, tail) = rest.split_at(idx);
        if !head.is_empty() {
            if code_mode {
                spans.push(Span::styled(head.to_string(), styles.code));
            } else {
                append_emphasis_spans(&mut spans, head, styles);
            }
        }
        rest = &tail[1..];
        code_mode = !code_mode;
    }
    if !rest.is_empty() {
        if code_mode {
            spans.push(Span::styled(rest.to_string(), styles.code));
        } else {
            append_emphasis_spans(&mut spans, rest, styles);
        }
    }
    out.push(Line::from(spans));
}

fn append_emphasis_spans(spans: &mut Vec<Span<'static>>, input: &str, styles: MarkdownStyles) {
    let bytes = input.as_bytes();
    let mut strong_on = false;
    let mut italic_on = false;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let marker_len = if bytes[i] != b'*' {
            0
        } else if bytes.get(i + 1) == Some(&b'*') {
            2
        } else {
            1
        };
        if marker_len == 0 {
            i += 1;
            continue;
        }
        if start < i {
            spans.push(Span::styled(
                input[start..i].to_string(),
                emphasis_style(styles, strong_on, italic_on),
            ));
        }
        if marker_len == 2 {
            strong_on = !strong_on;
        } else {
            italic_on = !italic_on;
        }
        i += marker_len;
        start = i;
    }
    if start < input.len() {
        spans.push(Span::styled(
            input[start..].to_string(),
            emphasis_style(styles, strong_on, italic_on),
        ));
    }
}

fn emphasis_style(styles: MarkdownStyles, strong: bool, italic: bool) -> Style {
    match (strong, italic) {
        (true, true) => styles.strong().add_modifier(Modifier::ITALIC),
        (true, false) => styles.strong(),
        (false, true) => styles.italic(),
        (false, false) => styles.base,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    use super::*;

    fn styles() -> MarkdownStyles {
        MarkdownStyles {
            base: Style::default().fg(Color::White),
            heading: Style::default().fg(Color::Cyan),
            marker: Style::default().fg(Color::Blue),
            code: Style::default().fg(Color::Yellow),
            quote: Style::default().fg(Color::Gray),
        }
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn headings_drop_hashes_and_are_bold() {
        let lines = render_markdown("## Executive Summary", styles());
        assert_eq!(plain(&lines[0]), "Executive Summary");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn bullets_get_a_marker_and_keep_emphasis() {
        let lines = render_markdown("- **Stripe** checkout", styles());
        assert_eq!(plain(&lines[0]), "  • Stripe checkout");
        let stripe = &lines[0].spans[1];
        assert_eq!(stripe.content.as_ref(), "Stripe");
        assert!(stripe.style.add_modifier.contains(Modifier::BOLD));
        assert!(!lines[0].spans[2].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn italic_and_inline_code_are_styled() {
        let lines = render_markdown("use *only* `cargo` here", styles());
        let spans = &lines[0].spans;
        assert_eq!(spans[1].content.as_ref(), "only");
        assert!(spans[1].style.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(spans[3].content.as_ref(), "cargo");
        assert_eq!(spans[3].style, styles().code);
    }

    #[test]
    fn numbered_items_keep_their_number() {
        let lines = render_markdown("2. **Technical Complexity**: Medium", styles());
        assert_eq!(plain(&lines[0]), "  2. Technical Complexity: Medium");
    }

    #[test]
    fn fenced_code_is_indented_verbatim() {
        let lines = render_markdown("```\n**not bold**\n```\nafter", styles());
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "    **not bold**");
        assert_eq!(plain(&lines[1]), "after");
    }
}
