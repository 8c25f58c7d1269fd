//! Terminal rendering of parsed outputs.
//!
//! Everything takes an explicit [`RenderContext`] instead of reading global
//! terminal state.

use console::{Style, Term};

use postcraft_types::output::GroundingSource;
use postcraft_types::parsed::{BodyLine, ParsedOutput, Span};

const MAX_RULE_WIDTH: usize = 72;
const DEFAULT_WIDTH: usize = 80;

/// Terminal capabilities used while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub color: bool,
    pub width: usize,
}

impl RenderContext {
    /// Detect color support and width from stdout.
    pub fn detect() -> Self {
        let term = Term::stdout();
        match term.size_checked() {
            Some((_, cols)) if term.is_term() => Self {
                color: console::colors_enabled(),
                width: cols as usize,
            },
            _ => Self::plain(DEFAULT_WIDTH),
        }
    }

    pub fn plain(width: usize) -> Self {
        Self { color: false, width }
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.color)
    }

    fn rule(&self) -> String {
        "─".repeat(self.width.clamp(10, MAX_RULE_WIDTH))
    }
}

/// Render every platform and variation block.
pub fn render_parsed(parsed: &ParsedOutput, ctx: &RenderContext) -> String {
    let heading = ctx.style(Style::new().cyan().bold());
    let variation = ctx.style(Style::new().bold());
    let dim = ctx.style(Style::new().dim());

    let mut out = String::new();
    for platform in &parsed.platforms {
        out.push_str(&format!("{}\n", heading.apply_to(&platform.title)));
        out.push_str(&format!("{}\n", dim.apply_to(ctx.rule())));
        for v in &platform.variations {
            out.push_str(&format!("\n  {}\n", variation.apply_to(&v.title)));
            for line in &v.lines {
                out.push_str(&render_line(line, ctx));
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}

fn render_line(line: &BodyLine, ctx: &RenderContext) -> String {
    match line {
        BodyLine::Spacer => String::new(),
        BodyLine::Field {
            label,
            emphasis,
            spans,
        } => {
            let label_style = if *emphasis {
                ctx.style(Style::new().yellow().bold())
            } else {
                ctx.style(Style::new().bold())
            };
            let value = render_spans(spans, ctx);
            let value = if *emphasis {
                ctx.style(Style::new().yellow()).apply_to(value).to_string()
            } else {
                value
            };
            format!("    {} {}", label_style.apply_to(format!("{label}:")), value)
        }
        BodyLine::Paragraph { spans } => format!("    {}", render_spans(spans, ctx)),
    }
}

/// Render inline spans, highlighting links and hashtags.
pub fn render_spans(spans: &[Span], ctx: &RenderContext) -> String {
    let url = ctx.style(Style::new().blue().underlined());
    let hashtag = ctx.style(Style::new().magenta());

    spans
        .iter()
        .map(|span| match span {
            Span::Text(t) => t.clone(),
            Span::Url(u) => url.apply_to(u).to_string(),
            Span::Hashtag(h) => hashtag.apply_to(h).to_string(),
        })
        .collect()
}

/// Render the grounding sources as a numbered list. Empty when there are none.
pub fn render_sources(sources: &[GroundingSource], ctx: &RenderContext) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let bold = ctx.style(Style::new().bold());
    let dim = ctx.style(Style::new().dim());
    let mut out = format!("{}\n", bold.apply_to("Sources"));
    for (i, s) in sources.iter().enumerate() {
        out.push_str(&format!("  {}. {} {}\n", i + 1, s.title, dim.apply_to(&s.uri)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedOutput {
        postcraft_core::parse::parse(
            "## Instagram\n### Variation 1\n**Hook:** Lather up #Soap\n\n**CTA:** Shop https://example.com\nPlain line",
        )
    }

    #[test]
    fn test_render_parsed_without_color() {
        let ctx = RenderContext::plain(20);
        let text = render_parsed(&sample(), &ctx);

        assert!(text.starts_with("Instagram\n"));
        assert!(text.contains(&"─".repeat(20)));
        assert!(text.contains("\n  Variation 1\n"));
        assert!(text.contains("    Hook: Lather up #Soap\n"));
        assert!(text.contains("    CTA: Shop https://example.com\n"));
        assert!(text.contains("    Plain line\n"));
        assert!(!text.contains("**"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_rule_width_is_bounded() {
        let text = render_parsed(&sample(), &RenderContext::plain(500));
        assert!(text.contains(&"─".repeat(MAX_RULE_WIDTH)));
        assert!(!text.contains(&"─".repeat(MAX_RULE_WIDTH + 1)));
    }

    #[test]
    fn test_color_highlights_tokens() {
        let ctx = RenderContext {
            color: true,
            width: 40,
        };
        let spans = vec![
            Span::Text("see ".into()),
            Span::Url("https://a.com".into()),
            Span::Text(" ".into()),
            Span::Hashtag("#Sale".into()),
        ];
        let rendered = render_spans(&spans, &ctx);
        assert!(rendered.contains('\u{1b}'));
        assert!(rendered.contains("https://a.com"));
        assert_eq!(
            console::strip_ansi_codes(&rendered),
            "see https://a.com #Sale"
        );
    }

    #[test]
    fn test_render_sources() {
        let ctx = RenderContext::plain(80);
        assert_eq!(render_sources(&[], &ctx), "");

        let sources = vec![GroundingSource {
            uri: "https://a.com".into(),
            title: "A".into(),
        }];
        assert_eq!(render_sources(&sources, &ctx), "Sources\n  1. A https://a.com\n");
    }
}
