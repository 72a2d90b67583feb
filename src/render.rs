// src/render.rs
//! Turns the model's lightweight markup into the HTML email body.
//!
//! Four global passes, in this order: `### heading`, `**bold**`,
//! `[label](url)`, and blank-line breaks. The input is not escaped or
//! validated; text the passes do not match is carried through unchanged.

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use regex::Regex;

const PROJECT_URL: &str = "https://github.com/zytynski/research-digest";

fn re_heading() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"###\s+(.+)").expect("heading regex"))
}

fn re_bold() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"))
}

fn re_link() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"\[(.+?)\]\((.+?)\)").expect("link regex"))
}

/// Apply the four markup passes to `text`.
pub fn markup_to_html(text: &str) -> String {
    let out = re_heading().replace_all(text, "<h3>${1}</h3>");
    let out = re_bold().replace_all(&out, "<strong>${1}</strong>");
    let out = re_link().replace_all(&out, r#"<a href="${2}">${1}</a>"#);
    // single newlines stay as they are
    out.replace("\n\n", "<br><br>")
}

/// Render the full HTML document for `digest`, dated `generated_on`.
pub fn render_digest(digest: &str, generated_on: NaiveDate) -> String {
    let body = markup_to_html(digest);
    let date = generated_on.format("%B %d, %Y");

    format!(
        r#"
    <html>
    <head>
        <meta charset="UTF-8">
        <meta name="viewport" content="width=device-width, initial-scale=1.0">
        <style>
            body {{
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
                line-height: 1.6;
                color: #1a1a1a;
                max-width: 700px;
                margin: 0 auto;
                padding: 20px;
                background-color: #ffffff;
            }}
            h1 {{
                color: #0060df;
                font-size: 28px;
                margin-bottom: 10px;
                border-bottom: 3px solid #0060df;
                padding-bottom: 10px;
            }}
            h3 {{
                color: #003d99;
                font-size: 18px;
                margin-top: 30px;
                margin-bottom: 12px;
                line-height: 1.4;
            }}
            .meta {{
                color: #666;
                font-size: 14px;
                margin-bottom: 30px;
            }}
            a {{
                color: #0060df;
                text-decoration: none;
                font-weight: 500;
            }}
            a:hover {{
                color: #003d99;
                text-decoration: underline;
            }}
            strong {{
                color: #003d99;
                font-weight: 600;
            }}
            hr {{
                border: none;
                border-top: 1px solid #e0e0e0;
                margin: 40px 0 20px 0;
            }}
            .footer {{
                color: #999;
                font-size: 13px;
                margin-top: 40px;
                padding-top: 20px;
                border-top: 1px solid #e0e0e0;
            }}
            .summary {{
                background-color: #f8f9fa;
                padding: 15px;
                border-radius: 8px;
                margin: 20px 0;
                font-style: italic;
                color: #555;
            }}
        </style>
    </head>
    <body>
        <h1>📚 Research Digest</h1>
        <p class="meta">{date}</p>

        {body}

        <div class="footer">
            <p>Generated by your personal <a href="{PROJECT_URL}">Research Digest</a></p>
            <p style="font-size: 12px; color: #bbb;">To modify preferences, edit config.yaml in your repository</p>
        </div>
    </body>
    </html>
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_markup_renders_exactly() {
        let out = markup_to_html("### Title\n\n**Bold** and [text](http://x)");
        assert_eq!(
            out,
            r#"<h3>Title</h3><br><br><strong>Bold</strong> and <a href="http://x">text</a>"#
        );
    }

    #[test]
    fn plain_text_only_gets_breaks() {
        let text = "No markup here.\nSecond line.\n\nNew paragraph.";
        assert_eq!(
            markup_to_html(text),
            "No markup here.\nSecond line.<br><br>New paragraph."
        );
    }

    #[test]
    fn adjacent_bold_spans_stay_separate() {
        assert_eq!(
            markup_to_html("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn heading_takes_rest_of_line_only() {
        assert_eq!(
            markup_to_html("### 1. First\nbody"),
            "<h3>1. First</h3>\nbody"
        );
    }

    #[test]
    fn triple_newline_leaves_one_newline() {
        assert_eq!(markup_to_html("a\n\n\nb"), "a<br><br>\nb");
    }

    #[test]
    fn document_has_date_banner_and_footer() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let html = render_digest("Hello", d);
        assert!(html.contains("<p class=\"meta\">March 05, 2026</p>"));
        assert!(html.contains("<h1>📚 Research Digest</h1>"));
        assert!(html.contains("        Hello\n"));
        assert!(html.contains(PROJECT_URL));
        assert!(html.contains("edit config.yaml"));
    }
}
