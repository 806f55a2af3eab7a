use std::sync::LazyLock;

use regex::Regex;
use scrapeaid_core::error::AppError;
use scrapeaid_core::traits::Cleaner;

/// Rewrites applied by [`minify_html`], in order.
static PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?s)<!--.*?-->", ""),
        (r">\s+<", "><"),
        (r"(<[^/!][^>]*>)\s+", "$1"),
        (r"\s+</", "</"),
        (r"\s+>", ">"),
        (r"<\s+", "<"),
        (r"\s+", " "),
        (r"\s*=\s*", "="),
    ]
    .into_iter()
    .map(|(pattern, repl)| (Regex::new(pattern).expect("minify pattern is valid"), repl))
    .collect()
});

/// Shrinks markup with a fixed sequence of textual rewrites.
///
/// Strips comments, drops whitespace between adjacent tags, after an
/// opening tag, before a closing tag and inside brackets, collapses
/// remaining whitespace runs to one space and tightens `=` separators.
/// Spaces between inline elements and text (`Hello <b>World</b>`) are kept.
/// Purely textual: malformed markup is passed through as-is.
///
/// The passes are repeated until the text stops changing, so
/// `minify_html(&minify_html(x)) == minify_html(x)` holds even when a
/// rewrite assembles a new comment out of bracket fragments.
pub fn minify_html(html: &str) -> String {
    let mut out = run_passes(html);
    loop {
        let next = run_passes(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

fn run_passes(html: &str) -> String {
    let mut out = html.to_string();
    for (re, repl) in PASSES.iter() {
        out = re.replace_all(&out, *repl).into_owned();
    }
    out.trim().to_string()
}

/// [`Cleaner`] wrapper around [`minify_html`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMinifier;

impl Cleaner for HtmlMinifier {
    fn clean(&self, html: &str) -> Result<String, AppError> {
        Ok(minify_html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_nested_whitespace() {
        assert_eq!(
            minify_html("<div>   <p>  Hello   World  </p>   </div>"),
            "<div><p>Hello World</p></div>"
        );
    }

    #[test]
    fn test_keeps_spaces_around_inline_elements() {
        assert_eq!(
            minify_html("<p>Hello <b>World</b> and <i>more</i></p>"),
            "<p>Hello <b>World</b> and <i>more</i></p>"
        );
        assert_eq!(
            minify_html("<p>\n  Read   <a href = \"/docs\">the docs</a>\n  today\n</p>"),
            "<p>Read <a href=\"/docs\">the docs</a> today</p>"
        );
    }

    #[test]
    fn test_strips_multiline_comments() {
        let html = "<body>\n<!-- header\n  nav -->\n<h1>Title</h1><!--x--></body>";
        let out = minify_html(html);
        assert_eq!(out, "<body><h1>Title</h1></body>");
        assert!(!out.contains("<!--"));
        assert!(!out.contains("-->"));
    }

    #[test]
    fn test_comment_removal_is_non_greedy() {
        let out = minify_html("<!-- a --><p>keep</p><!-- b -->");
        assert_eq!(out, "<p>keep</p>");
    }

    #[test]
    fn test_tightens_attribute_separators() {
        assert_eq!(
            minify_html("<a   href = \"/x\"   class =\"y\" >link</a >"),
            "<a href=\"/x\" class=\"y\">link</a>"
        );
    }

    #[test]
    fn test_trims_and_handles_empty() {
        assert_eq!(minify_html(""), "");
        assert_eq!(minify_html("  \n\t "), "");
        assert_eq!(minify_html("\n  <br>  \n"), "<br>");
    }

    #[test]
    fn test_malformed_markup_passes_through() {
        assert_eq!(minify_html("<div   <p>oops"), "<div <p>oops");
    }

    #[test]
    fn test_comment_assembled_by_rewrites_is_removed() {
        let out = minify_html("< !-- hidden -- ><p>x</p>");
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<div>   <p>  Hello   World  </p>   </div>",
            "<!-- c --><ul>\n  <li> a = b </li>\n  <li>c</li>\n</ul>",
            "< span >  text\t\twith\n\nbreaks < / span >",
            "plain   text = value",
        ];
        for input in inputs {
            let once = minify_html(input);
            assert_eq!(minify_html(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_cleaner_impl() {
        let out = HtmlMinifier.clean("<p>  a  </p>").unwrap();
        assert_eq!(out, "<p>a</p>");
    }
}
