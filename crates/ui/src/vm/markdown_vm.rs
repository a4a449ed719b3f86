use std::collections::HashSet;

/// Render a model-written summary (often Markdown) to sanitized HTML.
#[must_use]
pub fn summary_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Strip everything but basic formatting; links and images are dropped.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "br", "em", "strong", "del", "code", "pre", "blockquote", "ul", "ol", "li", "h1",
        "h2", "h3", "h4", "h5", "h6", "hr", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_lists() {
        let html = summary_to_html("## Key ideas\n\n- **ATP** is energy\n- Mitosis");
        assert!(html.contains("<h2>Key ideas</h2>"));
        assert!(html.contains("<li><strong>ATP</strong> is energy</li>"));
        assert!(html.contains("<li>Mitosis</li>"));
    }

    #[test]
    fn drops_scripts_and_links() {
        let html = summary_to_html("Hi <script>alert(1)</script> [site](https://example.com)");
        assert!(!html.contains("<script"));
        assert!(!html.contains("<a"));
        assert!(html.contains("site"));
    }
}
