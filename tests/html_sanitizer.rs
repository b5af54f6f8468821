//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use mediumpress::html::{sanitize, strip_all_tags};

    #[test]
    fn keeps_whitelisted_markup() {
        let output = sanitize("<p>Hello <strong>World</strong></p>");

        assert_eq!(output, "<p>Hello <strong>World</strong></p>");
    }

    #[test]
    fn removes_script_and_its_text() {
        let output = sanitize("<p>a<script>stealCookies()</script>b</p>");

        assert_eq!(output, "<p>ab</p>");
        assert!(!output.contains("script"));
        assert!(!output.contains("stealCookies"));
    }

    #[test]
    fn removes_style_subtree() {
        let output = sanitize("<p>text<style>p { color: red }</style></p>");

        assert_eq!(output, "<p>text</p>");
    }

    #[test]
    fn unwraps_unlisted_block_elements() {
        let output = sanitize("<div><p>One</p><p>Two</p></div>");

        assert_eq!(output, "<p>One</p><p>Two</p>");
    }

    #[test]
    fn unwraps_unlisted_inline_elements() {
        let output = sanitize("<p><span>kept text</span></p>");

        assert_eq!(output, "<p>kept text</p>");
    }

    #[test]
    fn drops_attributes_not_on_the_whitelist() {
        let output = sanitize(r#"<p class="intro" style="color: red" id="p1">t</p>"#);

        assert_eq!(output, "<p>t</p>");
    }

    #[test]
    fn keeps_href_on_links_only() {
        let output =
            sanitize(r#"<a href="https://example.com" target="_blank" rel="noopener">L</a>"#);

        assert_eq!(output, r#"<a href="https://example.com">L</a>"#);
    }

    #[test]
    fn keeps_src_and_alt_on_images_only() {
        let output = sanitize(r#"<img src="a.jpg" alt="A" class="wide" width="100">"#);

        assert_eq!(output, r#"<img src="a.jpg" alt="A">"#);
    }

    #[test]
    fn keeps_figures_with_captions() {
        let input = r#"<figure><img src="a.jpg" alt="A"><figcaption>Cap</figcaption></figure>"#;

        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn removes_comments() {
        let output = sanitize("<p>a</p><!-- internal note --><p>b</p>");

        assert_eq!(output, "<p>a</p><p>b</p>");
        assert!(!output.contains("internal note"));
    }

    #[test]
    fn is_idempotent() {
        let input = concat!(
            r#"<div class="wrap"><h1 id="t">T</h1>"#,
            "<p>a<script>x()</script><span>b</span></p>",
            r#"<img src="i.png" alt="i" data-id="4"></div>"#,
        );

        let once = sanitize(input);
        let twice = sanitize(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn strip_all_tags_leaves_text_only() {
        let output = strip_all_tags("<h1>Title</h1><p>Body <em>text</em></p>");

        assert!(output.contains("Title"));
        assert!(output.contains("Body"));
        assert!(output.contains("text"));
        assert!(!output.contains('<'));
    }

    #[test]
    fn strip_all_tags_skips_script_text() {
        let output = strip_all_tags("<p>a<script>var hidden = 1;</script></p>");

        assert!(output.contains('a'));
        assert!(!output.contains("hidden"));
    }
}
