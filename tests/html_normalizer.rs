//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use mediumpress::html::normalize;

    #[test]
    fn removes_block_editor_comments() {
        let input = "<!-- wp:paragraph -->\n<p>T</p>\n<!-- /wp:paragraph -->";

        let output = normalize(input);

        assert_eq!(output.trim(), "<p>T</p>");
        assert!(!output.contains("wp:"));
    }

    #[test]
    fn demotes_h4_to_h2() {
        assert_eq!(normalize("<h4>X</h4>"), "<h2>X</h2>");
    }

    #[test]
    fn demotes_every_deep_heading_level() {
        let output = normalize("<h3>a</h3><h4>b</h4><h5>c</h5><h6>d</h6>");

        assert_eq!(output, "<h2>a</h2><h2>b</h2><h2>c</h2><h2>d</h2>");
    }

    #[test]
    fn demotes_headings_inside_wrappers() {
        assert_eq!(normalize("<div><h4>X</h4></div>"), "<h2>X</h2>");
    }

    #[test]
    fn keeps_top_heading_levels() {
        assert_eq!(normalize("<h1>A</h1><h2>B</h2>"), "<h1>A</h1><h2>B</h2>");
    }

    #[test]
    fn folds_table_into_one_paragraph() {
        let output = normalize("<table><tr><td>A</td><td>B</td></tr></table>");

        assert_eq!(output, "<p>AB</p>");
        assert!(!output.contains("<table"));
    }

    #[test]
    fn table_fold_keeps_inline_markup() {
        let input = concat!(
            "<table>\n",
            "  <tr><td><strong>Alpha</strong></td><td>Beta</td></tr>\n",
            r#"  <tr><td><a href="u">Link</a></td></tr>"#,
            "\n</table>",
        );

        let output = normalize(input);

        assert!(output.contains("<strong>Alpha</strong>"));
        assert!(output.contains("Beta"));
        assert!(output.contains(r#"<a href="u">Link</a>"#));
        assert!(!output.contains("table"));
        assert!(!output.contains("td"));
        assert_eq!(output.matches("<p>").count(), 1);
    }

    #[test]
    fn flattens_gallery_to_one_figure_per_image() {
        let input = concat!(
            r#"<figure class="wp-block-gallery">"#,
            r#"<figure><img src="1.jpg" alt="One"><figcaption>c1</figcaption></figure>"#,
            r#"<figure><img src="2.jpg" alt="Two"></figure>"#,
            "</figure>",
        );

        let output = normalize(input);

        assert_eq!(
            output,
            concat!(
                r#"<figure><img src="1.jpg" alt="One"></figure>"#,
                r#"<figure><img src="2.jpg" alt="Two"></figure>"#,
            )
        );
        assert!(!output.contains("c1"));
    }

    #[test]
    fn empty_gallery_disappears() {
        let output = normalize(r#"<figure class="wp-block-gallery"></figure><p>after</p>"#);

        assert_eq!(output, "<p>after</p>");
    }

    #[test]
    fn strips_class_and_style_attributes() {
        let output = normalize(r#"<p class="a" style="b">x</p><h2 class="c">y</h2>"#);

        assert_eq!(output, "<p>x</p><h2>y</h2>");
    }

    #[test]
    fn prepares_a_block_editor_document() {
        let input = concat!(
            "<!-- wp:heading {\"level\":3} -->\n",
            r#"<h3 class="wp-block-heading">Abschnitt</h3>"#,
            "\n<!-- /wp:heading -->\n",
            "<!-- wp:paragraph -->\n",
            r#"<p class="has-text-align-left">Hallo <strong>Welt</strong></p>"#,
            "\n<!-- /wp:paragraph -->",
        );

        let output = normalize(input);

        assert!(output.contains("<h2>Abschnitt</h2>"));
        assert!(output.contains("<p>Hallo <strong>Welt</strong></p>"));
        assert!(!output.contains("wp:"));
        assert!(!output.contains("h3"));
        assert!(!output.contains("class"));
    }
}
