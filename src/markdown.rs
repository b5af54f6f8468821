//! HTML to Markdown rendering for the Medium tag subset.
//!
//! One-directional and deliberately lossy: tables arrive here already
//! folded to paragraphs, ordered lists lose their numbering, figure
//! captions are dropped. The input is expected to be sanitizer output:
//! every tag is known, attrs are double-quoted, and markup nests the
//! way the serializer wrote it, so plain regex passes are enough.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").unwrap());
static H2_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<h2[^>]*>(.*?)</h2>").unwrap());
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<blockquote[^>]*>(.*?)</blockquote>").unwrap());
static PRE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre[^>]*><code[^>]*>(.*?)</code></pre>").unwrap());
static HR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<hr[^>]*>").unwrap());
static UL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<ul[^>]*>(.*?)</ul>").unwrap());
static OL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<ol[^>]*>(.*?)</ol>").unwrap());
static LI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<li[^>]*>(.*?)</li>").unwrap());
static FIGURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<figure[^>]*>(.*?)</figure>").unwrap());
static IMG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<img[^>]*>").unwrap());
static SRC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"src="([^"]*)""#).unwrap());
static ALT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"alt="([^"]*)""#).unwrap());
static A_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<a[^>]+href="([^"]*)"[^>]*>(.*?)</a>"#).unwrap());
static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<strong>(.*?)</strong>").unwrap());
static B_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<b>(.*?)</b>").unwrap());
static EM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<em>(.*?)</em>").unwrap());
static I_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<i>(.*?)</i>").unwrap());
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code>(.*?)</code>").unwrap());
static P_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<p[^>]*>(.*?)</p>").unwrap());
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br[^>]*>").unwrap());
static LEFTOVER_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());
static EXCESS_NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Render whitelist-conformant HTML as Markdown.
///
/// Block passes run before inline ones so inline markup inside a block
/// survives verbatim into the block's output line and is converted
/// afterwards.
pub fn to_markdown(html: &str) -> String {
    let mut md = html.to_string();

    // Block elements first.
    md = H1_RE.replace_all(&md, "# $1\n\n").into_owned();
    md = H2_RE.replace_all(&md, "## $1\n\n").into_owned();
    md = BLOCKQUOTE_RE.replace_all(&md, "> $1\n\n").into_owned();
    md = PRE_CODE_RE.replace_all(&md, "```\n$1\n```\n\n").into_owned();
    md = HR_RE.replace_all(&md, "---\n\n").into_owned();

    // Lists: wrappers unwrap, every item gets a dash marker.
    md = UL_RE.replace_all(&md, "$1\n").into_owned();
    md = OL_RE.replace_all(&md, "$1\n").into_owned();
    md = LI_RE.replace_all(&md, "- $1\n").into_owned();

    // Figures and images.
    md = FIGURE_RE
        .replace_all(&md, |caps: &Captures| match image_line(&caps[1]) {
            Some(line) => format!("{}\n\n", line),
            None => caps[0].to_string(),
        })
        .into_owned();
    md = IMG_RE
        .replace_all(&md, |caps: &Captures| {
            image_line(&caps[0]).unwrap_or_default()
        })
        .into_owned();

    // Inline elements.
    md = A_RE.replace_all(&md, "[$2]($1)").into_owned();
    md = STRONG_RE.replace_all(&md, "**$1**").into_owned();
    md = B_RE.replace_all(&md, "**$1**").into_owned();
    md = EM_RE.replace_all(&md, "*$1*").into_owned();
    md = I_RE.replace_all(&md, "*$1*").into_owned();
    md = CODE_RE.replace_all(&md, "`$1`").into_owned();

    // Paragraphs.
    md = P_RE.replace_all(&md, "$1\n\n").into_owned();
    md = BR_RE.replace_all(&md, "\n").into_owned();

    // Whatever markup is left loses its tags, text stays.
    md = LEFTOVER_TAG_RE.replace_all(&md, "").into_owned();

    md = EXCESS_NEWLINES_RE.replace_all(&md, "\n\n").into_owned();
    md.trim().to_string()
}

/// `![alt](src)` for the first image tag in the fragment, if it has a
/// source. The alt text may be absent; a missing source drops the image.
fn image_line(fragment: &str) -> Option<String> {
    let img_tag = IMG_RE.find(fragment)?.as_str();
    let src = SRC_RE.captures(img_tag).map(|caps| caps[1].to_string())?;
    let alt = ALT_RE
        .captures(img_tag)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    Some(format!("![{}]({})", alt, src))
}
