//! Image shortcut passes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static NESTED_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]+\.(?i:png|jpe?g|gif|webp|svg|bmp|avif|tiff?|ico))\]\(([^)]*)\)")
        .unwrap()
});

static ALIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!\[[^\]]*\]\([^)]*\))\[([A-Za-z])\]").unwrap());

/// `[file.png](href)` to `[![](file.png)](href)`.
///
/// Link text that names an image file becomes the link's content. Images
/// (`![file.png](src)`) are left alone.
///
/// ```
/// use edgering_renderer::annotate::nested_images;
///
/// assert_eq!(nested_images("[file.png](href)"), "[![](file.png)](href)");
/// ```
#[must_use]
pub fn nested_images(text: &str) -> String {
    NESTED_IMAGE_RE
        .replace_all(text, |caps: &Captures| {
            let is_image = caps
                .get(0)
                .is_some_and(|m| text[..m.start()].ends_with('!'));
            if is_image {
                caps[0].to_owned()
            } else {
                format!("[![]({})]({})", &caps[1], &caps[2])
            }
        })
        .into_owned()
}

/// `![alt](src)[c]` to `![alt](src){.ImgAlignCenter}`.
///
/// `c` centers, `l` aligns left, `p` and `r` align right. Any other letter
/// becomes `ImgAlign<letter>` in lowercase.
#[must_use]
pub fn image_aligns(text: &str) -> String {
    ALIGN_RE
        .replace_all(text, |caps: &Captures| {
            format!("{}{{.{}}}", &caps[1], align_class(&caps[2]))
        })
        .into_owned()
}

fn align_class(letter: &str) -> String {
    let letter = letter.to_ascii_lowercase();
    match letter.as_str() {
        "c" => "ImgAlignCenter".to_owned(),
        "l" => "ImgAlignLeft".to_owned(),
        "p" | "r" => "ImgAlignRight".to_owned(),
        _ => format!("ImgAlign{letter}"),
    }
}
