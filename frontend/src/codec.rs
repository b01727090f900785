//! Escape, restore and render the inline tag vocabulary carried in model
//! output (`<goal>`, `<day>`, `<context>`, `<score>`).
//!
//! Tags are flat tokens: nothing checks that an open tag is ever closed.

/// A recognised tag and the class its rendered container carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub name: &'static str,
    pub class: &'static str,
}

pub static TAGS: [Tag; 4] = [
    Tag { name: "goal", class: "bg-blue-100 px-2 py-1 rounded" },
    Tag { name: "day", class: "bg-green-100 px-2 py-1 rounded block mt-2" },
    Tag { name: "context", class: "bg-yellow-100 px-2 py-1 rounded" },
    Tag { name: "score", class: "text-sm text-gray-600 ml-2" },
];

/// Delimiter of the escaped form, `|||goal|||` / `|||/goal|||`.
pub const SENTINEL: &str = "|||";

/// Matches `{open}[/]{name}{close}` at the start of `rest`.
/// Returns the tag, whether it is a closing tag, and the token length.
fn match_token(rest: &str, open: &str, close: &str) -> Option<(&'static Tag, bool, usize)> {
    let body = rest.strip_prefix(open)?;
    let (closing, body) = match body.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, body),
    };
    TAGS.iter().find_map(|tag| {
        body.strip_prefix(tag.name)?.strip_prefix(close)?;
        let len = open.len() + usize::from(closing) + tag.name.len() + close.len();
        Some((tag, closing, len))
    })
}

/// Walks `text` left to right, handing every recognised token to `on_tag`
/// and every other character to `on_char`.
fn rewrite(
    text: &str,
    open: &str,
    close: &str,
    mut on_tag: impl FnMut(&mut String, &Tag, bool),
    mut on_char: impl FnMut(&mut String, char),
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        match match_token(rest, open, close) {
            Some((tag, closing, len)) => {
                on_tag(&mut out, tag, closing);
                rest = &rest[len..];
            }
            None => {
                on_char(&mut out, c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

fn push_token(out: &mut String, open: &str, tag: &Tag, closing: bool, close: &str) {
    out.push_str(open);
    if closing {
        out.push('/');
    }
    out.push_str(tag.name);
    out.push_str(close);
}

/// Rewrites `<tag>` / `</tag>` into the sentinel form. Meant for the raw JSON
/// payload of a `data: ` line, before it is parsed.
pub fn escape_tags(raw: &str) -> String {
    rewrite(
        raw,
        "<",
        ">",
        |out, tag, closing| push_token(out, SENTINEL, tag, closing, SENTINEL),
        |out, c| out.push(c),
    )
}

/// Inverse of [`escape_tags`], applied to the decoded `response` string.
pub fn restore_tags(text: &str) -> String {
    rewrite(
        text,
        SENTINEL,
        SENTINEL,
        |out, tag, closing| push_token(out, "<", tag, closing, ">"),
        |out, c| out.push(c),
    )
}

/// Turns reassembled text into display markup. Recognised tags become styled
/// `<span>`s; everything else is HTML-escaped, so model output cannot inject
/// markup of its own.
pub fn render_markup(text: &str) -> String {
    rewrite(
        text,
        "<",
        ">",
        |out, tag, closing| {
            if closing {
                out.push_str("</span>");
            } else {
                out.push_str("<span class=\"");
                out.push_str(tag.class);
                out.push_str("\">");
            }
        },
        |out, c| match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        },
    )
}
