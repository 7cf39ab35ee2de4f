//! String helpers shared by the render walk.

/// Appends `text` to `out` with HTML special characters replaced by entities.
///
/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html_into(out: &mut String, text: &str) {
    let mut last = 0;
    for (i, ch) in text.char_indices() {
        let entity = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[last..i]);
        out.push_str(entity);
        last = i + ch.len_utf8();
    }
    out.push_str(&text[last..]);
}

/// Returns `text` with HTML special characters replaced by entities.
///
/// ```rust
/// use stache_render::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(&mut out, text);
    out
}
