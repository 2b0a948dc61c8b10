pub const HTML_CHARS: [(char, &str); 4] =
    [('&', "&amp;"), ('<', "&lt;"), ('>', "&gt;"), ('"', "&quot;")];

pub struct EscapeHtml<'a>(pub &'a str);

impl std::fmt::Display for EscapeHtml<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.0.chars() {
            match HTML_CHARS.iter().find(|(special, _)| *special == ch) {
                Some((_, entity)) => f.write_str(entity)?,
                None => write!(f, "{ch}")?,
            }
        }

        Ok(())
    }
}
