//! Line splitting shared by the loader and the applier.

/// Split text into lines.
///
/// `"\r\n"`, `"\n"`, and bare `"\r"` all count as one line break. The
/// trackers emit `\r?\n`, but old-style logs carry bare `\r`; a raw `\r`
/// appearing mid-line is therefore always treated as a break here.
///
/// The result always has at least one element: `""` splits to `[""]`,
/// and a trailing break yields a trailing empty line (`"a\n"` splits to
/// `["a", ""]`), matching how an editor renders such content.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\n' => lines.push(std::mem::take(&mut current)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_no_break() {
        assert_eq!(split_lines("abc"), vec!["abc"]);
    }

    #[test]
    fn test_lf() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_bare_cr() {
        assert_eq!(split_lines("a\rb"), vec!["a", "b"]);
    }

    #[test]
    fn test_trailing_break() {
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn test_consecutive_breaks() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_crlf_not_double_counted() {
        assert_eq!(split_lines("\r\n"), vec!["", ""]);
    }
}
