//! POSIX shell quoting helpers.

/// Quote `arg` as a single shell word.
///
/// The result is always wrapped in single quotes and every embedded `'` is
/// written as `'\''`, so nothing inside can be interpreted by the shell.
pub fn quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Wrap `text` in double quotes, escaping the characters still special there.
pub fn double_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("/a/b/html/"), "'/a/b/html/'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_quote_single_quote() {
        assert_eq!(quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_quote_keeps_metacharacters_literal() {
        assert_eq!(quote("$HOME `id` \"x\""), "'$HOME `id` \"x\"'");
    }

    #[test]
    fn test_double_quote() {
        assert_eq!(double_quote("ssh -i '/k.pem'"), "\"ssh -i '/k.pem'\"");
        assert_eq!(double_quote(r#"a"b$c`d\e"#), r#""a\"b\$c\`d\\e""#);
    }
}
