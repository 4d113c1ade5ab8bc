//! Shell word lexing.

/// Input accepted by the shell parser.
#[derive(Debug, Clone, Copy)]
pub enum ShellInput<'a> {
    /// A raw command string, e.g. the body of a shell-form `RUN`.
    Raw(&'a str),
    /// A command line already split by the tokenizer, e.g. an exec-form
    /// `RUN`. Elements are joined with a single space before lexing.
    Tokens(&'a [String]),
}

impl<'a> From<&'a str> for ShellInput<'a> {
    fn from(raw: &'a str) -> Self {
        ShellInput::Raw(raw)
    }
}

impl<'a> From<&'a String> for ShellInput<'a> {
    fn from(raw: &'a String) -> Self {
        ShellInput::Raw(raw)
    }
}

impl<'a> From<&'a [String]> for ShellInput<'a> {
    fn from(tokens: &'a [String]) -> Self {
        ShellInput::Tokens(tokens)
    }
}

impl<'a> From<&'a Vec<String>> for ShellInput<'a> {
    fn from(tokens: &'a Vec<String>) -> Self {
        ShellInput::Tokens(tokens)
    }
}

/// Split `input` into shell words.
///
/// Returns `None` when the input cannot be lexed (unbalanced quotes, a
/// dangling escape).
pub fn lex(input: ShellInput<'_>) -> Option<Vec<String>> {
    let words = match input {
        ShellInput::Raw(raw) => shlex::split(raw)?,
        ShellInput::Tokens(tokens) => shlex::split(&tokens.join(" "))?,
    };
    Some(split_trailing_semicolons(words))
}

/// `echo ok;` lexes as `echo`, `ok;`. Move the glued `;` into its own word.
fn split_trailing_semicolons(words: Vec<String>) -> Vec<String> {
    let mut result = Vec::with_capacity(words.len());
    for word in words {
        match word.strip_suffix(';') {
            Some(head) if !head.is_empty() => {
                result.push(head.to_string());
                result.push(";".to_string());
            }
            _ => result.push(word),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &str) -> Vec<String> {
        lex(ShellInput::Raw(raw)).unwrap()
    }

    #[test]
    fn honors_quoting() {
        assert_eq!(words(r#"echo "a b" 'c d'"#), vec!["echo", "a b", "c d"]);
    }

    #[test]
    fn honors_escapes() {
        assert_eq!(words(r"echo a\ b"), vec!["echo", "a b"]);
    }

    #[test]
    fn splits_glued_semicolon() {
        assert_eq!(words("echo ok; ls"), vec!["echo", "ok", ";", "ls"]);
    }

    #[test]
    fn lone_semicolon_is_kept() {
        assert_eq!(words("echo ok ; ls"), vec!["echo", "ok", ";", "ls"]);
    }

    #[test]
    fn unbalanced_quote_fails() {
        assert_eq!(lex(ShellInput::Raw("echo \"oops")), None);
    }

    #[test]
    fn tokens_are_joined_with_space() {
        let tokens = vec!["apt-get".to_string(), "install".to_string(), "-y".to_string()];

        assert_eq!(
            lex(ShellInput::from(&tokens)).unwrap(),
            vec!["apt-get", "install", "-y"]
        );
    }

    #[test]
    fn empty_input_yields_no_words() {
        assert!(words("").is_empty());
        assert!(words("   ").is_empty());
    }
}
