//! Command chains.

use std::fmt;

use super::command::BashCommand;
use super::lexer::{lex, ShellInput};

/// Control or redirection operator separating two commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `;`
    Semi,
    /// `|`
    Pipe,
    /// `||`
    Or,
    /// `&`
    Background,
    /// `&&`
    And,
    /// `>`
    RedirectOut,
    /// `<`
    RedirectIn,
}

impl Operator {
    /// Parse a whole shell word as an operator.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            ";" => Some(Operator::Semi),
            "|" => Some(Operator::Pipe),
            "||" => Some(Operator::Or),
            "&" => Some(Operator::Background),
            "&&" => Some(Operator::And),
            ">" => Some(Operator::RedirectOut),
            "<" => Some(Operator::RedirectIn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Semi => ";",
            Operator::Pipe => "|",
            Operator::Or => "||",
            Operator::Background => "&",
            Operator::And => "&&",
            Operator::RedirectOut => ">",
            Operator::RedirectIn => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shell command line split into commands and the operators between them.
///
/// Never empty: there is always exactly one more command than operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BashCommandChain {
    commands: Vec<BashCommand>,
    operators: Vec<Operator>,
}

impl BashCommandChain {
    /// Parse a command line.
    ///
    /// Input that cannot be lexed, or lexes to nothing, yields a chain with a
    /// single empty command so callers see "no recognizable command".
    pub fn parse<'a>(input: impl Into<ShellInput<'a>>) -> Self {
        let input = input.into();
        let words = match lex(input) {
            Some(words) if !words.is_empty() => words,
            Some(_) => return Self::empty(),
            None => {
                tracing::debug!("Cannot lex shell command {:?}", input);
                return Self::empty();
            }
        };

        let (segments, operators) = split_chain(&words);
        Self {
            commands: segments.iter().map(|&segment| BashCommand::parse(segment)).collect(),
            operators,
        }
    }

    /// A chain holding one empty command.
    pub fn empty() -> Self {
        Self {
            commands: vec![BashCommand::default()],
            operators: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[BashCommand] {
        &self.commands
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// First command of the chain.
    pub fn first(&self) -> &BashCommand {
        &self.commands[0]
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// A chain always holds at least one command.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BashCommand> {
        self.commands.iter()
    }

    /// Words of every command before `idx` and the operators following
    /// them, in source order.
    pub fn words_before(&self, idx: usize) -> Vec<&str> {
        let mut words = Vec::new();
        for (command, operator) in self.commands.iter().zip(&self.operators).take(idx) {
            words.extend(command.words.iter().map(String::as_str));
            words.push(operator.as_str());
        }
        words
    }
}

impl<'a> IntoIterator for &'a BashCommandChain {
    type Item = &'a BashCommand;
    type IntoIter = std::slice::Iter<'a, BashCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Split words at every operator.
///
/// `k` operators always give `k + 1` segments, so a trailing operator leaves
/// an empty final segment. Interleaving segments and operators reproduces
/// `words`.
pub fn split_chain(words: &[String]) -> (Vec<&[String]>, Vec<Operator>) {
    let mut segments = Vec::new();
    let mut operators = Vec::new();
    let mut start = 0;

    for (idx, word) in words.iter().enumerate() {
        if let Some(op) = Operator::from_word(word) {
            segments.push(&words[start..idx]);
            operators.push(op);
            start = idx + 1;
        }
    }
    segments.push(&words[start..]);

    (segments, operators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn parses_sudo_after_semicolon() {
        let chain = BashCommandChain::parse("echo ok; sudo apt update");

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.operators(), [Operator::Semi]);
        let second = &chain.commands()[1];
        assert!(second.has_sudo);
        assert_eq!(second.bin, "apt");
        assert_eq!(second.sub_command(), Some("update"));
    }

    #[test]
    fn words_before_interleaves_operators() {
        let chain = BashCommandChain::parse("apt-get update && apt-get install vim; echo ok");

        assert!(chain.words_before(0).is_empty());
        assert_eq!(chain.words_before(1), ["apt-get", "update", "&&"]);
        assert_eq!(
            chain.words_before(2),
            ["apt-get", "update", "&&", "apt-get", "install", "vim", ";"]
        );
    }

    #[test]
    fn splits_on_every_operator() {
        let chain = BashCommandChain::parse("a && b || c | d & e > f < g");

        assert_eq!(chain.len(), 7);
        assert_eq!(
            chain.operators(),
            [
                Operator::And,
                Operator::Or,
                Operator::Pipe,
                Operator::Background,
                Operator::RedirectOut,
                Operator::RedirectIn,
            ]
        );
        let bins: Vec<&str> = chain.iter().map(|c| c.bin.as_str()).collect();
        assert_eq!(bins, ["a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn split_reconstructs_words() {
        let words = strings(&["apt-get", "update", "&&", "apt-get", "install", "-y", "curl", ";", "rm", "-rf", "x"]);
        let (segments, operators) = split_chain(&words);

        assert_eq!(segments.len(), operators.len() + 1);
        let mut rebuilt: Vec<String> = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            rebuilt.extend(segment.iter().cloned());
            if let Some(op) = operators.get(i) {
                rebuilt.push(op.to_string());
            }
        }
        assert_eq!(rebuilt, words);
    }

    #[test]
    fn trailing_operator_leaves_empty_segment() {
        let words = strings(&["make", "&&"]);
        let (segments, operators) = split_chain(&words);

        assert_eq!(operators, [Operator::And]);
        assert_eq!(segments.len(), 2);
        assert!(segments[1].is_empty());
    }

    #[test]
    fn consecutive_operators_give_empty_segments() {
        let chain = BashCommandChain::parse("a ; && b");

        assert_eq!(chain.len(), 3);
        assert!(chain.commands()[1].is_empty());
    }

    #[test]
    fn unlexable_input_yields_single_empty_command() {
        let chain = BashCommandChain::parse("echo \"unterminated");

        assert_eq!(chain.len(), 1);
        assert!(chain.first().is_empty());
        assert!(chain.operators().is_empty());
    }

    #[test]
    fn empty_input_yields_single_empty_command() {
        let chain = BashCommandChain::parse("");

        assert_eq!(chain.len(), 1);
        assert!(chain.first().is_empty());
        assert!(!chain.is_empty());
    }

    #[test]
    fn parses_tokens() {
        let tokens = strings(&["/bin/sh", "-c", "echo hi"]);
        let chain = BashCommandChain::parse(&tokens);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.first().bin, "/bin/sh");
        assert!(chain.first().has_option("-c"));
    }
}
