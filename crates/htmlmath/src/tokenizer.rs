use crate::character_class::{is_letter, is_numeric, is_pseudo_superscript};
use crate::tree::{Kind, Node};

/// Splits a run of literal text into tokens, skipping whitespace.
///
/// At each position the first of these that matches wins, taking as many characters as it can:
/// digits and separators, letters, pseudo-superscript marks, or else one single character.
pub struct Tokenizer<'source> {
    rest: &'source str,
}

impl<'source> Tokenizer<'source> {
    #[inline]
    pub fn new(source: &'source str) -> Self {
        Tokenizer { rest: source }
    }

    /// Split off the longest prefix of `self.rest` whose characters satisfy `pred`.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'source str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        token
    }
}

impl<'source> Iterator for Tokenizer<'source> {
    type Item = &'source str;

    fn next(&mut self) -> Option<Self::Item> {
        self.rest = self.rest.trim_start();
        let first = self.rest.chars().next()?;
        let token = if is_numeric(first) {
            self.take_while(is_numeric)
        } else if is_letter(first) {
            self.take_while(is_letter)
        } else if is_pseudo_superscript(first) {
            self.take_while(is_pseudo_superscript)
        } else {
            let (token, rest) = self.rest.split_at(first.len_utf8());
            self.rest = rest;
            token
        };
        Some(token)
    }
}

/// Turns a token into a text node; a token made only of pseudo-superscript marks is put into a
/// superscript, because that is how it is drawn.
fn token_node(token: &str) -> Node {
    if token.chars().all(is_pseudo_superscript) {
        Node::new(Kind::Sup, vec![Node::text(token)])
    } else {
        Node::text(token)
    }
}

/// Tokenize `text`: a single token is returned as is, several are wrapped in a row.
pub fn tokenize(text: &str) -> Node {
    let mut nodes: Vec<Node> = Tokenizer::new(text).map(token_node).collect();
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    Node::row(nodes)
}
