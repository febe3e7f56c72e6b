use regex::Captures;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::{
    rules::{Action, Rule, RuleTable, State, Transition, RULES},
    tokens::{Token, TokenKind},
};

/// A state left on the stack at end of input, with the offset of the
/// token that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenState {
    pub state: State,
    pub opened_at: Position,
}

/// Result of a full lex. `unterminated` is empty for well-formed input.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub unterminated: Vec<OpenState>,
}

impl Lexed {
    /// An `UnterminatedState` error pointing at the innermost open
    /// construct, if any construct is still open.
    pub fn unterminated_error(&self) -> Option<Error> {
        let innermost = self.unterminated.last()?;

        Some(Error::new(
            ErrorImpl::UnterminatedState {
                state: innermost.state.name().to_string(),
                depth: self.unterminated.len(),
            },
            innermost.opened_at,
        ))
    }
}

pub struct Lexer<'a> {
    table: &'static RuleTable,
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    stack: Vec<OpenState>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            table: &RULES,
            tokens: vec![],
            source,
            pos: 0,
            stack: vec![OpenState {
                state: State::Root,
                opened_at: Position::null(),
            }],
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(MK_TOKEN!(
            kind,
            String::from(&self.source[start..end]),
            Span::new(start, end)
        ));
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The current lexical state.
    pub fn state(&self) -> State {
        self.stack.last().map_or(State::Root, |open| open.state)
    }

    fn push_state(&mut self, state: State, opened_at: usize) {
        trace!(state = state.name(), at = opened_at, "push state");

        self.stack.push(OpenState {
            state,
            opened_at: Position::from_offset(opened_at),
        });
    }

    fn pop_state(&mut self) {
        if self.stack.len() > 1 {
            if let Some(open) = self.stack.pop() {
                trace!(state = open.state.name(), at = self.pos, "pop state");
            }
        } else {
            trace!(at = self.pos, "ignored pop of the root state");
        }
    }

    fn preceded_by_word_char(&self) -> bool {
        self.source[..self.pos]
            .chars()
            .next_back()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
    }

    /// Emits the tokens for `rule` matched at the cursor and returns how
    /// many bytes it consumed.
    fn apply(&mut self, rule: &Rule, captures: &Captures) -> usize {
        let base = self.pos;

        match rule.action {
            Action::Token(kind) => {
                let len = captures.get(0).map_or(0, |m| m.end());
                self.push(kind, base, base + len);
                len
            }
            Action::ByGroups(kinds) => {
                let mut consumed = 0;

                for (index, kind) in kinds.iter().enumerate() {
                    if let Some(group) = captures.get(index + 1) {
                        if group.start() < group.end() {
                            self.push(*kind, base + group.start(), base + group.end());
                        }
                        consumed = consumed.max(group.end());
                    }
                }

                consumed
            }
        }
    }

    /// Tries the current state's rules in order. Returns false when none
    /// of them matched at the cursor.
    fn step(&mut self) -> bool {
        let table = self.table;
        let state = self.state();
        let start = self.pos;

        for rule in table.rules(state) {
            if rule.word_start && self.preceded_by_word_char() {
                continue;
            }

            let Some(captures) = rule.regex.captures(self.remainder()) else {
                continue;
            };

            let consumed = self.apply(rule, &captures);
            self.advance_n(consumed);

            match rule.transition {
                Transition::None => {}
                Transition::Push(next) => self.push_state(next, start),
                Transition::PushSelf => self.push_state(state, start),
                Transition::Pop => self.pop_state(),
            }

            return true;
        }

        false
    }

    /// Emits the character under the cursor as plain text.
    fn fallback(&mut self) {
        let len = self.remainder().chars().next().map_or(1, char::len_utf8);

        debug!(
            state = self.state().name(),
            at = self.pos,
            text = &self.source[self.pos..self.pos + len],
            "no rule matched, emitting text"
        );

        self.push(TokenKind::Text, self.pos, self.pos + len);
        self.advance_n(len);
    }

    pub fn run(mut self) -> Lexed {
        while !self.at_eof() {
            if !self.step() {
                self.fallback();
            }
        }

        Lexed {
            tokens: self.tokens,
            unterminated: self.stack.into_iter().skip(1).collect(),
        }
    }
}

/// Lexes `source` into tokens whose values concatenate back to `source`.
/// Never fails; unterminated constructs are simply left open.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run().tokens
}

/// Like [`tokenize`], but rejects input that leaves a comment, string,
/// interpolation or `using` block open at the end.
pub fn tokenize_strict(source: &str) -> Result<Vec<Token>, Error> {
    let lexed = Lexer::new(source).run();

    match lexed.unterminated_error() {
        Some(error) => {
            debug!(%error, "input ended inside an open state");
            Err(error)
        }
        None => Ok(lexed.tokens),
    }
}
