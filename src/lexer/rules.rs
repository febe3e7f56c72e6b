//! The ordered rule table, keyed by lexical state.
//!
//! Within a state the first rule whose pattern matches at the cursor
//! wins, so the order of the lists below is the only precedence
//! mechanism. Keyword rules must stay ahead of the identifier rule, the
//! number rules go from most to least specific, and operators go from
//! longest to shortest.

use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use regex::Regex;

use super::tokens::TokenKind;
use crate::MK_RULE;

/// Specifier keywords that appear in angle brackets.
pub const SPECIFIERS: &[&str] = &[
    "abstract",
    "computes",
    "constructor",
    "private",
    "public",
    "protected",
    "final",
    "decides",
    "inline",
    "native",
    "override",
    "suspends",
    "transacts",
    "internal",
    "reads",
    "writes",
    "allocates",
    "scoped",
    "converges",
    "castable",
    "concrete",
    "unique",
    "final_super",
    "open",
    "closed",
    "native_callable",
    "module_scoped_var_weak_map_key",
    "epic_internal",
    "persistable",
];

/// Block-forming keywords, usually followed by `:`.
pub const BLOCK_KEYWORDS: &[&str] = &["if", "then", "else", "for", "block", "loop", "array", "case"];

pub const DATA_STRUCTURE_KEYWORDS: &[&str] = &["module", "interface", "class", "struct", "enum"];

// `using` only appears as `using {`, which has its own rule.
pub const DECL_KEYWORDS: &[&str] = &["var", "set"];

pub const TYPE_KEYWORDS: &[&str] = &[
    "int",
    "float",
    "string",
    "logic",
    "char",
    "any",
    "void",
    "option",
    "comparable",
    "rational",
    "tuple",
    "type",
];

pub const RESERVED_WORDS: &[&str] = &[
    "do", "while", "break", "return", "yield", "spawn", "sync", "race", "branch", "Self", "where",
    "continue",
];

pub const LOGICAL_OPERATORS: &[&str] = &["and", "or", "not"];

/// Lexical states. `Root` is the initial state and is never popped.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum State {
    Root,
    MultilineComment,
    UsingBlock,
    StringDouble,
    Interpolation,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::Root => "root",
            State::MultilineComment => "multiline-comment",
            State::UsingBlock => "using-block",
            State::StringDouble => "string-double",
            State::Interpolation => "interpolation",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The whole match is one token.
    Token(TokenKind),
    /// One token per capture group. Empty or non-participating groups
    /// emit nothing, and text after the last group is left unconsumed.
    ByGroups(&'static [TokenKind]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Push(State),
    /// Push the current state again, for nesting.
    PushSelf,
    Pop,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub regex: Regex,
    pub action: Action,
    pub transition: Transition,
    /// Pattern opens with `\b`: the character before the cursor must not
    /// be a word character. The regex itself only sees the remainder.
    pub word_start: bool,
}

impl Rule {
    /// Compiles `pattern` anchored at the start of the remainder with
    /// dot-matches-all on. Panics on an invalid pattern; every pattern is
    /// a constant of this module.
    pub fn new(pattern: &str, action: Action, transition: Transition) -> Rule {
        let regex = Regex::new(&format!(r"(?s)\A(?:{})", pattern))
            .unwrap_or_else(|err| panic!("invalid rule pattern {:?}: {}", pattern, err));

        Rule {
            regex,
            action,
            transition,
            word_start: pattern.starts_with(r"\b"),
        }
    }
}

/// A state's definition: rules, or the full rule list of another state.
enum Entry {
    Rule(Rule),
    Include(State),
}

/// Builds `\b(?:w1|w2|...)\b` over a closed word list.
pub fn words(list: &[&str]) -> String {
    let alternation = list
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<String>>()
        .join("|");

    format!(r"\b(?:{})\b", alternation)
}

fn root_entries() -> Vec<Entry> {
    let specifiers = SPECIFIERS.join("|");
    let data_structures = DATA_STRUCTURE_KEYWORDS.join("|");

    vec![
        Entry::Rule(MK_RULE!(r"\s+", TokenKind::Whitespace)),
        // Comments
        Entry::Rule(MK_RULE!(r"#[^\n]*", TokenKind::CommentSingle)),
        Entry::Rule(MK_RULE!(
            r"<#",
            TokenKind::CommentMultiline,
            Transition::Push(State::MultilineComment)
        )),
        // using { /Verse.org/Simulation }
        Entry::Rule(MK_RULE!(
            r"\b(using)(\s*)(\{)",
            bygroups(
                TokenKind::KeywordNamespace,
                TokenKind::Whitespace,
                TokenKind::Punctuation
            ),
            Transition::Push(State::UsingBlock)
        )),
        // <public>, <override>, <native_callable{...}>
        Entry::Rule(MK_RULE!(
            format!(r"<(?:{})(?:\{{[^}}]*\}})?>", specifiers),
            TokenKind::NameDecorator
        )),
        // class Foo
        Entry::Rule(MK_RULE!(
            format!(r"\b({})(\s+)([a-zA-Z_]\w*)", data_structures),
            bygroups(TokenKind::Keyword, TokenKind::Whitespace, TokenKind::NameClass)
        )),
        // Foo<public>( ... the `(` is lookahead
        Entry::Rule(MK_RULE!(
            r"\b([a-zA-Z_]\w*)(\s*)(<[^>]+>)?(\s*)\(",
            bygroups(
                TokenKind::NameFunction,
                TokenKind::Whitespace,
                TokenKind::NameDecorator,
                TokenKind::Whitespace
            )
        )),
        // Keywords
        Entry::Rule(MK_RULE!(words(BLOCK_KEYWORDS), TokenKind::Keyword)),
        Entry::Rule(MK_RULE!(words(DATA_STRUCTURE_KEYWORDS), TokenKind::Keyword)),
        Entry::Rule(MK_RULE!(words(DECL_KEYWORDS), TokenKind::KeywordDeclaration)),
        Entry::Rule(MK_RULE!(words(TYPE_KEYWORDS), TokenKind::KeywordType)),
        Entry::Rule(MK_RULE!(words(RESERVED_WORDS), TokenKind::KeywordReserved)),
        Entry::Rule(MK_RULE!(words(LOGICAL_OPERATORS), TokenKind::OperatorWord)),
        Entry::Rule(MK_RULE!(r"\b(?:true|false)\b", TokenKind::KeywordConstant)),
        // Numbers
        Entry::Rule(MK_RULE!(r"0b[01_]+", TokenKind::NumberBin)),
        Entry::Rule(MK_RULE!(r"0o[0-7_]+", TokenKind::NumberOct)),
        Entry::Rule(MK_RULE!(r"0x[0-9a-fA-F_]+", TokenKind::NumberHex)),
        Entry::Rule(MK_RULE!(r"[0-9]+\.[0-9]*(?:[eE][+-]?[0-9]+)?", TokenKind::NumberFloat)),
        Entry::Rule(MK_RULE!(r"\.[0-9]+(?:[eE][+-]?[0-9]+)?", TokenKind::NumberFloat)),
        Entry::Rule(MK_RULE!(r"[0-9]+[eE][+-]?[0-9]+", TokenKind::NumberFloat)),
        Entry::Rule(MK_RULE!(r"[0-9][0-9_]*", TokenKind::NumberInteger)),
        // Strings
        Entry::Rule(MK_RULE!(
            r#"""#,
            TokenKind::StringDouble,
            Transition::Push(State::StringDouble)
        )),
        Entry::Rule(MK_RULE!(r"'(?:\\\\|\\[^\\]|[^'\\])*'", TokenKind::StringSingle)),
        // Operators
        Entry::Rule(MK_RULE!(r":=", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"=>", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"->", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"\.\.", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"[+\-*/]?=", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"==|!=|<=|>=|<|>", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"[+\-*/%]", TokenKind::Operator)),
        Entry::Rule(MK_RULE!(r"[?:]", TokenKind::Operator)),
        // (super:) sits ahead of punctuation, which would take the `(`
        Entry::Rule(MK_RULE!(r"\([a-zA-Z_]\w*:\)", TokenKind::NameBuiltinPseudo)),
        Entry::Rule(MK_RULE!(r"[{}\[\](),;.]", TokenKind::Punctuation)),
        Entry::Rule(MK_RULE!(r"@[a-zA-Z_]\w*", TokenKind::NameDecorator)),
        // Identifiers, after everything identifier-shaped
        Entry::Rule(MK_RULE!(r"[a-zA-Z_]\w*", TokenKind::Name)),
    ]
}

fn multiline_comment_entries() -> Vec<Entry> {
    vec![
        Entry::Rule(MK_RULE!(r"<#", TokenKind::CommentMultiline, Transition::PushSelf)),
        Entry::Rule(MK_RULE!(r"#>", TokenKind::CommentMultiline, Transition::Pop)),
        Entry::Rule(MK_RULE!(r"[^<#]+", TokenKind::CommentMultiline)),
        Entry::Rule(MK_RULE!(r"[<#]", TokenKind::CommentMultiline)),
    ]
}

fn using_block_entries() -> Vec<Entry> {
    vec![
        Entry::Rule(MK_RULE!(r"\s+", TokenKind::Whitespace)),
        Entry::Rule(MK_RULE!(r"/", TokenKind::Punctuation)),
        Entry::Rule(MK_RULE!(r"[a-zA-Z_]\w*", TokenKind::NameNamespace)),
        Entry::Rule(MK_RULE!(r"\.", TokenKind::Punctuation)),
        Entry::Rule(MK_RULE!(r",", TokenKind::Punctuation)),
        Entry::Rule(MK_RULE!(r"\}", TokenKind::Punctuation, Transition::Pop)),
    ]
}

fn string_double_entries() -> Vec<Entry> {
    vec![
        // Block comments are allowed inside strings
        Entry::Rule(MK_RULE!(
            r"<#",
            TokenKind::CommentMultiline,
            Transition::Push(State::MultilineComment)
        )),
        Entry::Rule(MK_RULE!(
            r"\{",
            TokenKind::StringInterpol,
            Transition::Push(State::Interpolation)
        )),
        Entry::Rule(MK_RULE!(r#"[^"\\{<]+"#, TokenKind::StringDouble)),
        Entry::Rule(MK_RULE!(r#"""#, TokenKind::StringDouble, Transition::Pop)),
    ]
}

fn interpolation_entries() -> Vec<Entry> {
    vec![
        Entry::Rule(MK_RULE!(r"\}", TokenKind::StringInterpol, Transition::Pop)),
        Entry::Include(State::Root),
    ]
}

/// Immutable rule lists per state, with includes already resolved.
pub struct RuleTable {
    states: HashMap<State, Vec<Rule>>,
}

impl RuleTable {
    fn build() -> RuleTable {
        let mut definitions: HashMap<State, Vec<Entry>> = HashMap::new();
        definitions.insert(State::Root, root_entries());
        definitions.insert(State::MultilineComment, multiline_comment_entries());
        definitions.insert(State::UsingBlock, using_block_entries());
        definitions.insert(State::StringDouble, string_double_entries());
        definitions.insert(State::Interpolation, interpolation_entries());

        let states = definitions
            .keys()
            .map(|state| (*state, Self::resolve(&definitions, *state)))
            .collect();

        RuleTable { states }
    }

    fn resolve(definitions: &HashMap<State, Vec<Entry>>, state: State) -> Vec<Rule> {
        let mut rules = vec![];

        for entry in definitions.get(&state).into_iter().flatten() {
            match entry {
                Entry::Rule(rule) => rules.push(rule.clone()),
                Entry::Include(included) => rules.extend(Self::resolve(definitions, *included)),
            }
        }

        rules
    }

    pub fn rules(&self, state: State) -> &[Rule] {
        self.states.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }
}

lazy_static! {
    pub static ref RULES: RuleTable = RuleTable::build();
}
