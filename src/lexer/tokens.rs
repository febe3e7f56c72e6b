use std::fmt::Display;

use crate::Span;

/// Token kinds, flattened from the highlighting taxonomy.
///
/// Every kind has a parent up to one of the top-level categories, see
/// [`TokenKind::parent`]. `Display` renders the dotted path, e.g.
/// `Literal.Number.Hex`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Text,
    Whitespace,

    Comment,
    CommentSingle,
    CommentMultiline,

    Keyword,
    KeywordConstant,
    KeywordDeclaration,
    KeywordNamespace,
    KeywordReserved,
    KeywordType,

    Name,
    NameBuiltin,
    NameBuiltinPseudo,
    NameClass,
    NameDecorator,
    NameFunction,
    NameNamespace,

    Literal,
    String,
    StringDouble,
    StringSingle,
    StringInterpol,
    Number,
    NumberBin,
    NumberOct,
    NumberHex,
    NumberFloat,
    NumberInteger,

    Operator,
    OperatorWord,

    Punctuation,
}

impl TokenKind {
    pub fn parent(self) -> Option<TokenKind> {
        use TokenKind::*;

        match self {
            Text | Comment | Keyword | Name | Literal | Operator | Punctuation => None,
            Whitespace => Some(Text),
            CommentSingle | CommentMultiline => Some(Comment),
            KeywordConstant | KeywordDeclaration | KeywordNamespace | KeywordReserved
            | KeywordType => Some(Keyword),
            NameBuiltin | NameClass | NameDecorator | NameFunction | NameNamespace => Some(Name),
            NameBuiltinPseudo => Some(NameBuiltin),
            String | Number => Some(Literal),
            StringDouble | StringSingle | StringInterpol => Some(String),
            NumberBin | NumberOct | NumberHex | NumberFloat | NumberInteger => Some(Number),
            OperatorWord => Some(Operator),
        }
    }

    /// True if `self` is `ancestor` or one of its descendants.
    pub fn is_a(self, ancestor: TokenKind) -> bool {
        let mut current = Some(self);

        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }

        false
    }

    /// Last component of the dotted path.
    pub fn leaf_name(self) -> &'static str {
        use TokenKind::*;

        match self {
            Text => "Text",
            Whitespace => "Whitespace",
            Comment => "Comment",
            CommentSingle => "Single",
            CommentMultiline => "Multiline",
            Keyword => "Keyword",
            KeywordConstant => "Constant",
            KeywordDeclaration => "Declaration",
            KeywordNamespace => "Namespace",
            KeywordReserved => "Reserved",
            KeywordType => "Type",
            Name => "Name",
            NameBuiltin => "Builtin",
            NameBuiltinPseudo => "Pseudo",
            NameClass => "Class",
            NameDecorator => "Decorator",
            NameFunction => "Function",
            NameNamespace => "Namespace",
            Literal => "Literal",
            String => "String",
            StringDouble => "Double",
            StringSingle => "Single",
            StringInterpol => "Interpol",
            Number => "Number",
            NumberBin => "Bin",
            NumberOct => "Oct",
            NumberHex => "Hex",
            NumberFloat => "Float",
            NumberInteger => "Integer",
            Operator => "Operator",
            OperatorWord => "Word",
            Punctuation => "Punctuation",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(parent) = self.parent() {
            write!(f, "{}.", parent)?;
        }
        write!(f, "{}", self.leaf_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Merges runs of adjacent tokens that share a kind, the way a formatter
/// does before rendering. `"<# a <# b #> #>"` becomes one comment token.
pub fn coalesce(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match merged.last_mut() {
            Some(last) if last.kind == token.kind && last.span.end == token.span.start => {
                last.value.push_str(&token.value);
                last.span.end = token.span.end;
            }
            _ => merged.push(token),
        }
    }

    merged
}
