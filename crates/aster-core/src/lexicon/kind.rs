//! Semantic token kinds — the closed set of constructs every locale spells
//!
//! Each kind has a stable SCREAMING_SNAKE_CASE name used as the key of the
//! `keywords` object in locale-pack documents.

use std::fmt;

macro_rules! semantic_token_kinds {
    ($($variant:ident => $name:literal,)+) => {
        /// Canonical language construct a lexicon must provide a spelling for
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum SemanticTokenKind {
            $($variant,)+
        }

        impl SemanticTokenKind {
            /// Every kind, in declaration order
            pub const ALL: &'static [SemanticTokenKind] = &[$(SemanticTokenKind::$variant,)+];

            /// Number of kinds
            pub const COUNT: usize = Self::ALL.len();

            /// Stable document name (`MODULE_DECL`, `RETURN`, ...)
            pub fn name(self) -> &'static str {
                match self {
                    $(SemanticTokenKind::$variant => $name,)+
                }
            }

            /// Look up a kind by its document name (case-sensitive)
            pub fn from_name(name: &str) -> Option<SemanticTokenKind> {
                match name {
                    $($name => Some(SemanticTokenKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

semantic_token_kinds! {
    // Declarations
    ModuleDecl => "MODULE_DECL",
    Import => "IMPORT",
    As => "AS",
    Define => "DEFINE",
    With => "WITH",
    Has => "HAS",
    AsOneOf => "AS_ONE_OF",
    FuncDecl => "FUNC_DECL",
    Given => "GIVEN",
    Produce => "PRODUCE",

    // Control flow
    If => "IF",
    Otherwise => "OTHERWISE",
    Match => "MATCH",
    When => "WHEN",
    ForEach => "FOR_EACH",
    In => "IN",
    Return => "RETURN",
    WaitFor => "WAIT_FOR",

    // Bindings
    Let => "LET",
    Be => "BE",
    Set => "SET",
    To => "TO",

    // Literals
    True => "TRUE",
    False => "FALSE",
    Null => "NULL",

    // Connectives
    And => "AND",
    Or => "OR",
    Not => "NOT",
    Is => "IS",

    // Comparison
    GreaterThan => "GREATER_THAN",
    LessThan => "LESS_THAN",
    GreaterEqual => "GREATER_EQUAL",
    LessEqual => "LESS_EQUAL",
    Equals => "EQUALS",
    NotEquals => "NOT_EQUALS",

    // Arithmetic
    Plus => "PLUS",
    Minus => "MINUS",
    Times => "TIMES",
    DividedBy => "DIVIDED_BY",
}

impl SemanticTokenKind {
    /// Position of this kind inside [`SemanticTokenKind::ALL`]
    pub fn index(self) -> usize {
        // Declaration order and ALL order are the same by construction.
        self as usize
    }
}

impl fmt::Display for SemanticTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (i, kind) in SemanticTokenKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "{} is out of order", kind);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for &kind in SemanticTokenKind::ALL {
            assert_eq!(SemanticTokenKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = SemanticTokenKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), SemanticTokenKind::COUNT);
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(
            SemanticTokenKind::from_name("RETURN"),
            Some(SemanticTokenKind::Return)
        );
        assert_eq!(SemanticTokenKind::from_name("return"), None);
        assert_eq!(SemanticTokenKind::from_name("GOTO"), None);
    }
}
