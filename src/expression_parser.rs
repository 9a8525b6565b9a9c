//! Parsing of the logic notation used for top events and scenarios.
//!
//! The notation has only three operators: `+` (disjunction), `*` (conjunction) and the
//! `NOT_` prefix (complement of a single event, e.g. `NOT_HPI`). Parentheses override the
//! default priority, which is `NOT_` > `*` > `+`. Event names are maximal runs of
//! alphanumeric characters and underscores, whitespace is ignored.
//!
//! Parsing proceeds in two steps. First, the input is split into a token tree defined by
//! parenthesis groups. Then each group is split at every `+` token, and every resulting
//! segment is split at every `*` token. What remains must be a single literal or a single
//! nested group, which is parsed recursively.

use crate::Expression::*;
use crate::{Expression, PraError, SymbolTable, NEGATION_PREFIX};
use std::iter::Peekable;
use std::str::Chars;

/// **(internal)** Tokens that can appear in a logic string.
/// The tokens form a token tree defined by parenthesis groups.
#[derive(Debug, Eq, PartialEq)]
enum ExprToken {
    And,                    // '*'
    Or,                     // '+'
    Literal(String, bool),  // 'EVENT' or 'NOT_EVENT'
    Tokens(Vec<ExprToken>), // A block of tokens inside parentheses
}

/// Parse a logic string into an `Expression`, checking that every event name is declared
/// in the given `SymbolTable`.
///
/// Fails with `PraError::MalformedExpression` when the string is not syntactically valid and
/// with `PraError::UnknownSymbol` when it references an undeclared event.
pub fn parse_expression(from: &str, symbols: &SymbolTable) -> Result<Expression, PraError> {
    parse(from, Some(symbols))
}

/// Parse a logic string into an `Expression` without validating event names.
pub fn parse_expression_syntax(from: &str) -> Result<Expression, PraError> {
    parse(from, None)
}

/// **(internal)** Shared entry point of the two public parsing functions.
fn parse(from: &str, symbols: Option<&SymbolTable>) -> Result<Expression, PraError> {
    let tokens = tokenize_group(&mut from.chars().peekable(), 0)
        .map_err(|message| PraError::malformed_expression(from, message))?;
    let parser = ExprParser {
        input: from,
        symbols,
    };
    parser.or(&tokens)
}

/// Maximal nesting depth of parenthesis groups in a logic string.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Returns `true` if `c` can appear in an event name (ASCII alphanumeric or `_`).
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// **(internal)** Process a peekable iterator of characters into a vector of `ExprToken`s.
///
/// The outer method always consumes the opening parenthesis and the recursive call consumes the
/// closing parenthesis. The `depth` is the number of enclosing groups, so at depth zero there
/// is no closing parenthesis. Groups nested deeper than `MAX_NESTING_DEPTH` are rejected.
fn tokenize_group(data: &mut Peekable<Chars>, depth: usize) -> Result<Vec<ExprToken>, String> {
    let top_level = depth == 0;
    let mut output = Vec::new();
    while let Some(c) = data.next() {
        match c {
            c if c.is_whitespace() => { /* skip whitespace */ }
            '*' => output.push(ExprToken::And),
            '+' => output.push(ExprToken::Or),
            ')' => {
                return if !top_level {
                    Ok(output)
                } else {
                    Err("Unexpected ')'.".to_string())
                };
            }
            '(' => {
                if depth >= MAX_NESTING_DEPTH {
                    return Err(format!(
                        "Parentheses are nested deeper than {} levels.",
                        MAX_NESTING_DEPTH
                    ));
                }
                // start a nested token group
                let tokens = tokenize_group(data, depth + 1)?;
                output.push(ExprToken::Tokens(tokens));
            }
            c if is_name_char(c) => {
                let mut name = String::new();
                name.push(c);
                while let Some(c) = data.peek() {
                    if is_name_char(*c) {
                        name.push(*c);
                        data.next(); // advance iterator
                    } else {
                        break;
                    }
                }
                output.push(literal_token(name)?);
            }
            _ => return Err(format!("Unexpected character '{}'.", c)),
        }
    }
    if top_level {
        Ok(output)
    } else {
        Err("Expected ')'.".to_string())
    }
}

/// **(internal)** Turn a name into a literal token, stripping the negation prefix.
fn literal_token(name: String) -> Result<ExprToken, String> {
    if let Some(event) = name.strip_prefix(NEGATION_PREFIX) {
        if event.is_empty() {
            Err(format!("Expected event name after '{}'.", NEGATION_PREFIX))
        } else {
            Ok(ExprToken::Literal(event.to_string(), false))
        }
    } else {
        Ok(ExprToken::Literal(name, true))
    }
}

/// **(internal)** Parses a token tree, remembering the original input for error reporting.
struct ExprParser<'a> {
    input: &'a str,
    symbols: Option<&'a SymbolTable>,
}

impl ExprParser<'_> {
    fn malformed(&self, message: String) -> PraError {
        PraError::malformed_expression(self.input, message)
    }

    /// **(internal)** Recursive parsing step 1: split at `+` operators.
    fn or(&self, data: &[ExprToken]) -> Result<Expression, PraError> {
        let mut args = data
            .split(|token| *token == ExprToken::Or)
            .map(|segment| self.and(segment))
            .collect::<Result<Vec<_>, _>>()?;
        if args.len() == 1 {
            Ok(args.remove(0))
        } else {
            Ok(Or(args))
        }
    }

    /// **(internal)** Recursive parsing step 2: split at `*` operators.
    fn and(&self, data: &[ExprToken]) -> Result<Expression, PraError> {
        let mut args = data
            .split(|token| *token == ExprToken::And)
            .map(|segment| self.terminal(segment))
            .collect::<Result<Vec<_>, _>>()?;
        if args.len() == 1 {
            Ok(args.remove(0))
        } else {
            Ok(And(args))
        }
    }

    /// **(internal)** Recursive parsing step 3: extract literals and parenthesis groups.
    fn terminal(&self, data: &[ExprToken]) -> Result<Expression, PraError> {
        if data.is_empty() {
            Err(self.malformed("Expected event or (...), found nothing.".to_string()))
        } else if data.len() > 1 {
            Err(self.malformed(format!(
                "Expected a single event or (...), but found {:?}.",
                data
            )))
        } else {
            match &data[0] {
                ExprToken::Literal(name, positive) => {
                    if let Some(symbols) = self.symbols {
                        if !symbols.contains(name) {
                            return Err(PraError::UnknownSymbol(name.clone()));
                        }
                    }
                    let atom = Atom(name.clone());
                    if *positive {
                        Ok(atom)
                    } else {
                        Ok(atom.negate())
                    }
                }
                ExprToken::Tokens(inner) => self.or(inner),
                _ => unreachable!(
                    "Operators are matched by the splitting steps, nothing else should remain."
                ),
            }
        }
    }
}
