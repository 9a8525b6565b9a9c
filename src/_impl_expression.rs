use crate::Expression::*;
use crate::{Expression, PraError, SymbolTable, NEGATION_PREFIX};
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl Expression {
    /// Create an `Atom` expression for the given event name.
    pub fn atom(name: &str) -> Expression {
        Atom(name.to_string())
    }

    /// Create a negated `Atom` expression (a `NOT_name` literal).
    pub fn not_atom(name: &str) -> Expression {
        Not(Box::new(Atom(name.to_string())))
    }

    /// Wrap this expression in a negation.
    pub fn negate(self) -> Expression {
        Not(Box::new(self))
    }

    /// Parse a logic string, checking that every referenced name is present in `symbols`.
    pub fn parse(data: &str, symbols: &SymbolTable) -> Result<Expression, PraError> {
        crate::parse_expression(data, symbols)
    }

    /// The set of event names that appear in this expression.
    pub fn support_set(&self) -> BTreeSet<String> {
        fn collect(expression: &Expression, result: &mut BTreeSet<String>) {
            match expression {
                Atom(name) => {
                    result.insert(name.clone());
                }
                Not(inner) => collect(inner, result),
                And(args) | Or(args) => {
                    for arg in args {
                        collect(arg, result);
                    }
                }
            }
        }
        let mut result = BTreeSet::new();
        collect(self, &mut result);
        result
    }

    /// Evaluate the expression for the truth assignment given by `valuation`.
    pub fn eval_in<F: Fn(&str) -> bool>(&self, valuation: &F) -> bool {
        match self {
            Atom(name) => valuation(name.as_str()),
            Not(inner) => !inner.eval_in(valuation),
            And(args) => args.iter().all(|arg| arg.eval_in(valuation)),
            Or(args) => args.iter().any(|arg| arg.eval_in(valuation)),
        }
    }

    /// Number of levels of the expression tree (an atom has depth one).
    pub fn depth(&self) -> usize {
        match self {
            Atom(_) => 1,
            Not(inner) => inner.depth() + 1,
            And(args) | Or(args) => args.iter().map(|arg| arg.depth()).max().unwrap_or(0) + 1,
        }
    }

    /// True if this expression is an atom or a negated atom.
    pub fn is_literal(&self) -> bool {
        match self {
            Atom(_) => true,
            Not(inner) => matches!(**inner, Atom(_)),
            _ => false,
        }
    }
}

impl TryFrom<&str> for Expression {
    type Error = PraError;

    /// Parse a logic string without checking the names against any symbol table.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        crate::parse_expression_syntax(value)
    }
}

/// Renders the expression in the input notation. Conjunctions nested in a disjunction need
/// no parentheses, disjunctions nested in a conjunction (or a negation) are parenthesized.
/// A negated compound expression is written as `NOT_(...)`, which is unambiguous but cannot
/// be parsed back.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Atom(name) => write!(f, "{}", name),
            Not(inner) => match &**inner {
                Atom(name) => write!(f, "{}{}", NEGATION_PREFIX, name),
                _ => write!(f, "{}({})", NEGATION_PREFIX, inner),
            },
            And(args) if args.is_empty() => write!(f, "TRUE"),
            Or(args) if args.is_empty() => write!(f, "FALSE"),
            And(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    match arg {
                        Or(inner) if !inner.is_empty() => write!(f, "({})", arg)?,
                        _ => write!(f, "{}", arg)?,
                    }
                }
                Ok(())
            }
            Or(args) => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                Ok(())
            }
        }
    }
}
