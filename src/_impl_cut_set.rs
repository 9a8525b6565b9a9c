use crate::{CutSet, Expression, Literal, NEGATION_PREFIX};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};

impl Literal {
    /// Create a literal with the given `name` and polarity.
    pub fn new(name: &str, positive: bool) -> Literal {
        Literal {
            name: name.to_string(),
            positive,
        }
    }

    /// Create a positive literal (event `name` occurs).
    pub fn positive(name: &str) -> Literal {
        Self::new(name, true)
    }

    /// Create a negative literal (event `name` does not occur).
    pub fn negative(name: &str) -> Literal {
        Self::new(name, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    /// The same event with the opposite polarity.
    pub fn negate(&self) -> Literal {
        Literal::new(&self.name, !self.positive)
    }

    /// Convert the literal into an `Atom` or a negated `Atom` expression.
    pub fn to_expression(&self) -> Expression {
        if self.positive {
            Expression::atom(&self.name)
        } else {
            Expression::not_atom(&self.name)
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.positive {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}", NEGATION_PREFIX, self.name)
        }
    }
}

impl CutSet {
    /// Creates an empty cut set (the `true` conjunction).
    pub fn empty() -> CutSet {
        CutSet(BTreeMap::new())
    }

    /// Create a cut set consisting of a single literal.
    pub fn singleton(literal: Literal) -> CutSet {
        let mut map = BTreeMap::new();
        map.insert(literal.name, literal.positive);
        CutSet(map)
    }

    /// Build a cut set from a list of literals. Duplicate literals are merged.
    ///
    /// Returns `None` when the literals contain some event with both polarities, since such
    /// conjunction is unsatisfiable.
    pub fn from_literals<I: IntoIterator<Item = Literal>>(literals: I) -> Option<CutSet> {
        let mut result = Self::empty();
        for literal in literals {
            if !result.insert(literal) {
                return None;
            }
        }
        Some(result)
    }

    /// Add a literal to this cut set.
    ///
    /// Returns `false` (and leaves the cut set unchanged) if the opposite literal
    /// is already present.
    pub fn insert(&mut self, literal: Literal) -> bool {
        if let Some(value) = self.0.get(&literal.name) {
            return *value == literal.positive;
        }
        self.0.insert(literal.name, literal.positive);
        true
    }

    /// Polarity of the event `name` in this cut set, if present.
    pub fn get_value(&self, name: &str) -> Option<bool> {
        self.0.get(name).cloned()
    }

    /// Returns `true` if this cut set contains the given literal.
    pub fn contains(&self, literal: &Literal) -> bool {
        self.get_value(literal.name()) == Some(literal.is_positive())
    }

    /// Number of literals in this cut set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty (always satisfied) cut set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the literals of this cut set, sorted by event name.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.0
            .iter()
            .map(|(name, positive)| Literal::new(name, *positive))
    }

    /// Conjunction of two cut sets, or `None` if the conjunction contains a contradiction.
    pub fn merge(&self, other: &CutSet) -> Option<CutSet> {
        let (mut result, smaller) = if self.len() >= other.len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };
        for (name, positive) in smaller.0.iter() {
            if let Some(value) = result.0.get(name) {
                if value != positive {
                    return None;
                }
            } else {
                result.0.insert(name.clone(), *positive);
            }
        }
        Some(result)
    }

    /// True if every literal of this cut set also appears in `other`.
    pub fn is_subset_of(&self, other: &CutSet) -> bool {
        self.len() <= other.len()
            && self
                .0
                .iter()
                .all(|(name, positive)| other.0.get(name) == Some(positive))
    }

    /// Evaluate the conjunction for the truth assignment given by `valuation`.
    pub fn eval_in<F: Fn(&str) -> bool>(&self, valuation: &F) -> bool {
        self.0
            .iter()
            .all(|(name, positive)| valuation(name.as_str()) == *positive)
    }

    /// Convert to an `And` of literals (a single literal is returned as is,
    /// the empty cut set becomes an empty `And`, i.e. `true`).
    pub fn to_expression(&self) -> Expression {
        let mut literals: Vec<Expression> = self.literals().map(|l| l.to_expression()).collect();
        if literals.len() == 1 {
            literals.remove(0)
        } else {
            Expression::And(literals)
        }
    }
}

/// Cut sets are ordered by size first, so that sorting a list of cut sets puts potential
/// subsets before their supersets. Cut sets of equal size are ordered lexicographically.
impl Ord for CutSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.0.iter().cmp(other.0.iter()))
    }
}

impl PartialOrd for CutSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for CutSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.is_empty() {
            return write!(f, "TRUE");
        }
        for (i, literal) in self.literals().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}
