use crate::Expression::*;
use crate::{
    parse_expression, Expression, PraError, SymbolTable, TopEventTable, MAX_EXPRESSION_DEPTH,
};
use fxhash::FxHashMap;
use tracing::debug;

impl TopEventTable {
    /// Create an empty table.
    pub fn new() -> TopEventTable {
        TopEventTable {
            definitions: FxHashMap::default(),
            resolved: FxHashMap::default(),
        }
    }

    /// Parse `(name, logic)` definitions of top events against `symbols`.
    ///
    /// The top events themselves must already be declared in `symbols`, since definitions
    /// can reference each other.
    pub fn parse<'a, I>(definitions: I, symbols: &SymbolTable) -> Result<TopEventTable, PraError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = TopEventTable::new();
        for (name, logic) in definitions {
            table.insert(name, parse_expression(logic, symbols)?)?;
        }
        Ok(table)
    }

    /// Add a parsed top-event definition.
    ///
    /// Fails with `PraError::MalformedInput` if the top event is already defined.
    pub fn insert(&mut self, name: &str, definition: Expression) -> Result<(), PraError> {
        if self.definitions.contains_key(name) {
            return Err(PraError::MalformedInput(format!(
                "Top event `{}` is defined more than once.",
                name
            )));
        }
        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// The definition of a top event, as it was parsed.
    pub fn definition(&self, name: &str) -> Option<&Expression> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Substitute all top events in `expression` by their resolved definitions.
    ///
    /// The result only references basic events. Fails with `PraError::CyclicDefinition`
    /// if some of the involved top events (transitively) depend on themselves, and with
    /// `PraError::ResourceExhaustion` if the substitution is nested deeper than
    /// `MAX_EXPRESSION_DEPTH` levels.
    pub fn resolve(&mut self, expression: &Expression) -> Result<Expression, PraError> {
        let mut stack = Vec::new();
        self.resolve_expression(expression, &mut stack, 1)
    }

    /// The resolved definition of the top event `name`.
    pub fn resolved(&mut self, name: &str) -> Result<Expression, PraError> {
        let mut stack = Vec::new();
        self.resolve_top_event(name, &mut stack, 1)
    }

    /// Resolve every top event in the table, so that all cycles are detected up front and
    /// later calls to `resolve` only read the cache.
    pub fn resolve_all(&mut self) -> Result<(), PraError> {
        let mut names: Vec<String> = self.definitions.keys().cloned().collect();
        names.sort();
        for name in names {
            self.resolved(&name)?;
        }
        Ok(())
    }

    /// **(internal)** Depth-first substitution. The `stack` contains the top events which
    /// are currently being resolved. The `depth` counts the enclosing expression levels and
    /// substitutions, including `expression` itself.
    fn resolve_expression(
        &mut self,
        expression: &Expression,
        stack: &mut Vec<String>,
        depth: usize,
    ) -> Result<Expression, PraError> {
        check_depth(depth)?;
        match expression {
            Atom(name) if self.definitions.contains_key(name) => {
                let resolved = self.resolve_top_event(name, stack, depth)?;
                // A cached definition can be deeper than the path which computed it.
                check_depth(depth - 1 + resolved.depth())?;
                Ok(resolved)
            }
            Atom(_) => Ok(expression.clone()),
            Not(inner) => Ok(self.resolve_expression(inner, stack, depth + 1)?.negate()),
            And(args) => Ok(And(self.resolve_all_args(args, stack, depth + 1)?)),
            Or(args) => Ok(Or(self.resolve_all_args(args, stack, depth + 1)?)),
        }
    }

    fn resolve_all_args(
        &mut self,
        args: &[Expression],
        stack: &mut Vec<String>,
        depth: usize,
    ) -> Result<Vec<Expression>, PraError> {
        let mut result = Vec::with_capacity(args.len());
        for arg in args {
            result.push(self.resolve_expression(arg, stack, depth)?);
        }
        Ok(result)
    }

    fn resolve_top_event(
        &mut self,
        name: &str,
        stack: &mut Vec<String>,
        depth: usize,
    ) -> Result<Expression, PraError> {
        if let Some(resolved) = self.resolved.get(name) {
            return Ok(resolved.clone());
        }
        if let Some(start) = stack.iter().position(|n| n == name) {
            let mut cycle = stack[start..].to_vec();
            cycle.push(name.to_string());
            return Err(PraError::CyclicDefinition(cycle));
        }
        let definition = self
            .definitions
            .get(name)
            .cloned()
            .ok_or_else(|| PraError::UnknownSymbol(name.to_string()))?;

        stack.push(name.to_string());
        let resolved = self.resolve_expression(&definition, stack, depth + 1);
        stack.pop();
        let resolved = resolved?;

        debug!(top_event = name, resolved = %resolved, "Resolved top event");
        self.resolved.insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }
}

fn check_depth(depth: usize) -> Result<(), PraError> {
    if depth > MAX_EXPRESSION_DEPTH {
        Err(PraError::ResourceExhaustion {
            what: "levels of nesting in resolved top events",
            limit: MAX_EXPRESSION_DEPTH,
        })
    } else {
        Ok(())
    }
}
