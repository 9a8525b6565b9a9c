use crate::expression_parser::is_name_char;
use crate::{PraError, ProbabilityTable, SymbolKind, SymbolTable, NEGATION_PREFIX};
use fxhash::FxHashMap;

impl SymbolTable {
    /// Create a new table without any symbols.
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbols: FxHashMap::default(),
        }
    }

    /// Create a table with all basic events of the `probabilities` table and the given
    /// top-event names.
    ///
    /// Fails with `PraError::MalformedInput` when a top event has the same name as a basic
    /// event or another top event.
    pub fn from_events<'a, I>(
        probabilities: &ProbabilityTable,
        top_events: I,
    ) -> Result<SymbolTable, PraError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = SymbolTable::new();
        for name in probabilities.event_names() {
            table.add_basic_event(name)?;
        }
        for name in top_events {
            table.add_top_event(name)?;
        }
        Ok(table)
    }

    /// Register a new basic event.
    pub fn add_basic_event(&mut self, name: &str) -> Result<(), PraError> {
        self.add_symbol(name, SymbolKind::BasicEvent)
    }

    /// Register a new top event.
    pub fn add_top_event(&mut self, name: &str) -> Result<(), PraError> {
        self.add_symbol(name, SymbolKind::TopEvent)
    }

    fn add_symbol(&mut self, name: &str, kind: SymbolKind) -> Result<(), PraError> {
        check_event_name(name)?;
        if let Some(existing) = self.symbols.get(name) {
            return Err(PraError::MalformedInput(format!(
                "Event `{}` is declared as {} and again as {}.",
                name,
                kind_name(*existing),
                kind_name(kind)
            )));
        }
        self.symbols.insert(name.to_string(), kind);
        Ok(())
    }

    /// Kind of the event with the given `name`, or `None` if there is no such event.
    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        self.symbols.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn kind_name(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::BasicEvent => "a basic event",
        SymbolKind::TopEvent => "a top event",
    }
}

/// **(internal)** Check that `name` can be used as an event name in logic strings.
///
/// The name must be a non-empty run of name characters and must not start with the
/// negation prefix (`NOT_X` would be read as the complement of `X`).
pub(crate) fn check_event_name(name: &str) -> Result<(), PraError> {
    if name.is_empty() {
        return Err(PraError::MalformedInput("Event name cannot be empty.".to_string()));
    }
    if !name.chars().all(is_name_char) {
        return Err(PraError::MalformedInput(format!(
            "Event name `{}` can only contain ASCII alphanumeric characters and underscores.",
            name
        )));
    }
    if name.starts_with(NEGATION_PREFIX) {
        return Err(PraError::MalformedInput(format!(
            "Event name `{}` cannot start with `{}`.",
            name, NEGATION_PREFIX
        )));
    }
    Ok(())
}
