use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;
use thiserror::Error;

/// `lhs -> left right`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinaryRule {
    pub lhs: String,
    pub left: String,
    pub right: String,
}

/// `lhs -> child`, a single nonterminal standing in for a phrase category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitRule {
    pub lhs: String,
    pub child: String,
}

impl std::fmt::Display for BinaryRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} {}", self.lhs, self.left, self.right)
    }
}

impl std::fmt::Display for UnitRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.child)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("nonterminal `{symbol}` is used by `{referenced_by}` but never defined")]
    UndefinedNonTerminal { symbol: String, referenced_by: String },
    #[error("start symbol `{0}` has no rules")]
    UndefinedStart(String),
    #[error("nonterminal `{0}` has an empty terminal")]
    EmptyTerminal(String),
    #[error("`{lhs} -> {rhs}` is not in Chomsky normal form")]
    NotCnf { lhs: String, rhs: String },
    #[error("start symbol declared twice (second: `{0}`)")]
    DuplicateStart(String),
}

/// Lowercases a terminal and collapses inner whitespace, the same shape the
/// tokenizer gives its tokens.
pub fn normalize_terminal(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An immutable CNF grammar (plus unit rules), validated on construction.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    lexical: BTreeMap<String, BTreeSet<String>>,
    binary: Vec<BinaryRule>,
    unit: Vec<UnitRule>,
    by_terminal: HashMap<String, BTreeSet<String>>,
    unit_ancestors: HashMap<String, BTreeSet<String>>,
    phrases: Vec<String>,
}

impl Grammar {
    pub fn builder(start: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder::new(start)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn lexical_rules(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.lexical
    }

    pub fn binary_rules(&self) -> &[BinaryRule] {
        &self.binary
    }

    pub fn unit_rules(&self) -> &[UnitRule] {
        &self.unit
    }

    /// Every nonterminal that appears on a left-hand side.
    pub fn nonterminals(&self) -> BTreeSet<&str> {
        self.lexical
            .keys()
            .map(String::as_str)
            .chain(self.binary.iter().map(|r| r.lhs.as_str()))
            .chain(self.unit.iter().map(|r| r.lhs.as_str()))
            .collect()
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.lexical.contains_key(symbol)
            || self.binary.iter().any(|r| r.lhs == symbol)
            || self.unit.iter().any(|r| r.lhs == symbol)
    }

    /// Nonterminals with a lexical rule producing `terminal` (already normalized).
    pub fn categories_of<'a>(&'a self, terminal: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.by_terminal
            .get(terminal)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// All `A` such that `A =>+ symbol` through unit rules alone.
    pub fn unit_ancestors<'a>(&'a self, symbol: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.unit_ancestors
            .get(symbol)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Multi-word terminals, longest first.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Same rules, different start symbol.
    pub fn with_start(mut self, start: &str) -> Result<Self, GrammarError> {
        if !self.is_defined(start) {
            return Err(GrammarError::UndefinedStart(start.to_string()));
        }
        self.start = start.to_string();
        Ok(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    start: String,
    lexical: BTreeMap<String, BTreeSet<String>>,
    binary: Vec<BinaryRule>,
    unit: Vec<UnitRule>,
}

impl GrammarBuilder {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            ..Default::default()
        }
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    pub fn lexical(mut self, lhs: impl Into<String>, terminal: &str) -> Self {
        self.add_lexical(lhs, terminal);
        self
    }

    pub fn binary(
        mut self,
        lhs: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.add_binary(lhs, left, right);
        self
    }

    pub fn unit(mut self, lhs: impl Into<String>, child: impl Into<String>) -> Self {
        self.add_unit(lhs, child);
        self
    }

    pub fn add_lexical(&mut self, lhs: impl Into<String>, terminal: &str) {
        self.lexical
            .entry(lhs.into())
            .or_default()
            .insert(normalize_terminal(terminal));
    }

    pub fn add_binary(
        &mut self,
        lhs: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) {
        let rule = BinaryRule {
            lhs: lhs.into(),
            left: left.into(),
            right: right.into(),
        };
        if !self.binary.contains(&rule) {
            self.binary.push(rule);
        }
    }

    pub fn add_unit(&mut self, lhs: impl Into<String>, child: impl Into<String>) {
        let rule = UnitRule {
            lhs: lhs.into(),
            child: child.into(),
        };
        if !self.unit.contains(&rule) {
            self.unit.push(rule);
        }
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let GrammarBuilder {
            start,
            lexical,
            binary,
            unit,
        } = self;

        for (lhs, terminals) in &lexical {
            if terminals.iter().any(String::is_empty) {
                return Err(GrammarError::EmptyTerminal(lhs.clone()));
            }
        }

        let defined: BTreeSet<&str> = lexical
            .keys()
            .map(String::as_str)
            .chain(binary.iter().map(|r| r.lhs.as_str()))
            .chain(unit.iter().map(|r| r.lhs.as_str()))
            .collect();

        let references = binary
            .iter()
            .flat_map(|r| [(&r.left, r.to_string()), (&r.right, r.to_string())])
            .chain(unit.iter().map(|r| (&r.child, r.to_string())));
        for (symbol, rule) in references {
            if !defined.contains(symbol.as_str()) {
                return Err(GrammarError::UndefinedNonTerminal {
                    symbol: symbol.clone(),
                    referenced_by: rule,
                });
            }
        }

        if !defined.contains(start.as_str()) {
            return Err(GrammarError::UndefinedStart(start));
        }

        let mut by_terminal: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (lhs, terminals) in &lexical {
            for t in terminals {
                by_terminal.entry(t.clone()).or_default().insert(lhs.clone());
            }
        }

        let unit_ancestors = unit_ancestors(&unit);

        let mut phrases: Vec<String> = by_terminal
            .keys()
            .filter(|t| t.contains(' '))
            .cloned()
            .collect();
        phrases.sort_by(|a, b| {
            let words = |s: &str| s.split(' ').count();
            words(b)
                .cmp(&words(a))
                .then(b.chars().count().cmp(&a.chars().count()))
                .then(a.cmp(b))
        });

        debug!(
            "grammar built: start={}, {} lexical categories, {} terminals, {} binary rules, {} unit rules, {} phrases",
            start,
            lexical.len(),
            by_terminal.len(),
            binary.len(),
            unit.len(),
            phrases.len()
        );

        Ok(Grammar {
            start,
            lexical,
            binary,
            unit,
            by_terminal,
            unit_ancestors,
            phrases,
        })
    }
}

/// Transitive closure of the unit rules, keyed by child: for each `B`, every
/// `A` with `A -> ... -> B`. Cycles are fine, the walk stops at seen symbols.
fn unit_ancestors(unit: &[UnitRule]) -> HashMap<String, BTreeSet<String>> {
    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    for r in unit {
        parents.entry(r.child.as_str()).or_default().push(r.lhs.as_str());
    }

    let mut closure = HashMap::new();
    for &child in parents.keys() {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut stack = vec![child];
        while let Some(sym) = stack.pop() {
            for &p in parents.get(sym).into_iter().flatten() {
                if seen.insert(p.to_string()) {
                    stack.push(p);
                }
            }
        }
        seen.remove(child);
        closure.insert(child.to_string(), seen);
    }
    closure
}
