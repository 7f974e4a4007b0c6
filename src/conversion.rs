use crate::{
    grammar::{Grammar, GrammarBuilder, GrammarError},
    grammar_parser::{Statement, Symbol},
};

fn render_alternative(alt: &[Symbol<'_>]) -> String {
    alt.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Adds one alternative to the builder according to its shape: one terminal,
/// one nonterminal, or two nonterminals.
fn add_alternative(
    builder: &mut GrammarBuilder,
    lhs: &str,
    alt: &[Symbol<'_>],
) -> Result<(), GrammarError> {
    match alt {
        [Symbol::Terminal(t)] => builder.add_lexical(lhs, t.text),
        [Symbol::NonTerminal(child)] => builder.add_unit(lhs, child.text),
        [Symbol::NonTerminal(left), Symbol::NonTerminal(right)] => {
            builder.add_binary(lhs, left.text, right.text)
        }
        _ => {
            return Err(GrammarError::NotCnf {
                lhs: lhs.to_string(),
                rhs: render_alternative(alt),
            })
        }
    }
    Ok(())
}

/// The declared start symbol, else the left side of the first rule.
fn start_symbol<'gr>(statements: &[Statement<'gr>]) -> Result<Option<&'gr str>, GrammarError> {
    let mut declared = None;
    for statement in statements {
        if let Statement::Start(sym) = statement {
            if declared.is_some() {
                return Err(GrammarError::DuplicateStart(sym.text.to_string()));
            }
            declared = Some(sym.text);
        }
    }
    Ok(declared.or_else(|| {
        statements.iter().find_map(|s| match s {
            Statement::Rule(rule) => Some(rule.lhs.text),
            Statement::Start(_) => None,
        })
    }))
}

impl<'gr> TryFrom<&[Statement<'gr>]> for Grammar {
    type Error = GrammarError;

    fn try_from(statements: &[Statement<'gr>]) -> Result<Self, Self::Error> {
        let start = start_symbol(statements)?.unwrap_or_default();
        let mut builder = GrammarBuilder::new(start);
        for statement in statements {
            if let Statement::Rule(rule) = statement {
                for alt in &rule.alternatives {
                    add_alternative(&mut builder, rule.lhs.text, alt)?;
                }
            }
        }
        builder.build()
    }
}

impl<'gr> TryFrom<&Vec<Statement<'gr>>> for Grammar {
    type Error = GrammarError;

    fn try_from(statements: &Vec<Statement<'gr>>) -> Result<Self, Self::Error> {
        statements.as_slice().try_into()
    }
}
