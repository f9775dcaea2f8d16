use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::iat::{ArgumentationSystem, IncompleteArgumentationTheory, Language};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumString};

lazy_static! {
    static ref FACT_PATTERN: Regex =
        Regex::new(r"^([_[:lower:]][_[:alnum:]]*)\(([^()]*)\)\.$").unwrap();
    static ref NAME_PATTERN: Regex = Regex::new(r"^[^(),[:space:]]+$").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
enum Predicate {
    Literal,
    Queryable,
    Axiom,
    Neg,
    Body,
    Head,
    Preferred,
}

impl Predicate {
    fn arity(&self) -> usize {
        match self {
            Predicate::Literal | Predicate::Queryable | Predicate::Axiom => 1,
            Predicate::Neg | Predicate::Body | Predicate::Head | Predicate::Preferred => 2,
        }
    }
}

struct Fact {
    line_index: usize,
    predicate: Predicate,
    args: Vec<String>,
}

fn read_name(s: &str) -> Result<WarningResult<String, String>> {
    let trimmed = s.trim();
    if !NAME_PATTERN.is_match(trimmed) {
        return Err(anyhow!("invalid name \"{}\"", s));
    }
    if trimmed.len() == s.len() {
        Ok(WarningResult::Ok(trimmed.to_string()))
    } else {
        Ok(WarningResult::Warned(
            trimmed.to_string(),
            vec!["names beginning or ending by spaces may be ambiguous".to_string()],
        ))
    }
}

fn try_read_fact(line_index: usize, l: &str) -> Result<WarningResult<Option<Fact>, String>> {
    let captures = FACT_PATTERN
        .captures(l)
        .ok_or_else(|| anyhow!("syntax error in line \"{}\"", l))?;
    let predicate = match Predicate::from_str(&captures[1]) {
        Ok(p) => p,
        Err(_) => {
            return Ok(WarningResult::Warned(
                None,
                vec![format!("unknown predicate \"{}\" ignored", &captures[1])],
            ))
        }
    };
    let args = captures[2]
        .split(',')
        .map(read_name)
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .collect::<WarningResult<Vec<String>, String>>();
    let n_args = match &args {
        WarningResult::Ok(v) | WarningResult::Warned(v, _) => v.len(),
    };
    if n_args != predicate.arity() {
        return Err(anyhow!(
            "predicate \"{}\" expects {} argument(s), got {}",
            predicate.as_ref(),
            predicate.arity(),
            n_args
        ));
    }
    Ok(args.map(|args| {
        Some(Fact {
            line_index,
            predicate,
            args,
        })
    }))
}

fn line_context(line_index: usize) -> String {
    format!("while reading line with index {}", line_index)
}

/// A reader for the line-based theory format.
///
/// This object is used to read an [`IncompleteArgumentationTheory`] encoded as a set of ASP facts, one per line.
/// The [LabelType](crate::utils::LabelType) of the returned theories is [String].
///
/// # Theory format
///
/// The following content defines a theory with four literals, in which `similar_url` and `not_similar_url`
/// are queryable and contradictory. `similar_url` is an axiom.
/// Rule `r1` concludes `typosquatting` from `similar_url`.
///
/// ```text
/// literal(similar_url).
/// literal(not_similar_url).
/// literal(typosquatting).
/// literal(not_typosquatting).
/// queryable(similar_url).
/// queryable(not_similar_url).
/// axiom(similar_url).
/// neg(similar_url,not_similar_url).
/// neg(not_similar_url,similar_url).
/// neg(typosquatting,not_typosquatting).
/// neg(not_typosquatting,typosquatting).
/// body(r1,similar_url).
/// head(r1,typosquatting).
/// ```
///
/// `neg(a,b)` sets `b` as a contrary of `a`; contradictories are given by two `neg` facts.
/// Rule preferences are given by `preferred(r1,r2)` facts.
///
/// Facts may be given in any order. Empty lines and comments (introduced by `%`) are ignored.
/// Names may contain any character except parentheses, commas, whitespaces and `%`.
/// A rule exists if it has a `head` fact; rules are ordered by the position of their `head` fact.
/// Facts with an unknown predicate are ignored, and raise a warning.
///
/// # Example
///
/// ```
/// # use crustiat::iat::IncompleteArgumentationTheory;
/// # use crustiat::io::{InstanceReader, LpReader};
/// fn read_theory_from_str(s: &str) -> IncompleteArgumentationTheory<String> {
///     let reader = LpReader::default();
///     reader.read(&mut s.as_bytes()).expect("invalid theory")
/// }
/// # read_theory_from_str("literal(a).");
/// ```
#[derive(Default)]
pub struct LpReader {
    warning_handlers: Vec<WarningHandler>,
}

impl LpReader {
    fn warn(&self, line_index: usize, warnings: Vec<String>) {
        for w in warnings.iter() {
            self.warning_handlers
                .iter()
                .for_each(|h| (h)(1 + line_index, w.to_string()));
        }
    }

    fn read_facts(&self, reader: &mut dyn Read) -> Result<Vec<Fact>> {
        let mut facts = vec![];
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let l = line.with_context(|| line_context(i))?;
            let l = match l.find('%') {
                Some(p) => &l[..p],
                None => l.as_str(),
            }
            .trim();
            if l.is_empty() {
                continue;
            }
            let fact = try_read_fact(i, l)
                .with_context(|| line_context(i))?
                .consume_warnings(|w| self.warn(i, w));
            if let Some(f) = fact {
                facts.push(f);
            }
        }
        Ok(facts)
    }

    fn read_language(&self, facts: &[Fact]) -> Language<String> {
        let mut language = Language::new_with_labels(&[] as &[String]);
        for f in facts.iter().filter(|f| f.predicate == Predicate::Literal) {
            if language.contains(&f.args[0]) {
                self.warn(
                    f.line_index,
                    vec![format!("literal {} is declared more than once", f.args[0])],
                );
            } else {
                language.new_literal(f.args[0].clone());
            }
        }
        language
    }
}

fn read_rules(
    system: &mut ArgumentationSystem<String>,
    facts: &[Fact],
) -> Result<()> {
    let mut rule_order = vec![];
    let mut heads: HashMap<&str, (usize, &str)> = HashMap::new();
    for f in facts.iter().filter(|f| f.predicate == Predicate::Head) {
        if heads
            .insert(&f.args[0], (f.line_index, &f.args[1]))
            .is_some()
        {
            return Err(anyhow!("rule {} has more than one head", f.args[0]))
                .with_context(|| line_context(f.line_index));
        }
        rule_order.push(f.args[0].as_str());
    }
    let mut bodies: HashMap<&str, Vec<&String>> = HashMap::new();
    for f in facts.iter().filter(|f| f.predicate == Predicate::Body) {
        if !heads.contains_key(f.args[0].as_str()) {
            return Err(anyhow!("rule {} has no head", f.args[0]))
                .with_context(|| line_context(f.line_index));
        }
        bodies.entry(&f.args[0]).or_default().push(&f.args[1]);
    }
    for rule in rule_order {
        let (line_index, head) = heads[rule];
        let body = bodies.remove(rule).unwrap_or_default();
        system
            .new_defeasible_rule(&rule.to_string(), &head.to_string(), &body)
            .with_context(|| line_context(line_index))?;
    }
    Ok(())
}

fn apply_facts<F>(facts: &[Fact], predicate: Predicate, mut f: F) -> Result<()>
where
    F: FnMut(&[String]) -> Result<()>,
{
    facts
        .iter()
        .filter(|fact| fact.predicate == predicate)
        .try_for_each(|fact| f(&fact.args).with_context(|| line_context(fact.line_index)))
}

impl InstanceReader<String> for LpReader {
    fn read(&self, reader: &mut dyn Read) -> Result<IncompleteArgumentationTheory<String>> {
        let facts = self.read_facts(reader)?;
        let mut system = ArgumentationSystem::new_with_language(self.read_language(&facts));
        apply_facts(&facts, Predicate::Neg, |args| {
            system.new_contrary(&args[0], &args[1])
        })?;
        read_rules(&mut system, &facts)?;
        apply_facts(&facts, Predicate::Preferred, |args| {
            system.new_rule_preference(&args[0], &args[1])
        })?;
        let mut theory = IncompleteArgumentationTheory::new(system);
        apply_facts(&facts, Predicate::Queryable, |args| {
            theory.set_queryable(&args[0])
        })?;
        apply_facts(&facts, Predicate::Axiom, |args| theory.new_axiom(&args[0]))?;
        log::debug!("read {} facts", facts.len());
        Ok(theory)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
