// pinguard-core/src/generator.rs
//! Combinatorial candidate generation from demographic dates.
//!
//! For every part-length split of the PIN (`[2, 2]` for four digits;
//! `[2, 2, 2]`, `[2, 4]`, `[4, 2]` for six) the generator walks every ordered
//! tuple of sources, with repetition, and concatenates fixed-width fragments
//! from each. Named composites and the special-case seeds are added last.
//!
//! All emission goes through one [`Collector`] that enforces the budget on
//! every single combination. A breach stops generation and returns what has
//! been collected, which is a deterministic prefix of the enumeration order.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use crate::components::{ComponentName, ComponentSet};
use crate::date::{DemographicProfile, DemographicSource};
use crate::pin::PinLength;
use crate::reason::{Reason, ReasonSet};
use crate::special_cases::SpecialCaseMatcher;

pub const DEFAULT_MAX_COMBINATIONS: u64 = 500_000;
pub const DEFAULT_MAX_EXECUTION_TIME: Duration = Duration::from_secs(3);
pub const DEFAULT_PRODUCT_CEILING: usize = 5_000;
pub const DEFAULT_FRAGMENT_PREFIX: usize = 20;

/// Limits applied to one `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationBudget {
    /// Maximum number of combinations processed, counted across all products.
    pub max_combinations: u64,
    /// Wall-clock limit, measured from the start of the call.
    pub max_execution_time: Duration,
    /// A product larger than this has its operand lists truncated first.
    pub product_ceiling: usize,
    /// Length each operand list is truncated to.
    pub fragment_prefix: usize,
}

impl Default for GenerationBudget {
    fn default() -> Self {
        GenerationBudget {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_execution_time: DEFAULT_MAX_EXECUTION_TIME,
            product_ceiling: DEFAULT_PRODUCT_CEILING,
            fragment_prefix: DEFAULT_FRAGMENT_PREFIX,
        }
    }
}

/// Which budget limit stopped generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBreach {
    Deadline,
    Combinations,
}

fn reason_bit(reason: Reason) -> u8 {
    1 << (reason as u8)
}

fn reasons_of(mask: u8) -> ReasonSet {
    Reason::ALL.into_iter().filter(|r| mask & reason_bit(*r) != 0).collect()
}

/// Result of one `generate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    candidates: HashMap<String, u8>,
    /// Set when the budget ran out before enumeration finished.
    pub breach: Option<BudgetBreach>,
    /// Combinations processed, including discarded wrong-length strings.
    pub combinations: u64,
}

impl GenerationOutcome {
    pub fn contains(&self, pin: &str) -> bool {
        self.candidates.contains_key(pin)
    }

    /// The union of reasons attached to `pin`; empty when it was not generated.
    pub fn reasons_for(&self, pin: &str) -> ReasonSet {
        self.candidates.get(pin).map(|mask| reasons_of(*mask)).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.breach.is_some()
    }

    /// The full mapping in PIN order.
    pub fn to_map(&self) -> BTreeMap<String, ReasonSet> {
        self.candidates.iter().map(|(pin, mask)| (pin.clone(), reasons_of(*mask))).collect()
    }
}

/// Lazy Cartesian product over fragment lists, yielding concatenations.
///
/// The last list varies fastest. Yields nothing if any list is empty.
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a> {
    lists: Vec<&'a [&'a str]>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a> CartesianProduct<'a> {
    pub fn new(lists: Vec<&'a [&'a str]>) -> Self {
        let exhausted = lists.is_empty() || lists.iter().any(|list| list.is_empty());
        CartesianProduct { indices: vec![0; lists.len()], lists, exhausted }
    }

    /// Total number of items, saturating.
    pub fn size(&self) -> usize {
        if self.lists.is_empty() {
            return 0;
        }
        self.lists.iter().fold(1usize, |acc, list| acc.saturating_mul(list.len()))
    }

    /// Rewinds to the first item.
    pub fn restart(&mut self) {
        self.indices.iter_mut().for_each(|i| *i = 0);
        self.exhausted = self.size() == 0;
    }
}

impl Iterator for CartesianProduct<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }

        let item: String = self.indices.iter().zip(&self.lists).map(|(&i, list)| list[i]).collect();

        let mut position = self.lists.len();
        loop {
            if position == 0 {
                self.exhausted = true;
                break;
            }
            position -= 1;
            self.indices[position] += 1;
            if self.indices[position] < self.lists[position].len() {
                break;
            }
            self.indices[position] = 0;
        }

        Some(item)
    }
}

/// Every ordered `arity`-tuple of indices into `count` items, with repetition,
/// last position fastest.
fn index_tuples(count: usize, arity: u32) -> Vec<Vec<usize>> {
    let total = count.pow(arity);
    (0..total)
        .map(|mut n| {
            let mut tuple = vec![0; arity as usize];
            for slot in tuple.iter_mut().rev() {
                *slot = n % count;
                n /= count;
            }
            tuple
        })
        .collect()
}

struct SourceDate {
    source: DemographicSource,
    components: ComponentSet,
}

impl SourceDate {
    fn mask(&self) -> u8 {
        reason_bit(self.source.reason())
    }

    fn get(&self, name: ComponentName) -> &str {
        self.components.get(name)
    }
}

/// Accumulates candidates and enforces the budget on each emission.
struct Collector {
    width: usize,
    deadline: Option<Instant>,
    max_combinations: u64,
    processed: u64,
    candidates: HashMap<String, u8>,
}

impl Collector {
    fn offer(&mut self, pin: String, mask: u8) -> Result<(), BudgetBreach> {
        self.processed += 1;
        if self.processed > self.max_combinations {
            return Err(BudgetBreach::Combinations);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(BudgetBreach::Deadline);
        }
        if pin.len() == self.width {
            *self.candidates.entry(pin).or_insert(0) |= mask;
        }
        Ok(())
    }
}

/// Builds the demographic candidate mapping for one PIN length.
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    length: PinLength,
    budget: GenerationBudget,
    special_cases: SpecialCaseMatcher,
}

impl CandidateGenerator {
    pub fn new(length: PinLength, budget: GenerationBudget) -> Self {
        CandidateGenerator { length, budget, special_cases: SpecialCaseMatcher::new(length) }
    }

    pub fn budget(&self) -> &GenerationBudget {
        &self.budget
    }

    /// Generates every candidate derivable from `profile`.
    pub fn generate(&self, profile: &DemographicProfile) -> GenerationOutcome {
        let started = Instant::now();
        let sources: Vec<SourceDate> = profile
            .iter()
            .map(|(source, date)| SourceDate { source, components: ComponentSet::from_date(date) })
            .collect();

        if sources.is_empty() {
            return GenerationOutcome::default();
        }

        let mut collector = Collector {
            width: self.length.digits(),
            deadline: started.checked_add(self.budget.max_execution_time),
            max_combinations: self.budget.max_combinations,
            processed: 0,
            candidates: HashMap::new(),
        };

        let breach = self.run(&sources, profile, &mut collector).err();
        // The breaching combination was counted but not recorded.
        let combinations = collector.processed.min(self.budget.max_combinations);

        match breach {
            Some(kind) => warn!(
                "Candidate generation stopped early ({:?}) after {} combinations; results are partial.",
                kind, combinations
            ),
            None => debug!(
                "Generated {} candidates from {} source(s) in {} combinations ({:?}).",
                collector.candidates.len(),
                sources.len(),
                combinations,
                started.elapsed()
            ),
        }

        GenerationOutcome { candidates: collector.candidates, breach, combinations }
    }

    fn run(&self, sources: &[SourceDate], profile: &DemographicProfile, collector: &mut Collector) -> Result<(), BudgetBreach> {
        for split in self.length.part_splits() {
            self.emit_split(sources, split, collector)?;
        }
        for (pin, mask) in self.composites(sources) {
            collector.offer(pin, mask)?;
        }
        for (pin, reason) in self.special_cases.seeds(profile) {
            collector.offer(pin.to_string(), reason_bit(reason))?;
        }
        Ok(())
    }

    fn emit_split(&self, sources: &[SourceDate], split: &[usize], collector: &mut Collector) -> Result<(), BudgetBreach> {
        for tuple in index_tuples(sources.len(), split.len() as u32) {
            let fragments: Vec<Vec<&str>> = tuple
                .iter()
                .zip(split)
                .map(|(&source, &width)| sources[source].components.fragments_of_width(width))
                .collect();

            let mut lists: Vec<&[&str]> = fragments.iter().map(Vec::as_slice).collect();
            let size = lists.iter().fold(1usize, |acc, list| acc.saturating_mul(list.len()));
            if size > self.budget.product_ceiling {
                let prefix = self.budget.fragment_prefix;
                lists = lists.into_iter().map(|list| &list[..list.len().min(prefix)]).collect();
            }

            let mask = tuple.iter().fold(0u8, |acc, &source| acc | sources[source].mask());
            for pin in CartesianProduct::new(lists) {
                collector.offer(pin, mask)?;
            }
        }
        Ok(())
    }

    /// Named composites. Built regardless of length; the collector discards
    /// strings that do not fit.
    fn composites(&self, sources: &[SourceDate]) -> Vec<(String, u8)> {
        use ComponentName::{D, DD, FullRev, M, MD, YY};

        let width = self.length.digits();
        let mut out = Vec::new();

        for s in sources {
            let d = s.get(D);
            out.push((s.get(DD).to_string(), s.mask()));
            out.push((d.repeat(3), s.mask()));
            let full_rev = s.get(FullRev);
            if full_rev.len() >= width {
                out.push((full_rev[..width].to_string(), s.mask()));
            }
            out.push((format!("{}{}{}", d, s.get(YY), d), s.mask()));
            out.push((format!("{}{}", s.get(YY), s.get(MD)), s.mask()));
        }

        for (i, a) in sources.iter().enumerate() {
            for b in &sources[i + 1..] {
                let mask = a.mask() | b.mask();
                let (d1, d2) = (a.get(D), b.get(D));
                let (m1, m2) = (a.get(M), b.get(M));
                let (y1, y2) = (a.get(YY), b.get(YY));
                let y1_reversed: String = y1.chars().rev().collect();

                out.push((format!("{d1}{d2}"), mask));
                out.push((format!("{d2}{d1}"), mask));
                out.push((format!("{m1}{m2}"), mask));
                out.push((format!("{m2}{m1}"), mask));
                out.push((format!("{y1}{y2}"), mask));
                out.push((format!("{y1_reversed}{y2}"), mask));
                out.push((format!("{}{}", &a.get(MD)[..2], b.get(MD)), mask));
                out.push((format!("{y1}{}", b.get(MD)), mask));
                out.push((format!("{d1}{d2}{d1}"), mask));
            }
        }

        if let [me, partner, anniversary] = sources {
            let all = me.mask() | partner.mask() | anniversary.mask();
            let partner_year_reversed: String = partner.get(YY).chars().rev().collect();
            let mut year_day = format!("{}{}", partner_year_reversed, anniversary.get(D));
            if width == 6 {
                year_day.push_str("00");
            }
            out.push((year_day, partner.mask() | anniversary.mask()));
            out.push((format!("{}{}{}", me.get(D), partner.get(D), &anniversary.get(D)[..2]), all));
            out.push((format!("{}{}{}", me.get(M), partner.get(M), anniversary.get(M)), all));
            out.push((format!("{}{}{}", anniversary.get(YY), me.get(D), partner.get(D)), all));
        }

        out
    }
}
