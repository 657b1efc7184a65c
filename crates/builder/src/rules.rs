//! Pairwise compatibility rules.
//!
//! The generic required-tag check is too coarse for some part pairs, so each
//! pair that needs a sharper check gets a row in [`PAIR_RULES`]. A row compares
//! a candidate for `target` against the product already chosen for
//! `depends_on`; rows whose `depends_on` slot is empty do not apply.
//!
//! Adding a rule (say GPU power draw against PSU wattage) is a new row plus a
//! match function, never a new branch in the filter.

use rigforge_catalog::{Category, Product, TagFamily};

use crate::build::BuildSelection;

/// `candidate` is the product being considered, `chosen` the one already in
/// the build.
pub type MatchFn = fn(candidate: &Product, chosen: &Product) -> bool;

#[derive(Debug, Clone, Copy)]
pub struct PairRule {
    pub name: &'static str,
    pub target: Category,
    pub depends_on: Category,
    pub matches: MatchFn,
    /// The rule takes over the generic all-of check for the required tags of
    /// the `depends_on` product.
    pub supersedes_required_tags: bool,
}

impl PairRule {
    /// Whether this rule constrains `target` given the current build.
    pub fn is_active(&self, target: Category, build: &BuildSelection) -> bool {
        self.target == target && self.depends_on != target && build.is_filled(self.depends_on)
    }

    /// Whether the generic required-tag check skips `source` when filtering
    /// `target`.
    pub fn exempts(&self, target: Category, source: Category) -> bool {
        self.supersedes_required_tags && self.target == target && self.depends_on == source
    }

    pub fn check(&self, candidate: &Product, build: &BuildSelection) -> bool {
        match build.get(self.depends_on) {
            Some(chosen) => (self.matches)(candidate, chosen),
            None => true,
        }
    }
}

pub const PAIR_RULES: &[PairRule] = &[
    PairRule {
        name: "motherboard-socket",
        target: Category::Motherboard,
        depends_on: Category::Cpu,
        matches: same_socket,
        supersedes_required_tags: false,
    },
    PairRule {
        name: "ram-type",
        target: Category::Ram,
        depends_on: Category::Motherboard,
        matches: same_ram_type,
        supersedes_required_tags: false,
    },
    PairRule {
        name: "case-form-factor",
        target: Category::Case,
        depends_on: Category::Motherboard,
        matches: case_fits_board,
        supersedes_required_tags: true,
    },
    PairRule {
        name: "cooler-socket",
        target: Category::Cooling,
        depends_on: Category::Cpu,
        matches: same_socket,
        supersedes_required_tags: false,
    },
];

/// Candidate carries the chosen part's `socket-*` tag (if it has one).
pub fn same_socket(candidate: &Product, chosen: &Product) -> bool {
    shares_family_tag(TagFamily::Socket, candidate, chosen)
}

/// Candidate carries the chosen part's `ram-*` tag (if it has one).
pub fn same_ram_type(candidate: &Product, chosen: &Product) -> bool {
    shares_family_tag(TagFamily::RamType, candidate, chosen)
}

/// The case supports at least one of the form factors the board requires.
///
/// Any-of, not all-of. This rule reads only the board's required tags. A
/// chosen case's own required tags still reach board candidates through the
/// generic all-of check in the filter.
pub fn case_fits_board(case: &Product, board: &Product) -> bool {
    let wanted = board.required_tags();
    wanted.is_empty() || case.compatibility_tags().contains_any(wanted)
}

fn shares_family_tag(family: TagFamily, candidate: &Product, chosen: &Product) -> bool {
    match chosen.compatibility_tags().family_tag(family) {
        Some(tag) => candidate.compatibility_tags().contains(tag),
        None => true,
    }
}
