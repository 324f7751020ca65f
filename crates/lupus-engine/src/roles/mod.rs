//! The built-in role roster.
//!
//! Roles are grouped by faction. Each module exposes plain constructor
//! functions; [`standard`] lists them in registration order, which is the
//! tie-break for roles sharing a phase slot.

use lupus_core::{Grouping, GroupingTable};

use crate::role::RoleDefinition;

mod common;
mod lupi;
mod solitari;
mod trasformisti;
mod villaggio;

pub use common::{lupi_wins, villaggio_wins};

/// Plain villager.
pub const VILLICO: &str = "villico";
/// Mason, knows the other masons.
pub const MASSONE: &str = "massone";
/// Mayor.
pub const SINDACO: &str = "sindaco";
/// Seer.
pub const VEGGENTE: &str = "veggente";
/// Investigator.
pub const INVESTIGATORE: &str = "investigatore";
/// Medium.
pub const MEDIUM: &str = "medium";
/// Bodyguard.
pub const GUARDIA: &str = "guardia";
/// Witch.
pub const STREGA: &str = "strega";
/// Vigilante.
pub const GIUSTIZIERE: &str = "giustiziere";
/// Hunter.
pub const CACCIATORE: &str = "cacciatore";
/// Angel.
pub const ANGELO: &str = "angelo";

/// Werewolf.
pub const LUPO: &str = "lupo";
/// Possessed.
pub const INDEMONIATO: &str = "indemoniato";
/// Wolf cub.
pub const CUCCIOLO: &str = "cucciolo";
/// Seer wolf.
pub const LUPO_VEGGENTE: &str = "lupo_veggente";
/// Enchantress.
pub const INCANTATRICE: &str = "incantatrice";
/// Illusionist.
pub const ILLUSIONISTA: &str = "illusionista";
/// Executioner.
pub const BOIA: &str = "boia";
/// Puppeteer.
pub const BURATTINAIO: &str = "burattinaio";

/// Lone wolf.
pub const LUPO_SOLITARIO: &str = "lupo_solitario";
/// Hamster.
pub const CRICETO: &str = "criceto";
/// Parasite.
pub const PARASSITA: &str = "parassita";

/// Mythomaniac.
pub const MITOMANE: &str = "mitomane";
/// Shapeshifter.
pub const MUTAFORMA: &str = "mutaforma";

/// Reason attached to the kill a seer causes by investigating a fragile role.
pub const INVESTIGATED: &str = "scoperto dal veggente";

/// Every built-in role, in registration order.
pub fn standard() -> Vec<RoleDefinition> {
    vec![
        villaggio::villico(),
        villaggio::massone(),
        villaggio::sindaco(),
        villaggio::veggente(),
        villaggio::investigatore(),
        villaggio::medium(),
        villaggio::guardia(),
        villaggio::strega(),
        villaggio::giustiziere(),
        villaggio::cacciatore(),
        villaggio::angelo(),
        lupi::lupo(),
        lupi::indemoniato(),
        lupi::cucciolo(),
        lupi::lupo_veggente(),
        lupi::incantatrice(),
        lupi::illusionista(),
        lupi::boia(),
        lupi::burattinaio(),
        solitari::lupo_solitario(),
        solitari::criceto(),
        solitari::parassita(),
        trasformisti::mitomane(),
        trasformisti::mutaforma(),
    ]
}

/// Groupings installed in every new game: the pack's kill can be borrowed
/// through the wolf-side roles that never act on their own.
pub fn default_groupings() -> GroupingTable {
    GroupingTable::new(vec![
        Grouping::new(LUPO, INDEMONIATO),
        Grouping::new(LUPO, CUCCIOLO),
    ])
}
