//! Canned matches for tests and benchmarks.

use chunky_core::{Faction, GameType, Team};

use crate::{ActionSpec, MapSpec, PlayerSpec, ReplayBuilder, TickSpec};

/// Battlegroup the first player picks in [`one_vs_one`].
pub const ALLIES_BATTLEGROUP: u32 = 2_072_430;
/// Battlegroup the second player picks in [`one_vs_one`].
pub const AXIS_BATTLEGROUP: u32 = 2_075_120;
/// An action kind the decoder does not interpret.
pub const UNMODELLED_ACTION: u8 = 62;

/// One human player who queues a single squad (pbgid 100) at tick 40.
pub fn single_build_squad() -> ReplayBuilder {
    ReplayBuilder::new()
        .player(PlayerSpec::human(
            "Solo",
            Faction::Americans,
            Team::First,
            1001,
            76_561_198_000_000_001,
        ))
        .tick(TickSpec::commands(40, vec![ActionSpec::build_squad(0, 100)]))
}

/// A short automatch between two humans with production, battlegroup
/// picks, an unmodelled action, chat, and an uninterpreted tick record.
///
/// The same-tick actions of player 1 are written in the order
/// build 137_001, build 137_002 so tests can check stable ordering.
pub fn one_vs_one() -> ReplayBuilder {
    ReplayBuilder::new()
        .matchhistory_id(8_812_345)
        .map(MapSpec::new(
            "data:scenarios\\multiplayer\\twin_beach_2p_mkii\\twin_beach_2p_mkii",
            "$11233954",
            "$11233955",
        ))
        .player(PlayerSpec::human(
            "Monty",
            Faction::British,
            Team::First,
            2001,
            76_561_198_000_000_011,
        ))
        .player(PlayerSpec::human(
            "Rommel",
            Faction::AfrikaKorps,
            Team::Second,
            2002,
            76_561_198_000_000_022,
        ))
        .ticks([
            TickSpec::commands(
                8,
                vec![
                    ActionSpec::build_squad(0, 198_341),
                    ActionSpec::raw(UNMODELLED_ACTION, 1, vec![0xde, 0xad, 0xbe, 0xef, 0x01]),
                ],
            ),
            TickSpec::chat(vec![(0, "gl hf"), (1, "hf")]),
            TickSpec::Commands {
                tick: 120,
                bundles: vec![
                    vec![ActionSpec::select_battlegroup(1, AXIS_BATTLEGROUP)],
                    vec![
                        ActionSpec::build_squad(1, 137_001),
                        ActionSpec::select_battlegroup(0, ALLIES_BATTLEGROUP),
                        ActionSpec::build_squad(1, 137_002),
                    ],
                ],
            },
            TickSpec::opaque(17, vec![0; 6]),
            TickSpec::commands(
                480,
                vec![
                    ActionSpec::select_battlegroup_ability(0, ALLIES_BATTLEGROUP + 1),
                    ActionSpec::select_battlegroup(0, ALLIES_BATTLEGROUP + 50),
                ],
            ),
            TickSpec::commands(
                960,
                vec![ActionSpec::use_battlegroup_ability(0, ALLIES_BATTLEGROUP + 1)],
            ),
            TickSpec::chat(vec![(1, "gg")]),
        ])
}

/// An offline skirmish against one AI.
pub fn skirmish_vs_ai() -> ReplayBuilder {
    ReplayBuilder::new()
        .game_type(GameType::Skirmish)
        .matchhistory_id(0)
        .player(PlayerSpec::human(
            "Trainee",
            Faction::Wehrmacht,
            Team::First,
            3001,
            76_561_198_000_000_033,
        ))
        .player(PlayerSpec::ai("CPU - Hard", Faction::Americans, Team::Second))
        .tick(TickSpec::commands(16, vec![ActionSpec::build_squad(1, 205_000)]))
        .tick(TickSpec::commands(24, vec![ActionSpec::build_squad(0, 198_000)]))
}
