//! Property tests over generated replays.

use chunky_core::format::{
    ACTION_BUILD_GLOBAL_UPGRADE, ACTION_BUILD_SQUAD, ACTION_SELECT_BATTLEGROUP, ACTION_SELECT_BATTLEGROUP_ABILITY,
    ACTION_USE_BATTLEGROUP_ABILITY,
};
use chunky_core::{Faction, Team};
use chunky_replay::{decode, decode_with_stats, Command, DecodeConfig, DecodeError};
use chunky_test_utils::{ActionSpec, PlayerSpec, ReplayBuilder, TickSpec};
use proptest::prelude::*;

const KNOWN_KINDS: [u8; 5] = [
    ACTION_BUILD_SQUAD,
    ACTION_BUILD_GLOBAL_UPGRADE,
    ACTION_SELECT_BATTLEGROUP,
    ACTION_SELECT_BATTLEGROUP_ABILITY,
    ACTION_USE_BATTLEGROUP_ABILITY,
];

// ── Strategies ──────────────────────────────────────────────────

fn unknown_kind() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("known kind", |kind| !KNOWN_KINDS.contains(kind))
}

fn action(players: u8) -> impl Strategy<Value = ActionSpec> {
    let ordinal = 0..players;
    prop_oneof![
        (ordinal.clone(), any::<u32>()).prop_map(|(o, p)| ActionSpec::build_squad(o, p)),
        (ordinal.clone(), any::<u32>()).prop_map(|(o, p)| ActionSpec::build_global_upgrade(o, p)),
        (ordinal.clone(), any::<u32>()).prop_map(|(o, p)| ActionSpec::select_battlegroup(o, p)),
        (ordinal.clone(), any::<u32>())
            .prop_map(|(o, p)| ActionSpec::select_battlegroup_ability(o, p)),
        (ordinal.clone(), any::<u32>())
            .prop_map(|(o, p)| ActionSpec::use_battlegroup_ability(o, p)),
        (
            unknown_kind(),
            ordinal,
            proptest::collection::vec(any::<u8>(), 0..12)
        )
            .prop_map(|(kind, o, payload)| ActionSpec::raw(kind, o, payload)),
    ]
}

/// A tick record, with command ticks given as a delta from the previous one.
#[derive(Clone, Debug)]
enum Step {
    Commands(u32, Vec<Vec<ActionSpec>>),
    Chat(Vec<(u32, String)>),
    Opaque(u32, Vec<u8>),
}

fn step(players: u8) -> impl Strategy<Value = Step> {
    let bundles = proptest::collection::vec(proptest::collection::vec(action(players), 0..4), 0..3);
    let chat = proptest::collection::vec((0..u32::from(players), "[a-z !]{0,12}"), 1..3);
    prop_oneof![
        4 => (0u32..40, bundles).prop_map(|(delta, b)| Step::Commands(delta, b)),
        1 => chat.prop_map(Step::Chat),
        1 => (2u32..100, proptest::collection::vec(any::<u8>(), 0..8))
            .prop_map(|(kind, payload)| Step::Opaque(kind, payload)),
    ]
}

fn player(ordinal: usize) -> impl Strategy<Value = PlayerSpec> {
    let faction = proptest::sample::select(Faction::ALL.to_vec());
    (any::<bool>(), faction, any::<u64>()).prop_map(move |(human, faction, id)| {
        let team = if ordinal % 2 == 0 { Team::First } else { Team::Second };
        let name = format!("player{ordinal}");
        if human {
            PlayerSpec::human(&name, faction, team, id, id / 3)
        } else {
            PlayerSpec::ai(&name, faction, team)
        }
    })
}

fn replay() -> impl Strategy<Value = ReplayBuilder> {
    (1u8..5).prop_flat_map(|players| {
        let roster: Vec<_> = (0..usize::from(players)).map(player).collect();
        (roster, proptest::collection::vec(step(players), 0..10)).prop_map(|(roster, steps)| {
            let mut builder = ReplayBuilder::new();
            for entry in roster {
                builder = builder.player(entry);
            }
            let mut tick = 0;
            for step in steps {
                builder = builder.tick(match step {
                    Step::Commands(delta, bundles) => {
                        tick += delta;
                        TickSpec::Commands { tick, bundles }
                    }
                    Step::Chat(entries) => TickSpec::Chat { entries },
                    Step::Opaque(record_type, payload) => TickSpec::Opaque {
                        record_type,
                        payload,
                    },
                });
            }
            builder
        })
    })
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn decoding_is_deterministic(builder in replay()) {
        let bytes = builder.build();
        prop_assert_eq!(decode(&bytes), decode(&bytes));
    }

    #[test]
    fn players_hold_sorted_partitions_of_the_stream(builder in replay()) {
        let (replay, stats) = decode_with_stats(&builder.build(), &DecodeConfig::default()).unwrap();

        let mut attributed = 0;
        for player in replay.players() {
            let commands = player.commands();
            prop_assert!(commands.windows(2).all(|w| w[0].tick() <= w[1].tick()));
            prop_assert!(player.messages().windows(2).all(|w| w[0].tick() <= w[1].tick()));

            let builds: Vec<&Command> = commands.iter().filter(|c| c.is_build()).collect();
            prop_assert_eq!(player.build_commands(), builds);
            let battlegroup: Vec<&Command> = commands
                .iter()
                .filter(|c| matches!(
                    c,
                    Command::SelectBattlegroup { .. }
                        | Command::SelectBattlegroupAbility { .. }
                        | Command::UseBattlegroupAbility { .. }
                ))
                .collect();
            prop_assert_eq!(player.battlegroup_commands(), battlegroup);

            let first_pick = commands.iter().find_map(|c| match c {
                Command::SelectBattlegroup { pbgid, .. } => Some(*pbgid),
                _ => None,
            });
            prop_assert_eq!(player.battlegroup(), first_pick);

            attributed += commands.len() + player.messages().len();
        }
        prop_assert_eq!(attributed, builder.record_count());
        prop_assert_eq!(attributed, stats.commands + stats.messages);
    }

    #[test]
    fn truncation_never_decodes(builder in replay(), cut in any::<prop::sample::Index>()) {
        let bytes = builder.build();
        let end = cut.index(bytes.len());
        match decode(&bytes[..end]) {
            Err(DecodeError::UnexpectedEof { .. }) | Err(DecodeError::MalformedContainer { .. }) => {}
            other => prop_assert!(false, "truncated at {} of {}: {:?}", end, bytes.len(), other),
        }
    }

    #[test]
    fn unknown_kinds_keep_tick_and_stream_position(
        kind in unknown_kind(),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
        tick in any::<u32>(),
        pbgid in any::<u32>(),
    ) {
        let builder = ReplayBuilder::new()
            .player(PlayerSpec::ai("cpu", Faction::Wehrmacht, Team::First))
            .tick(TickSpec::commands(
                tick,
                vec![ActionSpec::raw(kind, 0, payload), ActionSpec::build_squad(0, pbgid)],
            ));
        let replay = decode(&builder.build()).unwrap();
        prop_assert_eq!(
            replay.players()[0].commands(),
            &[
                Command::Unknown { tick, action_type: kind },
                Command::BuildSquad { tick, pbgid },
            ]
        );
    }
}
