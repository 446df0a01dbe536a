//! Benchmark profiles for the Chunky replay decoder.
//!
//! Provides deterministic synthetic matches sized like real replays:
//!
//! - [`match_profile`]: 20-minute 1v1 (9,600 command ticks)
//! - [`stress_profile`]: 60-minute 4v4 (28,800 command ticks)
//!
//! Real replays are dominated by action kinds the decoder does not
//! interpret (movement, targeting), so most generated actions are unknown.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chunky_core::format::TICKS_PER_SECOND;
use chunky_core::{Faction, GameType, Team};
use chunky_test_utils::{ActionSpec, PlayerSpec, ReplayBuilder, TickSpec};

/// Build a 20-minute 1v1 automatch.
pub fn match_profile(seed: u64) -> ReplayBuilder {
    synthetic_match(seed, 2, 20 * 60)
}

/// Build a 60-minute 4v4 custom game.
///
/// Same generator as [`match_profile`] at 12x the record count.
pub fn stress_profile(seed: u64) -> ReplayBuilder {
    synthetic_match(seed, 8, 60 * 60).game_type(GameType::Custom)
}

/// Deterministic per-index hash of the seed.
pub fn scramble(seed: u64, i: u64) -> u64 {
    let mut x = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(i.wrapping_mul(1442695040888963407));
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^ (x >> 33)
}

fn synthetic_match(seed: u64, players: u8, seconds: u32) -> ReplayBuilder {
    let mut builder = ReplayBuilder::new();
    for ordinal in 0..players {
        let team = if ordinal % 2 == 0 { Team::First } else { Team::Second };
        let faction = Faction::ALL[usize::from(ordinal) % Faction::ALL.len()];
        let profile = 10_000 + u64::from(ordinal);
        builder = builder.player(PlayerSpec::human(
            &format!("player {ordinal}"),
            faction,
            team,
            profile,
            76_561_198_000_000_000 + profile,
        ));
    }

    let ticks = seconds * TICKS_PER_SECOND;
    let mut records = Vec::with_capacity(ticks as usize);
    for tick in 0..ticks {
        let roll = scramble(seed, u64::from(tick));
        let actions = (0..roll % 3)
            .map(|n| {
                let bits = scramble(roll, n);
                let ordinal = (bits % u64::from(players)) as u8;
                let pbgid = (bits >> 8) as u32 % 300_000;
                match bits % 10 {
                    0 | 1 => ActionSpec::build_squad(ordinal, pbgid),
                    2 => ActionSpec::select_battlegroup_ability(ordinal, pbgid),
                    3 => ActionSpec::use_battlegroup_ability(ordinal, pbgid),
                    _ => ActionSpec::raw(44, ordinal, vec![0; 24]),
                }
            })
            .collect();
        records.push(TickSpec::commands(tick, actions));
        if roll % 97 == 0 {
            let sender = (roll % u64::from(players)) as u32;
            records.push(TickSpec::chat(vec![(sender, "push left")]));
        }
    }
    builder.ticks(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_are_deterministic() {
        assert_eq!(match_profile(42).build(), match_profile(42).build());
        assert_ne!(match_profile(42).build(), match_profile(43).build());
    }

    #[test]
    fn match_profile_has_realistic_volume() {
        let builder = match_profile(7);
        assert!(builder.record_count() > 5_000);
    }

    #[test]
    fn profiles_decode() {
        let builder = stress_profile(1);
        let replay = chunky_replay::decode(&builder.build()).unwrap();
        assert_eq!(replay.players().len(), 8);
        assert_eq!(replay.length(), 60 * 60 * TICKS_PER_SECOND);
        let records: usize = replay
            .players()
            .iter()
            .map(|p| p.commands().len() + p.messages().len())
            .sum();
        assert_eq!(records, builder.record_count());
    }
}
