//! Attribution of decoded records to players.
//!
//! The roster is a dense, ordinal-indexed sequence; commands and messages
//! refer to it by ordinal only. This pass partitions both streams into
//! per-player buckets, orders each bucket by tick, and assembles the
//! immutable [`Replay`].

use crate::commands::RawCommand;
use crate::error::DecodeError;
use crate::header::ReplayHeader;
use crate::match_data::MatchData;
use crate::messages::RawMessage;
use crate::ticks::TickLog;
use crate::types::{Command, Map, Message, Player, Replay};

/// Split `records` into one bucket per roster slot, preserving stream
/// order within each bucket.
fn partition<R, T>(
    records: Vec<R>,
    roster_len: usize,
    split: impl Fn(R) -> (u32, usize, T),
) -> Result<Vec<Vec<T>>, DecodeError> {
    let mut buckets: Vec<Vec<T>> = (0..roster_len).map(|_| Vec::new()).collect();
    for record in records {
        let (ordinal, offset, value) = split(record);
        let bucket = buckets
            .get_mut(ordinal as usize)
            .ok_or(DecodeError::UnattributedRecord {
                offset,
                ordinal,
                roster_len,
            })?;
        bucket.push(value);
    }
    Ok(buckets)
}

/// Assemble the final replay from fully decoded parts.
pub fn aggregate(
    header: ReplayHeader,
    match_data: MatchData,
    map: Map,
    log: TickLog,
) -> Result<Replay, DecodeError> {
    let roster_len = match_data.players.len();
    let commands = partition(log.commands, roster_len, |raw: RawCommand| {
        (raw.ordinal.0, raw.offset, raw.command)
    })?;
    let messages = partition(log.messages, roster_len, |raw: RawMessage| {
        (raw.ordinal.0, raw.offset, raw.message)
    })?;

    let players = match_data
        .players
        .into_iter()
        .zip(commands)
        .zip(messages)
        .map(|((record, mut commands), mut messages)| {
            // Stable: equal ticks keep stream order.
            commands.sort_by_key(Command::tick);
            messages.sort_by_key(Message::tick);
            Player {
                name: record.name,
                human: record.human,
                faction: record.faction,
                team: record.team,
                steam_id: record.steam_id,
                profile_id: record.profile_id,
                messages,
                commands,
            }
        })
        .collect();

    Ok(Replay {
        version: header.version,
        timestamp: header.timestamp,
        game_type: match_data.game_type,
        matchhistory_id: match_data.matchhistory_id,
        mod_id: match_data.mod_id,
        map,
        players,
        length: log.command_ticks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunky_core::{Faction, GameType, PlayerOrdinal, Team};
    use uuid::Uuid;

    use crate::roster::PlayerRecord;

    fn record(ordinal: u32) -> PlayerRecord {
        PlayerRecord {
            ordinal: PlayerOrdinal(ordinal),
            name: format!("player {ordinal}"),
            human: false,
            faction: Faction::British,
            team: Team::First,
            steam_id: None,
            profile_id: None,
        }
    }

    fn parts(roster: u32) -> (ReplayHeader, MatchData, Map) {
        (
            ReplayHeader {
                version: 21283,
                timestamp: "now".into(),
            },
            MatchData {
                game_type: GameType::Skirmish,
                players: (0..roster).map(record).collect(),
                matchhistory_id: None,
                mod_id: Uuid::nil(),
            },
            Map {
                filename: "map".into(),
                localized_name_id: "$1".into(),
                localized_description_id: "$2".into(),
            },
        )
    }

    fn raw(ordinal: u32, offset: usize, command: Command) -> RawCommand {
        RawCommand {
            ordinal: PlayerOrdinal(ordinal),
            offset,
            command,
        }
    }

    #[test]
    fn commands_are_bucketed_sorted_and_stable() {
        let (header, match_data, map) = parts(2);
        let log = TickLog {
            commands: vec![
                raw(1, 10, Command::BuildSquad { tick: 9, pbgid: 1 }),
                raw(0, 20, Command::SelectBattlegroup { tick: 5, pbgid: 50 }),
                raw(1, 30, Command::Unknown { tick: 3, action_type: 200 }),
                raw(1, 40, Command::BuildSquad { tick: 9, pbgid: 2 }),
                raw(0, 50, Command::SelectBattlegroup { tick: 6, pbgid: 60 }),
            ],
            command_ticks: 12,
            ..TickLog::default()
        };
        let replay = aggregate(header, match_data, map, log).unwrap();
        assert_eq!(replay.length(), 12);

        let second = &replay.players()[1];
        let pbgids: Vec<Option<u32>> = second.commands().iter().map(Command::pbgid).collect();
        assert_eq!(pbgids, vec![None, Some(1), Some(2)]);
        assert_eq!(second.battlegroup(), None);
        assert_eq!(replay.players()[0].battlegroup(), Some(50));
    }

    #[test]
    fn out_of_range_ordinal_is_unattributed() {
        let (header, match_data, map) = parts(1);
        let log = TickLog {
            messages: vec![RawMessage {
                ordinal: PlayerOrdinal(3),
                offset: 77,
                message: Message {
                    tick: 0,
                    text: "hi".into(),
                },
            }],
            ..TickLog::default()
        };
        assert_eq!(
            aggregate(header, match_data, map, log),
            Err(DecodeError::UnattributedRecord {
                offset: 77,
                ordinal: 3,
                roster_len: 1
            })
        );
    }
}
