//! Synthetic replay encoder and fixtures for Chunky development.
//!
//! [`ReplayBuilder`] writes byte-exact replay files from typed
//! descriptions so decoder tests can state inputs as data instead of
//! hex dumps. The encoder is deliberately permissive: it will happily
//! write out-of-range teams, unknown faction keys, or duplicate chunks so
//! tests can exercise the decoder's error paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod encode;
pub mod fixtures;

use chunky_core::format::{
    ACTION_BUILD_GLOBAL_UPGRADE, ACTION_BUILD_SQUAD, ACTION_HEADER_LEN, ACTION_SELECT_BATTLEGROUP,
    ACTION_SELECT_BATTLEGROUP_ABILITY, ACTION_USE_BATTLEGROUP_ABILITY, GAME_MAGIC,
    KIND_DATA, KIND_FOLD, LATEST_SUPPORTED_VERSION, MAP_NAME_GAP_LEN, MAP_PREAMBLE_LEN,
    MATCH_DATA_RESERVED_LEN, MATCH_HISTORY_GAP_LEN, OPTION_GAP_LEN, PLAYER_AI_GAP_LEN,
    PLAYER_FACTION_GAP_LEN, PLAYER_PROFILE_GAP_LEN, PLAYER_STEAM_GAP_LEN, PLAYER_TEAM_GAP_LEN,
    PLAYER_TRAILER_LEN, RECORD_CHAT, RECORD_COMMAND_TICK,
};
use chunky_core::{Faction, GameType, Team};

use crate::encode::*;

// ── Actions and tick records ────────────────────────────────────

/// One action record inside a command bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub action_type: u8,
    pub ordinal: u8,
    pub payload: Vec<u8>,
}

impl ActionSpec {
    /// An action with an arbitrary kind and payload.
    pub fn raw(action_type: u8, ordinal: u8, payload: Vec<u8>) -> Self {
        Self {
            action_type,
            ordinal,
            payload,
        }
    }

    fn with_pbgid(action_type: u8, ordinal: u8, pbgid: u32) -> Self {
        Self::raw(action_type, ordinal, pbgid.to_le_bytes().to_vec())
    }

    pub fn build_squad(ordinal: u8, pbgid: u32) -> Self {
        Self::with_pbgid(ACTION_BUILD_SQUAD, ordinal, pbgid)
    }

    pub fn build_global_upgrade(ordinal: u8, pbgid: u32) -> Self {
        Self::with_pbgid(ACTION_BUILD_GLOBAL_UPGRADE, ordinal, pbgid)
    }

    pub fn select_battlegroup(ordinal: u8, pbgid: u32) -> Self {
        Self::with_pbgid(ACTION_SELECT_BATTLEGROUP, ordinal, pbgid)
    }

    pub fn select_battlegroup_ability(ordinal: u8, pbgid: u32) -> Self {
        Self::with_pbgid(ACTION_SELECT_BATTLEGROUP_ABILITY, ordinal, pbgid)
    }

    pub fn use_battlegroup_ability(ordinal: u8, pbgid: u32) -> Self {
        Self::with_pbgid(ACTION_USE_BATTLEGROUP_ABILITY, ordinal, pbgid)
    }
}

/// One record of the tick log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickSpec {
    /// A command tick; each inner vector is one bundle.
    Commands {
        tick: u32,
        bundles: Vec<Vec<ActionSpec>>,
    },
    /// Chat entries as `(sender ordinal, text)`.
    Chat { entries: Vec<(u32, String)> },
    /// A record of any type with a raw payload.
    Opaque { record_type: u32, payload: Vec<u8> },
}

impl TickSpec {
    /// A command tick holding a single bundle.
    pub fn commands(tick: u32, actions: Vec<ActionSpec>) -> Self {
        Self::Commands {
            tick,
            bundles: vec![actions],
        }
    }

    pub fn chat(entries: Vec<(u32, &str)>) -> Self {
        Self::Chat {
            entries: entries
                .into_iter()
                .map(|(ordinal, text)| (ordinal, text.to_string()))
                .collect(),
        }
    }

    pub fn opaque(record_type: u32, payload: Vec<u8>) -> Self {
        Self::Opaque {
            record_type,
            payload,
        }
    }

    /// Number of action and chat records this tick contributes.
    pub fn record_count(&self) -> usize {
        match self {
            Self::Commands { bundles, .. } => bundles.iter().map(Vec::len).sum(),
            Self::Chat { entries } => entries.len(),
            Self::Opaque { .. } => 0,
        }
    }
}

/// Encode one action record with its length prefix.
pub fn encode_action(action: &ActionSpec) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + ACTION_HEADER_LEN + action.payload.len());
    write_u16_le(&mut out, (ACTION_HEADER_LEN + action.payload.len()) as u16);
    write_u8(&mut out, action.action_type);
    write_u8(&mut out, action.ordinal);
    out.extend_from_slice(&action.payload);
    out
}

/// Encode a command tick payload.
pub fn encode_command_tick(tick: u32, bundles: &[Vec<ActionSpec>]) -> Vec<u8> {
    let mut out = Vec::new();
    write_gap(&mut out, 1);
    write_u32_le(&mut out, tick);
    write_gap(&mut out, 4);
    write_u32_le(&mut out, bundles.len() as u32);
    for bundle in bundles {
        write_gap(&mut out, 9);
        let data: Vec<u8> = bundle.iter().flat_map(encode_action).collect();
        write_blob(&mut out, &data);
    }
    out
}

/// Encode a chat payload.
pub fn encode_chat(entries: &[(u32, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    write_u32_le(&mut out, entries.len() as u32);
    for &(ordinal, text) in entries {
        write_u32_le(&mut out, ordinal);
        write_utf16(&mut out, text);
    }
    out
}

/// Encode a counted tick log.
pub fn encode_tick_log(ticks: &[TickSpec]) -> Vec<u8> {
    let mut out = Vec::new();
    write_u32_le(&mut out, ticks.len() as u32);
    for tick in ticks {
        match tick {
            TickSpec::Commands { tick, bundles } => {
                let payload = encode_command_tick(*tick, bundles);
                write_tick_record(&mut out, RECORD_COMMAND_TICK, &payload);
            }
            TickSpec::Chat { entries } => {
                let borrowed: Vec<(u32, &str)> = entries
                    .iter()
                    .map(|(ordinal, text)| (*ordinal, text.as_str()))
                    .collect();
                write_tick_record(&mut out, RECORD_CHAT, &encode_chat(&borrowed));
            }
            TickSpec::Opaque {
                record_type,
                payload,
            } => write_tick_record(&mut out, *record_type, payload),
        }
    }
    out
}

// ── Roster and map ──────────────────────────────────────────────

/// One roster entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    pub human: bool,
    pub team: u32,
    pub faction_key: String,
    pub ai_personality: String,
    pub profile_id: u64,
    pub steam_id: String,
    pub items: Vec<Vec<u8>>,
}

impl PlayerSpec {
    pub fn human(
        name: &str,
        faction: Faction,
        team: Team,
        profile_id: u64,
        steam_id: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            human: true,
            team: team.value(),
            faction_key: faction.key().to_string(),
            ai_personality: String::new(),
            profile_id,
            steam_id: steam_id.to_string(),
            items: vec![vec![1, 2, 3, 4], Vec::new(), vec![9; 12]],
        }
    }

    pub fn ai(name: &str, faction: Faction, team: Team) -> Self {
        Self {
            name: name.to_string(),
            human: false,
            team: team.value(),
            faction_key: faction.key().to_string(),
            ai_personality: "ai_personality_hard".to_string(),
            profile_id: u64::MAX,
            steam_id: String::new(),
            items: Vec::new(),
        }
    }

    /// Override the stored team value, valid or not.
    pub fn with_team_value(mut self, team: u32) -> Self {
        self.team = team;
        self
    }

    /// Override the stored faction key, valid or not.
    pub fn with_faction_key(mut self, key: &str) -> Self {
        self.faction_key = key.to_string();
        self
    }

    fn encode(&self, out: &mut Vec<u8>) {
        write_u8(out, u8::from(self.human));
        write_utf16(out, &self.name);
        write_u32_le(out, self.team);
        write_gap(out, PLAYER_TEAM_GAP_LEN);
        write_utf8(out, &self.faction_key);
        write_gap(out, PLAYER_FACTION_GAP_LEN);
        write_utf8(out, &self.ai_personality);
        write_gap(out, PLAYER_AI_GAP_LEN);
        write_u64_le(out, self.profile_id);
        write_gap(out, PLAYER_PROFILE_GAP_LEN);
        write_utf16(out, &self.steam_id);
        write_gap(out, PLAYER_STEAM_GAP_LEN);
        write_u32_le(out, self.items.len() as u32);
        for item in &self.items {
            write_blob(out, item);
        }
        write_gap(out, PLAYER_TRAILER_LEN);
    }
}

/// Scenario description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSpec {
    pub filename: String,
    pub localized_name_id: String,
    pub localized_description_id: String,
}

impl MapSpec {
    pub fn new(filename: &str, name_id: &str, description_id: &str) -> Self {
        Self {
            filename: filename.to_string(),
            localized_name_id: name_id.to_string(),
            localized_description_id: description_id.to_string(),
        }
    }

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_gap(&mut out, MAP_PREAMBLE_LEN);
        write_utf8(&mut out, &self.filename);
        write_utf16(&mut out, &self.localized_name_id);
        write_gap(&mut out, MAP_NAME_GAP_LEN);
        write_utf16(&mut out, &self.localized_description_id);
        // Unread trailer.
        write_gap(&mut out, 7);
        out
    }
}

impl Default for MapSpec {
    fn default() -> Self {
        Self::new(
            "data:scenarios\\multiplayer\\desert_village_2p\\desert_village_2p",
            "$11220490",
            "$11234531",
        )
    }
}

// ── ReplayBuilder ───────────────────────────────────────────────

/// Builder for complete replay files.
///
/// The default is an empty automatch on the latest supported build. The
/// match-data and map chunks sit inside an `INFO` folder, preceded by an
/// unrelated data chunk the decoder must skip.
#[derive(Clone, Debug)]
pub struct ReplayBuilder {
    version: u16,
    timestamp: String,
    game_type: u32,
    matchhistory_id: u64,
    mod_id: u128,
    map: MapSpec,
    players: Vec<PlayerSpec>,
    ticks: Vec<TickSpec>,
    map_copies: usize,
    match_data_copies: usize,
    legacy_match_data: bool,
    split_sections: bool,
    trailing: Vec<u8>,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayBuilder {
    pub fn new() -> Self {
        Self {
            version: LATEST_SUPPORTED_VERSION,
            timestamp: "3/1/2023 6:44 PM".to_string(),
            game_type: GameType::Automatch.discriminator(),
            matchhistory_id: 5_006_417,
            mod_id: 0,
            map: MapSpec::default(),
            players: Vec::new(),
            ticks: Vec::new(),
            map_copies: 1,
            match_data_copies: 1,
            legacy_match_data: false,
            split_sections: false,
            trailing: Vec::new(),
        }
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn game_type(self, game_type: GameType) -> Self {
        self.game_type_value(game_type.discriminator())
    }

    /// Store a raw game-type value, valid or not.
    pub fn game_type_value(mut self, value: u32) -> Self {
        self.game_type = value;
        self
    }

    pub fn matchhistory_id(mut self, id: u64) -> Self {
        self.matchhistory_id = id;
        self
    }

    pub fn mod_id(mut self, id: u128) -> Self {
        self.mod_id = id;
        self
    }

    pub fn map(mut self, map: MapSpec) -> Self {
        self.map = map;
        self
    }

    pub fn player(mut self, player: PlayerSpec) -> Self {
        self.players.push(player);
        self
    }

    pub fn tick(mut self, tick: TickSpec) -> Self {
        self.ticks.push(tick);
        self
    }

    pub fn ticks(mut self, ticks: impl IntoIterator<Item = TickSpec>) -> Self {
        self.ticks.extend(ticks);
        self
    }

    /// Number of map chunks to write; anything but 1 is invalid.
    pub fn map_copies(mut self, copies: usize) -> Self {
        self.map_copies = copies;
        self
    }

    /// Number of version 2 match-data chunks to write; anything but 1 is
    /// invalid.
    pub fn match_data_copies(mut self, copies: usize) -> Self {
        self.match_data_copies = copies;
        self
    }

    /// Also write a version 1 match-data chunk, as older builds do.
    pub fn legacy_match_data(mut self) -> Self {
        self.legacy_match_data = true;
        self
    }

    /// Put the map chunk in a second chunky section.
    pub fn split_sections(mut self) -> Self {
        self.split_sections = true;
        self
    }

    /// Append bytes after the tick log.
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing = bytes.to_vec();
        self
    }

    /// Total action and chat records in the tick log.
    pub fn record_count(&self) -> usize {
        self.ticks.iter().map(TickSpec::record_count).sum()
    }

    fn encode_match_data(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_u32_le(&mut out, self.game_type);
        write_gap(&mut out, MATCH_DATA_RESERVED_LEN);
        write_u32_le(&mut out, self.players.len() as u32);
        for player in &self.players {
            player.encode(&mut out);
        }
        write_blob(&mut out, &[7, 7, 7]);
        write_gap(&mut out, MATCH_HISTORY_GAP_LEN);
        write_u64_le(&mut out, self.matchhistory_id);
        write_blob(&mut out, &[]);
        write_utf8(&mut out, "resources");
        write_gap(&mut out, OPTION_GAP_LEN);
        write_utf8(&mut out, "resources_standard");
        write_gap(&mut out, OPTION_GAP_LEN);
        write_utf8(&mut out, "tickets");
        write_gap(&mut out, OPTION_GAP_LEN);
        write_utf8(&mut out, "tickets_500");
        write_u128_le(&mut out, self.mod_id);
        write_utf8(&mut out, "");
        out
    }

    /// Encode the replay.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_u16_le(&mut out, 0);
        write_u16_le(&mut out, self.version);
        out.extend_from_slice(&GAME_MAGIC);
        write_utf16_nul_terminated(&mut out, &self.timestamp);
        out.resize(out.len() + 6, 0);

        let map_payload = self.map.encode();
        let mut map_chunks = Vec::new();
        for _ in 0..self.map_copies {
            write_chunk(&mut map_chunks, KIND_DATA, *b"SDSC", 3, "", &map_payload);
        }

        let mut info = Vec::new();
        if self.legacy_match_data {
            write_chunk(&mut info, KIND_DATA, *b"DATA", 1, "", &[GAP_FILL; 10]);
        }
        let match_data = self.encode_match_data();
        for _ in 0..self.match_data_copies {
            write_chunk(&mut info, KIND_DATA, *b"DATA", 2, "", &match_data);
        }
        if !self.split_sections {
            info.extend_from_slice(&map_chunks);
        }

        write_section_header(&mut out);
        write_chunk(&mut out, KIND_DATA, *b"PLAS", 1, "PLAS", &[GAP_FILL; 24]);
        write_chunk(&mut out, KIND_FOLD, *b"INFO", 1, "", &info);
        if self.split_sections {
            write_section_header(&mut out);
            out.extend_from_slice(&map_chunks);
        }

        out.extend(encode_tick_log(&self.ticks));
        out.extend_from_slice(&self.trailing);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_length_counts_header_and_payload() {
        let bytes = encode_action(&ActionSpec::build_squad(1, 0x0403_0201));
        assert_eq!(bytes, vec![6, 0, ACTION_BUILD_SQUAD, 1, 1, 2, 3, 4]);
    }

    #[test]
    fn record_count_ignores_opaque_ticks() {
        let builder = ReplayBuilder::new()
            .tick(TickSpec::commands(
                1,
                vec![ActionSpec::build_squad(0, 1), ActionSpec::build_squad(0, 2)],
            ))
            .tick(TickSpec::chat(vec![(0, "hi")]))
            .tick(TickSpec::opaque(5, vec![1]));
        assert_eq!(builder.record_count(), 3);
    }

    #[test]
    fn build_starts_with_header() {
        let bytes = ReplayBuilder::new().version(10612).build();
        assert_eq!(&bytes[..4], &[0, 0, 0x74, 0x29]);
        assert_eq!(&bytes[4..12], b"COH3_REC");
    }
}
