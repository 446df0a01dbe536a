//! The decoded replay object graph.
//!
//! Everything here is built once by the decoder and never mutated
//! afterwards. Fields are private; accessors expose them by reference.
//! Every entity implements [`Mapped`] for a structural key-value view.

use std::time::Duration;

use chunky_core::format::{
    ACTION_BUILD_GLOBAL_UPGRADE, ACTION_BUILD_SQUAD, ACTION_SELECT_BATTLEGROUP, ACTION_SELECT_BATTLEGROUP_ABILITY,
    ACTION_USE_BATTLEGROUP_ABILITY, TICKS_PER_SECOND,
};
use chunky_core::{Faction, GameType, Mapped, PlayerOrdinal, Team};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Replay ──────────────────────────────────────────────────────

/// A fully decoded replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub(crate) version: u16,
    pub(crate) timestamp: String,
    pub(crate) game_type: GameType,
    pub(crate) matchhistory_id: Option<u64>,
    pub(crate) mod_id: Uuid,
    pub(crate) map: Map,
    pub(crate) players: Vec<Player>,
    pub(crate) length: u32,
}

impl Replay {
    /// Game build that recorded the replay.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Recording timestamp as written by the game, in the recording
    /// machine's locale.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// How the match was set up.
    ///
    /// For builds older than
    /// [`GAME_TYPE_VERSION`](chunky_core::format::GAME_TYPE_VERSION) this
    /// only distinguishes skirmish from multiplayer.
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    /// Match-history identifier for the stats service. Absent for
    /// skirmishes.
    pub fn matchhistory_id(&self) -> Option<u64> {
        self.matchhistory_id
    }

    /// Identifier of the mod the match ran with; nil when unmodded.
    pub fn mod_id(&self) -> Uuid {
        self.mod_id
    }

    /// The played map.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Internal scenario filename of the map.
    pub fn map_filename(&self) -> &str {
        self.map.filename()
    }

    /// Localization key of the map name.
    pub fn map_localized_name_id(&self) -> &str {
        self.map.localized_name_id()
    }

    /// Localization key of the map description.
    pub fn map_localized_description_id(&self) -> &str {
        self.map.localized_description_id()
    }

    /// Roster in file order; the index is the player's ordinal.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player by roster ordinal.
    pub fn player(&self, ordinal: PlayerOrdinal) -> Option<&Player> {
        self.players.get(ordinal.index())
    }

    /// Match length in ticks.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Match length in game time.
    pub fn duration(&self) -> Duration {
        let ticks = u64::from(self.length);
        let per_second = u64::from(TICKS_PER_SECOND);
        Duration::from_secs(ticks / per_second)
            + Duration::from_millis(ticks % per_second * 1000 / per_second)
    }
}

impl Mapped for Replay {}

// ── Map ─────────────────────────────────────────────────────────

/// The played map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub(crate) filename: String,
    pub(crate) localized_name_id: String,
    pub(crate) localized_description_id: String,
}

impl Map {
    /// Path-shaped internal name of the scenario. Not a filesystem path.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Localization key of the map name, e.g. `$11234567`.
    pub fn localized_name_id(&self) -> &str {
        &self.localized_name_id
    }

    /// Localization key of the map description.
    pub fn localized_description_id(&self) -> &str {
        &self.localized_description_id
    }
}

impl Mapped for Map {}

// ── Player ──────────────────────────────────────────────────────

/// One participant with everything attributed to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) human: bool,
    pub(crate) faction: Faction,
    pub(crate) team: Team,
    pub(crate) steam_id: Option<u64>,
    pub(crate) profile_id: Option<u64>,
    pub(crate) messages: Vec<Message>,
    pub(crate) commands: Vec<Command>,
}

impl Player {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a person (rather than the AI) controlled this player.
    pub fn human(&self) -> bool {
        self.human
    }

    /// Faction played.
    pub fn faction(&self) -> Faction {
        self.faction
    }

    /// Side the player fought on.
    pub fn team(&self) -> Team {
        self.team
    }

    /// pbgid of the first battlegroup the player selected.
    ///
    /// Later re-selections do not change it.
    pub fn battlegroup(&self) -> Option<u32> {
        self.commands.iter().find_map(|c| match *c {
            Command::SelectBattlegroup { pbgid, .. } => Some(pbgid),
            _ => None,
        })
    }

    /// Steam identifier. Absent for AI players.
    pub fn steam_id(&self) -> Option<u64> {
        self.steam_id
    }

    /// Relic profile identifier. Absent for AI players.
    pub fn profile_id(&self) -> Option<u64> {
        self.profile_id
    }

    /// Chat messages, ordered by tick.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Commands, ordered by tick; equal ticks keep stream order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Squad construction commands, in command order.
    pub fn build_commands(&self) -> Vec<&Command> {
        self.commands.iter().filter(|c| c.is_build()).collect()
    }

    /// Battlegroup selection, unlock and use commands, in command order.
    pub fn battlegroup_commands(&self) -> Vec<&Command> {
        self.commands.iter().filter(|c| c.is_battlegroup()).collect()
    }
}

impl Mapped for Player {}

// ── Message ─────────────────────────────────────────────────────

/// One chat line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub(crate) tick: u32,
    pub(crate) text: String,
}

impl Message {
    /// Tick the message was sent at.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Message body.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Mapped for Message {}

// ── Command ─────────────────────────────────────────────────────

/// One player action.
///
/// pbgids reference external game data and may change between patches
/// for the same logical unit or ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Squad queued at a production building.
    BuildSquad {
        /// Tick the command was issued at.
        tick: u32,
        /// Squad blueprint.
        pbgid: u32,
    },
    /// Faction-wide upgrade purchased.
    BuildGlobalUpgrade {
        /// Tick the command was issued at.
        tick: u32,
        /// Upgrade blueprint.
        pbgid: u32,
    },
    /// Battlegroup chosen.
    SelectBattlegroup {
        /// Tick the command was issued at.
        tick: u32,
        /// Battlegroup blueprint.
        pbgid: u32,
    },
    /// Battlegroup ability unlocked.
    SelectBattlegroupAbility {
        /// Tick the command was issued at.
        tick: u32,
        /// Ability blueprint.
        pbgid: u32,
    },
    /// Unlocked battlegroup ability activated.
    UseBattlegroupAbility {
        /// Tick the command was issued at.
        tick: u32,
        /// Ability blueprint.
        pbgid: u32,
    },
    /// An action kind this decoder does not interpret.
    Unknown {
        /// Tick the command was issued at.
        tick: u32,
        /// Raw action-type discriminator.
        action_type: u8,
    },
}

impl Command {
    /// Tick the command was issued at.
    pub fn tick(&self) -> u32 {
        match *self {
            Self::BuildSquad { tick, .. }
            | Self::BuildGlobalUpgrade { tick, .. }
            | Self::SelectBattlegroup { tick, .. }
            | Self::SelectBattlegroupAbility { tick, .. }
            | Self::UseBattlegroupAbility { tick, .. }
            | Self::Unknown { tick, .. } => tick,
        }
    }

    /// Wire discriminator of the action kind.
    pub fn action_type(&self) -> u8 {
        match *self {
            Self::BuildSquad { .. } => ACTION_BUILD_SQUAD,
            Self::BuildGlobalUpgrade { .. } => ACTION_BUILD_GLOBAL_UPGRADE,
            Self::SelectBattlegroup { .. } => ACTION_SELECT_BATTLEGROUP,
            Self::SelectBattlegroupAbility { .. } => ACTION_SELECT_BATTLEGROUP_ABILITY,
            Self::UseBattlegroupAbility { .. } => ACTION_USE_BATTLEGROUP_ABILITY,
            Self::Unknown { action_type, .. } => action_type,
        }
    }

    /// Blueprint the command refers to. `None` for unknown kinds.
    pub fn pbgid(&self) -> Option<u32> {
        match *self {
            Self::BuildSquad { pbgid, .. }
            | Self::BuildGlobalUpgrade { pbgid, .. }
            | Self::SelectBattlegroup { pbgid, .. }
            | Self::SelectBattlegroupAbility { pbgid, .. }
            | Self::UseBattlegroupAbility { pbgid, .. } => Some(pbgid),
            Self::Unknown { .. } => None,
        }
    }

    /// Whether this is a squad construction command.
    pub fn is_build(&self) -> bool {
        matches!(self, Self::BuildSquad { .. })
    }

    /// Whether this is a battlegroup selection, unlock or use.
    pub fn is_battlegroup(&self) -> bool {
        matches!(
            self,
            Self::SelectBattlegroup { .. }
                | Self::SelectBattlegroupAbility { .. }
                | Self::UseBattlegroupAbility { .. }
        )
    }
}

impl Mapped for Command {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_player() -> Player {
        Player {
            name: "Hans".into(),
            human: true,
            faction: Faction::Wehrmacht,
            team: Team::Second,
            steam_id: Some(76_561_198_000_000_001),
            profile_id: Some(4321),
            messages: vec![Message {
                tick: 12,
                text: "glhf".into(),
            }],
            commands: vec![
                Command::SelectBattlegroup {
                    tick: 10,
                    pbgid: 2_072_430,
                },
                Command::BuildSquad {
                    tick: 20,
                    pbgid: 137_123,
                },
                Command::Unknown {
                    tick: 21,
                    action_type: 77,
                },
                Command::UseBattlegroupAbility {
                    tick: 30,
                    pbgid: 2_072_431,
                },
            ],
        }
    }

    #[test]
    fn derived_views_keep_command_order() {
        let player = sample_player();
        assert_eq!(player.build_commands(), vec![&player.commands[1]]);
        assert_eq!(
            player.battlegroup_commands(),
            vec![&player.commands[0], &player.commands[3]]
        );
    }

    #[test]
    fn command_accessors_cover_every_variant() {
        let unknown = Command::Unknown {
            tick: 5,
            action_type: 99,
        };
        assert_eq!(unknown.tick(), 5);
        assert_eq!(unknown.action_type(), 99);
        assert_eq!(unknown.pbgid(), None);
        assert!(!unknown.is_build() && !unknown.is_battlegroup());

        let upgrade = Command::BuildGlobalUpgrade { tick: 8, pbgid: 9 };
        assert_eq!(upgrade.tick(), 8);
        assert_eq!(upgrade.action_type(), ACTION_BUILD_GLOBAL_UPGRADE);
        assert_eq!(upgrade.pbgid(), Some(9));
        assert!(!upgrade.is_build() && !upgrade.is_battlegroup());

        let ability = Command::SelectBattlegroupAbility { tick: 6, pbgid: 7 };
        assert_eq!(ability.action_type(), ACTION_SELECT_BATTLEGROUP_ABILITY);
        assert_eq!(ability.pbgid(), Some(7));
        assert!(ability.is_battlegroup());
    }

    #[test]
    fn command_mapping_is_tagged_by_type() {
        let command = Command::BuildSquad {
            tick: 40,
            pbgid: 100,
        };
        let mapping = command.to_mapping().unwrap();
        assert_eq!(mapping.get("type"), Some(&Value::from("build_squad")));
        assert_eq!(mapping.get("tick"), Some(&Value::from(40)));
        assert_eq!(mapping.get("pbgid"), Some(&Value::from(100)));
        assert_eq!(Command::from_mapping(mapping).unwrap(), command);
    }

    #[test]
    fn player_mapping_round_trips_and_omits_derived_views() {
        let player = sample_player();
        let mapping = player.to_mapping().unwrap();
        assert!(!mapping.contains_key("build_commands"));
        assert!(!mapping.contains_key("battlegroup"));
        assert_eq!(mapping.get("faction"), Some(&Value::from("Wehrmacht")));
        assert_eq!(mapping.get("team"), Some(&Value::from(1)));
        assert_eq!(Player::from_mapping(mapping).unwrap(), player);
    }

    #[test]
    fn battlegroup_follows_commands_after_mapping() {
        let mut mapping = sample_player().to_mapping().unwrap();
        mapping.insert("battlegroup".into(), Value::from(1));
        let rebuilt = Player::from_mapping(mapping).unwrap();
        assert_eq!(rebuilt.battlegroup(), Some(2_072_430));

        let mut reselected = sample_player();
        reselected.commands.push(Command::SelectBattlegroup {
            tick: 40,
            pbgid: 9,
        });
        assert_eq!(reselected.battlegroup(), Some(2_072_430));

        reselected.commands.clear();
        assert_eq!(reselected.battlegroup(), None);
    }

    #[test]
    fn duration_uses_eight_ticks_per_second() {
        let replay = Replay {
            version: 10612,
            timestamp: String::new(),
            game_type: GameType::Custom,
            matchhistory_id: None,
            mod_id: Uuid::nil(),
            map: Map {
                filename: String::new(),
                localized_name_id: String::new(),
                localized_description_id: String::new(),
            },
            players: Vec::new(),
            length: 8 * 60 + 4,
        };
        assert_eq!(replay.duration(), Duration::from_millis(60_500));
    }
}
