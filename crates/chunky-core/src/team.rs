//! Team assignment.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The side a player fought on. Only head-to-head matches are
/// supported, so there are exactly two teams.
///
/// Serializes as its integer value (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum Team {
    /// Team 0.
    First,
    /// Team 1.
    Second,
}

impl Team {
    /// Integer value of the team as stored in the replay.
    pub fn value(self) -> u32 {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl From<Team> for u32 {
    fn from(team: Team) -> u32 {
        team.value()
    }
}

impl TryFrom<u32> for Team {
    type Error = ValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::First),
            1 => Ok(Self::Second),
            _ => Err(ValueError::UnknownTeam { value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wire_values_round_trip() {
        for team in [Team::First, Team::Second] {
            assert_eq!(Team::try_from(team.value()), Ok(team));
        }
    }

    #[test]
    fn third_team_is_rejected() {
        assert_eq!(Team::try_from(2), Err(ValueError::UnknownTeam { value: 2 }));
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Team::Second).unwrap(), "1");
        let team: Team = serde_json::from_str("0").unwrap();
        assert_eq!(team, Team::First);
        assert!(serde_json::from_str::<Team>("5").is_err());
    }

    proptest! {
        #[test]
        fn only_zero_and_one_are_teams(value in 2u32..) {
            prop_assert_eq!(Team::try_from(value), Err(ValueError::UnknownTeam { value }));
        }
    }
}
