//! Strongly-typed identifiers.

use std::fmt;

/// Zero-based position of a player in the replay roster.
///
/// Assigned in file order while the roster is decoded and used as the
/// join key between the roster and the command/message streams. It is
/// never derived from a player's name or platform identifiers, which are
/// neither unique nor always present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerOrdinal(pub u32);

impl PlayerOrdinal {
    /// The ordinal as a roster index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for PlayerOrdinal {
    fn from(v: u8) -> Self {
        Self(u32::from(v))
    }
}

impl From<u32> for PlayerOrdinal {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_from_wire_widths_agree() {
        assert_eq!(PlayerOrdinal::from(7u8), PlayerOrdinal::from(7u32));
        assert_eq!(PlayerOrdinal(7).index(), 7);
    }

    #[test]
    fn ordinals_order_by_position() {
        let mut ordinals = vec![PlayerOrdinal(3), PlayerOrdinal(0), PlayerOrdinal(1)];
        ordinals.sort();
        assert_eq!(ordinals, vec![PlayerOrdinal(0), PlayerOrdinal(1), PlayerOrdinal(3)]);
        assert_eq!(PlayerOrdinal(3).to_string(), "3");
    }
}
