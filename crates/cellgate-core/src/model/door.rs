// ── Door state vocabulary ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// HomeKit door state.
///
/// Used for both `CurrentDoorState` and `TargetDoorState`; the target
/// characteristic only ever carries `Open` or `Closed` on the wire, but a
/// controller may send any code and the adapter must cope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DoorState {
    Open,
    Closed,
    Opening,
    Closing,
    Stopped,
}

impl DoorState {
    /// HomeKit wire code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Closed => 1,
            Self::Opening => 2,
            Self::Closing => 3,
            Self::Stopped => 4,
        }
    }

    /// Decode a HomeKit wire code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Closed),
            2 => Some(Self::Opening),
            3 => Some(Self::Closing),
            4 => Some(Self::Stopped),
            _ => None,
        }
    }
}

impl From<DoorState> for u8 {
    fn from(state: DoorState) -> Self {
        state.code()
    }
}
