use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Display, str::FromStr};
use thiserror::Error;

/// Background color of an event, restricted to the palette offered by the
/// event form. Transmitted as the hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Green,
    Yellow,
    Red,
    LightGreen,
    Purple,
    Pink,
}

pub const PALETTE: [Color; 6] = [
    Color::Green,
    Color::Yellow,
    Color::Red,
    Color::LightGreen,
    Color::Purple,
    Color::Pink,
];

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Green => "#15803d",
            Self::Yellow => "#FFC876",
            Self::Red => "#FF776F",
            Self::LightGreen => "#7ADB78",
            Self::Purple => "#858DFF",
            Self::Pink => "#FF98E2",
        }
    }
}

impl Default for Color {
    // Color the backend assigns to generated events
    fn default() -> Self {
        Self::Red
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Color `{0}` is not part of the event palette")]
pub struct InvalidColorError(pub String);

impl FromStr for Color {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PALETTE
            .iter()
            .find(|color| color.hex().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| InvalidColorError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex().to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex())
    }
}
