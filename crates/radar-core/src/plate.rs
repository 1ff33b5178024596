//! Mercosul licence plate validation.
//!
//! Every Mercosul plate is seven ASCII characters; the country is told apart
//! by where the letters and digits sit:
//! - Brazil: `ABC1D23`
//! - Argentina: `AB123CD`
//! - Paraguay: `ABCD123`
//! - Uruguay: `ABC1234`

use serde::{Deserialize, Serialize};
use std::fmt;

const PLATE_LEN: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MercosulCountry {
    #[default]
    Unknown,
    Brazil,
    Argentina,
    Paraguay,
    Uruguay,
}

impl MercosulCountry {
    pub fn is_valid(self) -> bool {
        self != MercosulCountry::Unknown
    }
}

impl fmt::Display for MercosulCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MercosulCountry::Unknown => write!(f, "Unknown"),
            MercosulCountry::Brazil => write!(f, "Brazil"),
            MercosulCountry::Argentina => write!(f, "Argentina"),
            MercosulCountry::Paraguay => write!(f, "Paraguay"),
            MercosulCountry::Uruguay => write!(f, "Uruguay"),
        }
    }
}

/// Layouts in match order. `L` is a letter, `D` a digit.
const LAYOUTS: [(MercosulCountry, &[u8; PLATE_LEN]); 4] = [
    (MercosulCountry::Brazil, b"LLLDLDD"),
    (MercosulCountry::Argentina, b"LLDDDLL"),
    (MercosulCountry::Paraguay, b"LLLLDDD"),
    (MercosulCountry::Uruguay, b"LLLDDDD"),
];

fn matches_layout(plate: &[u8], layout: &[u8; PLATE_LEN]) -> bool {
    plate.iter().zip(layout).all(|(c, kind)| match *kind {
        b'L' => c.is_ascii_alphabetic(),
        _ => c.is_ascii_digit(),
    })
}

/// Identify which Mercosul country issued `plate`.
///
/// Letters may be either case. Anything that fits no layout, including a
/// wrong length, is `Unknown`.
pub fn validate_plate(plate: &str) -> MercosulCountry {
    let bytes = plate.as_bytes();
    if bytes.len() != PLATE_LEN {
        return MercosulCountry::Unknown;
    }

    LAYOUTS
        .iter()
        .find(|(_, layout)| matches_layout(bytes, layout))
        .map(|(country, _)| *country)
        .unwrap_or_default()
}
