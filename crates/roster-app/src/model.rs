// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// The two supported arrangements for the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    Grid,
    Tile,
}

impl LayoutKind {
    pub const ALL: [Self; 2] = [Self::Grid, Self::Tile];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Tile => "tile",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(Self::Grid),
            "tile" => Some(Self::Tile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

/// One directory entry as returned by the remote source. Immutable after
/// fetch; the application never writes records back anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub website: String,
    pub company_name: String,
    pub address: PostalAddress,
}

#[cfg(test)]
mod tests {
    use super::LayoutKind;

    #[test]
    fn layout_labels_round_trip() {
        for layout in LayoutKind::ALL {
            assert_eq!(LayoutKind::parse(layout.label()), Some(layout));
        }
    }

    #[test]
    fn layout_parse_rejects_unknown_value() {
        assert_eq!(LayoutKind::parse("list"), None);
    }
}
