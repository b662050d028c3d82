//! Identity of a single physical unit of an item.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between the item id and the sequence number in the string form.
pub const INSTANCE_SEPARATOR: char = ':';

/// One physical unit of an item type.
///
/// The string form `<item_id>:<sequence>` only exists where identity has to
/// travel through a string, such as ids handed to the embedded library or
/// serialized results. Item ids may themselves contain the separator, so
/// parsing splits on the last occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId {
    /// Identifier of the item type.
    pub item_id: String,
    /// Per-item sequence number.
    pub sequence: u32,
}

impl InstanceId {
    /// Creates a new instance id.
    pub fn new(item_id: impl Into<String>, sequence: u32) -> Self {
        Self {
            item_id: item_id.into(),
            sequence,
        }
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.item_id, INSTANCE_SEPARATOR, self.sequence)
    }
}

/// Error parsing an [`InstanceId`] from its string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed instance id '{0}'")]
pub struct ParseInstanceIdError(String);

impl FromStr for InstanceId {
    type Err = ParseInstanceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item_id, sequence) = s
            .rsplit_once(INSTANCE_SEPARATOR)
            .ok_or_else(|| ParseInstanceIdError(s.to_string()))?;
        let sequence = sequence
            .parse()
            .map_err(|_| ParseInstanceIdError(s.to_string()))?;
        Ok(Self::new(item_id, sequence))
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InstanceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
