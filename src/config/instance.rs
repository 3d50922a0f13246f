use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Access mode the database is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstanceType {
    ReadOnly,
    #[default]
    ReadWrite,
}

impl InstanceType {
    pub fn as_str(self) -> &'static str {
        match self {
            InstanceType::ReadOnly => "READONLY",
            InstanceType::ReadWrite => "R/W",
        }
    }

    pub fn is_read_write(self) -> bool {
        self == InstanceType::ReadWrite
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInstanceType(pub String);

impl fmt::Display for InvalidInstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid instance type {:?}, must be READONLY or R/W",
            self.0
        )
    }
}

impl std::error::Error for InvalidInstanceType {}

impl FromStr for InstanceType {
    type Err = InvalidInstanceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READONLY" => Ok(InstanceType::ReadOnly),
            "R/W" => Ok(InstanceType::ReadWrite),
            _ => Err(InvalidInstanceType(s.to_string())),
        }
    }
}

impl Serialize for InstanceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InstanceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
