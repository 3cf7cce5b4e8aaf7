//! Stage node identity.
//!
//! A node is identified by `(topology, ordinal, name)` and travels as the
//! text `topology:ordinal:name`, e.g. `1:2:A`. The name may itself contain
//! `:`; only the first two separators are structural.

use crate::diagnostics;
use crate::{DagError, Result};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

const SEP: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    topology: u32,
    ordinal: u32,
    name: Cow<'static, str>,
}

impl Node {
    /// Source sentinel shared by every topology of an expression.
    pub const START: Node = Node::sentinel("Start");

    /// Sink sentinel shared by every topology of an expression.
    pub const END: Node = Node::sentinel("End");

    const fn sentinel(name: &'static str) -> Self {
        Self {
            topology: 0,
            ordinal: 0,
            name: Cow::Borrowed(name),
        }
    }

    /// Create a stage node. Topology and ordinal start at 1; the name is
    /// trimmed and must not be blank.
    pub fn new(topology: u32, ordinal: u32, name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if topology == 0 {
            return Err(DagError::malformed(format!(
                "node topology must be greater than 0: {}",
                name
            )));
        }
        if ordinal == 0 {
            return Err(DagError::malformed(format!(
                "node ordinal must be greater than 0: {}",
                name
            )));
        }
        if name.is_empty() {
            return Err(DagError::malformed(format!(
                "node name cannot be blank: {}:{}",
                topology, ordinal
            )));
        }
        Ok(Self {
            topology,
            ordinal,
            name: Cow::Owned(name.to_string()),
        })
    }

    pub fn topology(&self) -> u32 {
        self.topology
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_start(&self) -> bool {
        *self == Self::START
    }

    pub fn is_end(&self) -> bool {
        *self == Self::END
    }

    pub fn is_start_or_end(&self) -> bool {
        self.is_start() || self.is_end()
    }

    /// Same topology and ordinal, different name.
    pub fn renamed(&self, name: impl AsRef<str>) -> Result<Self> {
        Self::new(self.topology, self.ordinal, name)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEP}{}{SEP}{}", self.topology, self.ordinal, self.name)
    }
}

impl FromStr for Node {
    type Err = DagError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, SEP);
        let (Some(topology), Some(ordinal), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DagError::malformed(diagnostics::error_message(
                "node must look like topology:ordinal:name",
                s,
            )));
        };

        let number = |part: &str, what: &str| {
            part.trim().parse::<u32>().map_err(|_| {
                DagError::malformed(diagnostics::error_message(
                    format!("bad node {} {:?}", what, part),
                    s,
                ))
            })
        };
        let topology = number(topology, "topology")?;
        let ordinal = number(ordinal, "ordinal")?;

        for sentinel in [Self::START, Self::END] {
            if topology == sentinel.topology && ordinal == sentinel.ordinal && name == sentinel.name {
                return Ok(sentinel);
            }
        }
        Self::new(topology, ordinal, name)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sentinels_round_trip_to_themselves() {
        assert_eq!(Node::START.to_string(), "0:0:Start");
        assert_eq!(Node::END.to_string(), "0:0:End");
        assert!("0:0:Start".parse::<Node>().unwrap().is_start());
        assert!("0:0:End".parse::<Node>().unwrap().is_end());
    }

    #[test]
    fn name_keeps_extra_colons() {
        let node: Node = "1:1:test:ANY".parse().unwrap();
        assert_eq!(node.name(), "test:ANY");
        assert_eq!(node.to_string(), "1:1:test:ANY");
    }

    #[test]
    fn round_trip() {
        for node in [
            Node::new(1, 1, "A").unwrap(),
            Node::new(3, 12, "Load Orders").unwrap(),
            Node::new(2, 1, "x:y").unwrap(),
            Node::START,
            Node::END,
        ] {
            assert_eq!(node.to_string().parse::<Node>().unwrap(), node);
        }
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(Node::new(1, 1, "  A ").unwrap().name(), "A");
    }

    #[test]
    fn rejects_zero_and_blank() {
        assert!(Node::new(0, 1, "A").is_err());
        assert!(Node::new(1, 0, "A").is_err());
        assert!(Node::new(1, 1, "   ").is_err());
        assert!("0:0:Other".parse::<Node>().is_err());
        assert!("1:1:".parse::<Node>().is_err());
        assert!("1:x:A".parse::<Node>().is_err());
        assert!("A".parse::<Node>().is_err());
        assert!("-1:1:A".parse::<Node>().is_err());
    }

    #[test]
    fn serde_uses_the_text_form() {
        let node = Node::new(2, 3, "B").unwrap();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#""2:3:B""#);
        assert_eq!(serde_json::from_str::<Node>(&json).unwrap(), node);
    }
}
