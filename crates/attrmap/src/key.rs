use crate::string::is_identifier;
use crate::AttrStr;
use std::fmt::{self, Display, Formatter};

/// Hashable mapping key.
#[derive(Debug, Clone, PartialEq, Hash, Ord, Eq, PartialOrd)]
pub enum Key {
    Str(AttrStr),
    Int(i64),
    Bool(bool),
}

impl Key {
    pub fn name(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Keys that attribute access can reach: identifier strings only.
    pub fn is_identifier(&self) -> bool {
        self.name().is_some_and(is_identifier)
    }

    pub fn to_astr(&self) -> AttrStr {
        match self {
            Key::Str(s) => s.clone(),
            _ => self.to_string().into(),
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{}", s),
            Key::Int(i) => write!(f, "{}", i),
            Key::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Key {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Key {
        Key::Int(i as i64)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Key {
        Key::Bool(b)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Key {
        Key::Str(s.into())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Key {
        Key::Str(s.into())
    }
}

impl From<AttrStr> for Key {
    fn from(s: AttrStr) -> Key {
        Key::Str(s)
    }
}

impl From<&AttrStr> for Key {
    fn from(s: &AttrStr) -> Key {
        Key::Str(s.clone())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Key {
        k.clone()
    }
}
