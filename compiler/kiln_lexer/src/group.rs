//! Bracket group kinds.

/// One of the four bracket pairs that form atomic groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Paren,
    Brace,
    Bracket,
    Angle,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::Paren, Group::Brace, Group::Bracket, Group::Angle];

    #[inline]
    pub const fn open(self) -> u8 {
        match self {
            Group::Paren => b'(',
            Group::Brace => b'{',
            Group::Bracket => b'[',
            Group::Angle => b'<',
        }
    }

    #[inline]
    pub const fn close(self) -> u8 {
        match self {
            Group::Paren => b')',
            Group::Brace => b'}',
            Group::Bracket => b']',
            Group::Angle => b'>',
        }
    }

    /// Dense index, used for per-kind depth counters.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Group::Paren => 0,
            Group::Brace => 1,
            Group::Bracket => 2,
            Group::Angle => 3,
        }
    }

    #[inline]
    pub fn from_open(byte: u8) -> Option<Group> {
        Group::ALL.into_iter().find(|g| g.open() == byte)
    }

    #[inline]
    pub fn from_close(byte: u8) -> Option<Group> {
        Group::ALL.into_iter().find(|g| g.close() == byte)
    }
}

/// Strip the outer brackets of `text` if it is a `group` token.
///
/// Only checks the first and last byte; word splitting has already
/// established balance.
pub fn unwrap_group(text: &str, group: Group) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == group.open() && bytes[bytes.len() - 1] == group.close() {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}
