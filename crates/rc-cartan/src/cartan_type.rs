//! Normalized Cartan types.
//!
//! A [`CartanType`] can only be built through validating constructors, so two
//! values compare equal exactly when they describe the same root system.

use std::fmt;
use std::str::FromStr;

use crate::error::{CartanError, Result};
use crate::matrix::{self, CartanMatrix};

/// Letter of a Cartan type family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    /// Parse a family letter (case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            _ => None,
        }
    }

    /// The family letter as an uppercase character.
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A normalized Cartan type: family letter, rank parameter and affine twist.
///
/// `twist` is `None` for finite types, `Some(1)` for untwisted affine types
/// and `Some(2)` for the twisted type `A_{2n}^{(2)}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartanType {
    letter: Letter,
    n: usize,
    twist: Option<u8>,
}

impl CartanType {
    /// A finite Cartan type.
    pub fn finite(letter: Letter, n: usize) -> Result<Self> {
        Self::from_parts(letter, n, None)
    }

    /// An untwisted affine Cartan type `X_n^{(1)}`.
    pub fn affine(letter: Letter, n: usize) -> Result<Self> {
        Self::from_parts(letter, n, Some(1))
    }

    /// Validate and build a Cartan type.
    pub fn from_parts(letter: Letter, n: usize, twist: Option<u8>) -> Result<Self> {
        let rank_ok = match (letter, twist) {
            (Letter::A, None | Some(1)) => n >= 1,
            (Letter::B, None) => n >= 2,
            (Letter::B, Some(1)) => n >= 3,
            (Letter::C, None | Some(1)) => n >= 2,
            (Letter::D, None) => n >= 3,
            (Letter::D, Some(1)) => n >= 4,
            (Letter::E, None | Some(1)) => (6..=8).contains(&n),
            (Letter::F, None | Some(1)) => n == 4,
            (Letter::G, None | Some(1)) => n == 2,
            (Letter::A, Some(2)) => n >= 2 && n % 2 == 0,
            (_, Some(twist)) => {
                return Err(CartanError::UnsupportedTwist {
                    letter: letter.as_char(),
                    rank: n,
                    twist,
                })
            }
        };
        if !rank_ok {
            return Err(CartanError::InvalidRank {
                letter: letter.as_char(),
                rank: n,
            });
        }
        Ok(Self { letter, n, twist })
    }

    /// Family letter.
    pub const fn letter(&self) -> Letter {
        self.letter
    }

    /// Rank parameter appearing in the name (`n` in `A_n^{(1)}`).
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Affine twist, `None` for finite types.
    pub const fn twist(&self) -> Option<u8> {
        self.twist
    }

    pub const fn is_finite(&self) -> bool {
        self.twist.is_none()
    }

    pub const fn is_affine(&self) -> bool {
        self.twist.is_some()
    }

    /// Whether this is the twisted type `A_{2n}^{(2)}`.
    pub const fn is_a2_even(&self) -> bool {
        matches!((self.letter, self.twist), (Letter::A, Some(2)))
    }

    /// Whether every bond of the Dynkin diagram is simple.
    ///
    /// Agrees with [`CartanMatrix::is_symmetric`] on every supported type.
    pub const fn is_simply_laced(&self) -> bool {
        matches!(
            (self.letter, self.twist),
            (Letter::A | Letter::D | Letter::E, None | Some(1))
        )
    }

    /// Number of nodes of the Dynkin diagram.
    pub const fn rank(&self) -> usize {
        match self.twist {
            None => self.n,
            Some(1) => self.n + 1,
            // A_{2m}^{(2)} has nodes 0..=m
            Some(_) => self.n / 2 + 1,
        }
    }

    /// Label of the first node: 1 for finite types, 0 for affine ones.
    pub const fn first_node(&self) -> usize {
        if self.is_finite() {
            1
        } else {
            0
        }
    }

    /// Node labels in order.
    pub fn index_set(&self) -> Vec<usize> {
        let first = self.first_node();
        (first..first + self.rank()).collect()
    }

    /// Position of a node label in the index set.
    pub fn position(&self, node: usize) -> Option<usize> {
        node.checked_sub(self.first_node())
            .filter(|&position| position < self.rank())
    }

    /// Like [`position`](Self::position), but an unknown label is an error.
    pub fn try_position(&self, node: usize) -> Result<usize> {
        self.position(node).ok_or(CartanError::UnknownNode {
            node,
            cartan_type: *self,
        })
    }

    /// Node label at a position of the index set.
    pub fn node(&self, position: usize) -> Option<usize> {
        (position < self.rank()).then(|| position + self.first_node())
    }

    /// The Cartan matrix, rows and columns ordered by the index set.
    pub fn cartan_matrix(&self) -> CartanMatrix {
        matrix::for_type(self)
    }
}

impl fmt::Display for CartanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.twist {
            None => write!(f, "['{}', {}]", self.letter, self.n),
            Some(twist) => write!(f, "['{}', {}, {}]", self.letter, self.n, twist),
        }
    }
}

impl FromStr for CartanType {
    type Err = CartanError;

    /// Accepts `"A3"`, `"A3~"`, `"A_3^(1)"`, `"A4^2"` and `"['A', 3, 1]"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('[') {
            parse_listed(s)
        } else {
            parse_compact(s)
        }
    }
}

impl TryFrom<&str> for CartanType {
    type Error = CartanError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<(char, usize)> for CartanType {
    type Error = CartanError;

    fn try_from((letter, n): (char, usize)) -> Result<Self> {
        Self::finite(letter_from_char(letter)?, n)
    }
}

impl TryFrom<(char, usize, u8)> for CartanType {
    type Error = CartanError;

    fn try_from((letter, n, twist): (char, usize, u8)) -> Result<Self> {
        Self::from_parts(letter_from_char(letter)?, n, Some(twist))
    }
}

fn letter_from_char(c: char) -> Result<Letter> {
    Letter::from_char(c).ok_or(CartanError::UnknownLetter(c))
}

fn parse_listed(s: &str) -> Result<CartanType> {
    let parse_err = || CartanError::Parse(s.to_string());
    let inner = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(parse_err)?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

    let letter_token = |token: &str| -> Result<Letter> {
        let token = token.trim_matches(|c| c == '\'' || c == '"');
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => letter_from_char(c),
            _ => Err(parse_err()),
        }
    };

    match parts.as_slice() {
        [letter, n] => {
            let n = n.parse().map_err(|_| parse_err())?;
            CartanType::finite(letter_token(letter)?, n)
        }
        [letter, n, twist] => {
            let n = n.parse().map_err(|_| parse_err())?;
            let twist = twist.parse().map_err(|_| parse_err())?;
            CartanType::from_parts(letter_token(letter)?, n, Some(twist))
        }
        _ => Err(parse_err()),
    }
}

fn parse_compact(s: &str) -> Result<CartanType> {
    let parse_err = || CartanError::Parse(s.to_string());
    let mut chars = s.chars();
    let letter = letter_from_char(chars.next().ok_or_else(parse_err)?)?;
    let rest = chars.as_str();
    let rest = rest.strip_prefix('_').unwrap_or(rest);

    let (n, twist) = if let Some(n) = rest.strip_suffix('~') {
        (n, Some(1))
    } else if let Some((n, twist)) = rest.split_once('^') {
        let twist = twist.trim_start_matches('(').trim_end_matches(')');
        (n, Some(twist.parse().map_err(|_| parse_err())?))
    } else {
        (rest, None)
    };

    let n = n.trim().parse().map_err(|_| parse_err())?;
    CartanType::from_parts(letter, n, twist)
}
