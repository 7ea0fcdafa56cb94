//! Zone tags. Each zone owns one config list; zones on the same axis are
//! mutually exclusive at any instant, different axes are independent.

use crate::error::{GravityError, Result};
use std::fmt::Debug;
use std::hash::Hash;

/// A zone family usable as a [`crate::ConfigSet`] key.
pub trait Zone: Copy + Eq + Hash + Ord + Debug + 'static {
    /// Every zone in the family, in reset order.
    const ALL: &'static [Self];

    /// Stable settings/observer key, e.g. `"UP_L"`.
    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|z| z.key() == key)
    }

    fn parse(key: &str) -> Result<Self> {
        Self::from_key(key).ok_or_else(|| GravityError::UnknownZone(key.to_string()))
    }
}

/// Six-way family used by pose morphs and gravity physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Down,
    Up,
    Back,
    Forward,
    Left,
    Right,
}

impl Zone for Direction {
    const ALL: &'static [Self] = &[
        Direction::Down,
        Direction::Up,
        Direction::Back,
        Direction::Forward,
        Direction::Left,
        Direction::Right,
    ];

    fn key(self) -> &'static str {
        match self {
            Direction::Down => "DOWN",
            Direction::Up => "UP",
            Direction::Back => "BACK",
            Direction::Forward => "FORWARD",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

/// Per-side family used by positional-difference morphs.
///
/// `_L`/`_R` address one side, `_C` the average of both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SideDirection {
    UpL,
    UpR,
    UpC,
    BackL,
    BackR,
    BackC,
    ForwardL,
    ForwardR,
    ForwardC,
    LeftL,
    LeftR,
    RightL,
    RightR,
}

impl Zone for SideDirection {
    const ALL: &'static [Self] = &[
        SideDirection::UpL,
        SideDirection::UpR,
        SideDirection::UpC,
        SideDirection::BackL,
        SideDirection::BackR,
        SideDirection::BackC,
        SideDirection::ForwardL,
        SideDirection::ForwardR,
        SideDirection::ForwardC,
        SideDirection::LeftL,
        SideDirection::LeftR,
        SideDirection::RightL,
        SideDirection::RightR,
    ];

    fn key(self) -> &'static str {
        match self {
            SideDirection::UpL => "UP_L",
            SideDirection::UpR => "UP_R",
            SideDirection::UpC => "UP_C",
            SideDirection::BackL => "BACK_L",
            SideDirection::BackR => "BACK_R",
            SideDirection::BackC => "BACK_C",
            SideDirection::ForwardL => "FORWARD_L",
            SideDirection::ForwardR => "FORWARD_R",
            SideDirection::ForwardC => "FORWARD_C",
            SideDirection::LeftL => "LEFT_L",
            SideDirection::LeftR => "LEFT_R",
            SideDirection::RightL => "RIGHT_L",
            SideDirection::RightR => "RIGHT_R",
        }
    }
}
