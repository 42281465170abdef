use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    /// Visitors bat in the top half.
    pub fn batting_side(self) -> Side {
        match self {
            Half::Top => Side::Away,
            Half::Bottom => Side::Home,
        }
    }
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Half::Top => f.write_str("Top"),
            Half::Bottom => f.write_str("Bottom"),
        }
    }
}

/// Home/away pair of anything tracked per team during a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BySide<T> {
    pub home: T,
    pub away: T,
}

impl<T> BySide<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// First, second and third base, each empty or holding a runner's player id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Bases([Option<String>; 3]);

impl Bases {
    pub const COUNT: usize = 3;

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from an explicit first/second/third layout.
    pub fn from_runners(first: Option<&str>, second: Option<&str>, third: Option<&str>) -> Self {
        Self([first.map(Into::into), second.map(Into::into), third.map(Into::into)])
    }

    pub fn runner(&self, base: usize) -> Option<&str> {
        self.0.get(base).and_then(|r| r.as_deref())
    }

    pub fn is_occupied(&self, base: usize) -> bool {
        self.runner(base).is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.0.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    pub(crate) fn take(&mut self, base: usize) -> Option<String> {
        self.0[base].take()
    }

    pub(crate) fn put(&mut self, base: usize, runner: String) {
        self.0[base] = Some(runner);
    }
}

impl fmt::Display for Bases {
    /// Compact diamond notation, e.g. `1-3` for runners on the corners.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        let occupied: Vec<String> = (0..Self::COUNT)
            .filter(|&b| self.is_occupied(b))
            .map(|b| (b + 1).to_string())
            .collect();
        f.write_str(&occupied.join("-"))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamGameCounters {
    pub hits: u32,
    /// Defensive play is not simulated, so this stays at zero unless a caller
    /// seeds it.
    pub errors: u32,
}

/// Transient per-match state. Each half-inning produces a fresh value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub inning: u8,
    pub half: Half,
    pub outs: u8,
    pub balls: u8,
    pub strikes: u8,
    pub bases: Bases,
    pub score: BySide<u32>,
    /// Runs per inning, index 0 = first inning.
    pub score_by_inning: BySide<Vec<u32>>,
    pub stats: BySide<TeamGameCounters>,
    /// Next batting-order slot per team. Carried across innings.
    pub batting_cursor: BySide<usize>,
    pub log: Vec<String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            inning: 1,
            half: Half::Top,
            outs: 0,
            balls: 0,
            strikes: 0,
            bases: Bases::empty(),
            score: BySide::default(),
            score_by_inning: BySide::default(),
            stats: BySide::default(),
            batting_cursor: BySide::default(),
            log: Vec::new(),
        }
    }

    pub fn batting_side(&self) -> Side {
        self.half.batting_side()
    }
}
