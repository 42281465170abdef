//! Shared fixtures for unit tests.

use crate::models::{Player, PlayerAttributes, Position, Team};

const FIELD: [Position; 9] = [
    Position::C,
    Position::FirstBase,
    Position::SecondBase,
    Position::ThirdBase,
    Position::SS,
    Position::LF,
    Position::CF,
    Position::RF,
    Position::DH,
];

/// Nine hitters in lineup order plus one starting pitcher, all at `strength`.
pub(crate) fn sample_team(id: &str, strength: u8) -> Team {
    let mut team = Team::new(id, format!("Team {}", id.to_uppercase()));
    team.abbreviation = id.to_uppercase();

    for (slot, pos) in FIELD.iter().enumerate() {
        let player = Player::new(
            format!("{id}-b{slot}"),
            "Hitter",
            format!("{}{}", id.to_uppercase(), slot),
            *pos,
            PlayerAttributes::uniform(strength),
        );
        team.lineup.push(player.id.clone());
        team.roster.push(player);
    }

    let ace = Player::new(
        format!("{id}-sp"),
        "Starter",
        format!("{}Ace", id.to_uppercase()),
        Position::P,
        PlayerAttributes::uniform(strength),
    );
    team.rotation.push(ace.id.clone());
    team.roster.push(ace);
    team
}

pub(crate) fn team_without_roster(id: &str) -> Team {
    Team::new(id, format!("Team {}", id.to_uppercase()))
}

pub(crate) fn sample_league(count: usize) -> Vec<Team> {
    (0..count).map(|i| sample_team(&format!("t{i}"), 50)).collect()
}
