//! HUD components and systems (score and last outcome display)

use bevy::prelude::*;

use crate::game::GameState;
use crate::scoring::{Score, ShotOutcome, SideStats};

/// Score line text component
#[derive(Component)]
pub struct ScoreText;

/// Last make/miss text component
#[derive(Component)]
pub struct OutcomeText;

fn side_line(label: &str, stats: &SideStats) -> String {
    format!(
        "{} {}  (FG {}/{}, 3PT {}/{})",
        label,
        stats.points,
        stats.field_goals_made,
        stats.field_goals_attempted,
        stats.three_pointers_made,
        stats.three_pointers_attempted,
    )
}

/// One-line scoreboard for both halves
pub fn score_line(score: &Score) -> String {
    format!(
        "{}  |  {}",
        side_line("Left", &score.left),
        side_line("Right", &score.right)
    )
}

pub fn outcome_line(outcome: Option<ShotOutcome>) -> String {
    match outcome {
        Some(ShotOutcome::Made {
            points,
            three_point: true,
            ..
        }) => format!("Three! +{}", points),
        Some(ShotOutcome::Made { points, .. }) => format!("Made! +{}", points),
        Some(ShotOutcome::Missed) => "Miss".to_string(),
        None => String::new(),
    }
}

/// Update score display
pub fn update_score_text(game: Res<GameState>, mut text_query: Query<&mut Text, With<ScoreText>>) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = score_line(&game.score);
}

/// Update last outcome display
pub fn update_outcome_text(
    game: Res<GameState>,
    mut text_query: Query<&mut Text, With<OutcomeText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = outcome_line(game.last_outcome);
}
