//! `gaffer compare`: two players head to head.

use tabled::Tabled;

use super::{output, CompareArgs};
use crate::app::Advisor;
use crate::domain::score::PlayerScore;
use crate::domain::PlayerId;
use crate::error::Result;

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "Club")]
    club: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Form")]
    form: String,
    #[tabled(rename = "Season")]
    total_points: i32,
    #[tabled(rename = "Own %")]
    ownership: String,
    #[tabled(rename = "Overall")]
    overall: String,
}

impl From<&PlayerScore> for ScoreRow {
    fn from(score: &PlayerScore) -> Self {
        Self {
            name: score.name.clone(),
            position: score.position.to_string(),
            club: score.club.clone(),
            cost: output::money(i64::from(score.cost)),
            points: output::points(score.points),
            value: format!("{:.2}", score.value),
            form: format!("{:.1}", score.form),
            total_points: score.total_points,
            ownership: format!("{:.1}", score.ownership),
            overall: format!("{:.2}", score.overall),
        }
    }
}

pub async fn execute(advisor: &Advisor, args: &CompareArgs) -> Result<()> {
    let comparison = advisor
        .compare(PlayerId::new(args.first), PlayerId::new(args.second), args.horizon)
        .await?;

    if output::is_json() {
        return output::json_output(&comparison);
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("Over {} gameweek(s)", args.horizon));
    output::table([&comparison.first, &comparison.second].map(ScoreRow::from));

    let better = if comparison.better == comparison.first.id {
        &comparison.first
    } else {
        &comparison.second
    };
    output::success(&format!(
        "{} edges it by {:.2}",
        output::highlight(&better.name),
        comparison.difference
    ));

    Ok(())
}
