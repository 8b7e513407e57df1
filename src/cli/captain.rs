//! `gaffer captain`: captaincy picks for a manager's squad.

use tabled::Tabled;

use super::output;
use crate::app::{Advice, Advisor};
use crate::error::Result;
use crate::optimizer::captain::CaptainCandidate;
use crate::optimizer::CaptainPick;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "Pos")]
    position: String,
    #[tabled(rename = "Club")]
    club: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Ceiling")]
    ceiling: String,
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "FDR")]
    difficulty: String,
    #[tabled(rename = "Own %")]
    ownership: String,
}

impl From<&CaptainCandidate> for CandidateRow {
    fn from(c: &CaptainCandidate) -> Self {
        Self {
            name: c.player.name.clone(),
            position: c.player.position.to_string(),
            club: c.player.club.clone(),
            points: output::points(c.player.points),
            ceiling: output::points(c.ceiling),
            floor: output::points(c.floor),
            difficulty: format!("{:.1}", c.fixture_difficulty),
            ownership: format!("{:.1}", c.ownership),
        }
    }
}

pub async fn execute(advisor: &Advisor, team: u32) -> Result<()> {
    let pb = output::spinner("Ranking captains");
    let advice = advisor.captain(team).await;
    output::spinner_done(&pb);
    let advice = advice?;

    if output::is_json() {
        return output::json_output(&advice);
    }

    let pick = match advice {
        Advice::Ready(pick) => pick,
        Advice::Unavailable { message } => {
            output::warning(&message);
            return Ok(());
        }
    };

    output::header(env!("CARGO_PKG_VERSION"));
    render(&pick);
    Ok(())
}

pub(super) fn render(pick: &CaptainPick) {
    output::section("Top options");
    output::table(pick.top_options.iter().map(CandidateRow::from));

    output::section("Armband");
    output::field("Captain", output::highlight(&pick.captain.player.name));
    output::field("Vice", &pick.vice_captain.player.name);
    output::note(&pick.reasoning);

    if let Some(diff) = &pick.differential {
        output::section("Differential");
        output::field(
            "Player",
            format!(
                "{} ({:.1}% owned)",
                diff.candidate.player.name, diff.candidate.ownership
            ),
        );
        output::note(&diff.reasoning);
    }
}
