//! `gaffer values`: points-per-cost rankings.

use tabled::Tabled;

use super::{output, ValuesArgs};
use crate::app::Advisor;
use crate::domain::score::ValuePick;
use crate::error::Result;

#[derive(Tabled)]
struct ValueRow {
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
}

impl From<&ValuePick> for ValueRow {
    fn from(pick: &ValuePick) -> Self {
        Self {
            name: pick.name.clone(),
            position: pick.position.to_string(),
            club: pick.club.clone(),
            cost: output::money(i64::from(pick.cost)),
            points: output::points(pick.points),
            value: format!("{:.2}", pick.value),
            form: format!("{:.1}", pick.form),
        }
    }
}

pub async fn execute(advisor: &Advisor, args: &ValuesArgs) -> Result<()> {
    let position = args.position.map(Into::into);
    let picks = advisor.values(position, args.limit).await?;

    if output::is_json() {
        return output::json_output(&picks);
    }

    output::header(env!("CARGO_PKG_VERSION"));
    let title = match position {
        Some(position) => format!("Best value {}", position.plural().to_lowercase()),
        None => "Best value players".to_string(),
    };
    output::section(&title);

    if picks.is_empty() {
        output::note("No selectable players");
        return Ok(());
    }
    output::table(picks.iter().map(ValueRow::from));

    Ok(())
}
