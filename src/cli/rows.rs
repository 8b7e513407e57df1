//! Table rows shared by several commands.

use tabled::Tabled;

use super::output;
use crate::optimizer::PickedPlayer;

#[derive(Tabled)]
pub(crate) struct PlayerRow {
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
}

impl From<&PickedPlayer> for PlayerRow {
    fn from(player: &PickedPlayer) -> Self {
        Self {
            name: player.name.clone(),
            position: player.position.to_string(),
            club: player.club.clone(),
            cost: output::money(i64::from(player.cost)),
            points: output::points(player.points),
        }
    }
}
