//! Каталог таблиц приложения. Порядок = порядок кнопок в панели табов.

use crate::grid::api::{Align, CellFormat, ColumnDef, HeaderFilterKind};

use super::definition::ViewDefinition;

pub fn player_props() -> ViewDefinition {
    ViewDefinition::new("table0", "Player Props", "player_props")
        .columns(vec![
            ColumnDef::text("Player Name"),
            ColumnDef::text("Team").filter(HeaderFilterKind::MultiSelect),
            ColumnDef::text("Prop").filter(HeaderFilterKind::MultiSelect),
            ColumnDef::text("Split").filter(HeaderFilterKind::MultiSelect),
            ColumnDef::numeric("Line", CellFormat::Decimal(1)),
            ColumnDef::numeric("Over Odds", CellFormat::AmericanOdds).title("Over"),
            ColumnDef::numeric("Under Odds", CellFormat::AmericanOdds).title("Under"),
            ColumnDef::numeric("Hit Rate", CellFormat::Percent).title("Hit %"),
            ColumnDef::numeric("Games", CellFormat::Integer).title("GP"),
        ])
        .key_fields(&["Player Name", "Team", "Prop", "Split"])
        .expand_on("Player Name")
        .cluster(&["Over Odds", "Under Odds"])
        .fill("Player Name")
}

pub fn team_totals() -> ViewDefinition {
    ViewDefinition::new("table1", "Team Totals", "team_totals")
        .columns(vec![
            ColumnDef::text("Team"),
            ColumnDef::text("Opponent").filter(HeaderFilterKind::MultiSelect),
            ColumnDef::text("Split").filter(HeaderFilterKind::MultiSelect),
            ColumnDef::numeric("Total", CellFormat::Decimal(1)),
            ColumnDef::numeric("Over Odds", CellFormat::AmericanOdds).title("Over"),
            ColumnDef::numeric("Under Odds", CellFormat::AmericanOdds).title("Under"),
            ColumnDef::numeric("Avg Points", CellFormat::Decimal(1)).title("Avg"),
            ColumnDef::numeric("Over Rate", CellFormat::Percent).title("Over %"),
        ])
        .key_fields(&["Team", "Opponent", "Split"])
        .expand_on("Team")
        .cluster(&["Over Odds", "Under Odds"])
        .cluster(&["Avg Points", "Over Rate"])
        .fill("Team")
}

pub fn game_lines() -> ViewDefinition {
    ViewDefinition::new("table2", "Game Lines", "game_lines")
        .columns(vec![
            ColumnDef::text("Matchup"),
            ColumnDef::text("Date").filter(HeaderFilterKind::MultiSelect),
            ColumnDef::numeric("Spread", CellFormat::Decimal(1)),
            ColumnDef::numeric("Home ML", CellFormat::AmericanOdds).title("Home"),
            ColumnDef::numeric("Away ML", CellFormat::AmericanOdds).title("Away"),
            ColumnDef::numeric("Total", CellFormat::Decimal(1)),
            ColumnDef::text("Book")
                .filter(HeaderFilterKind::MultiSelect)
                .align(Align::Center),
        ])
        .key_fields(&["Matchup", "Date", "Book"])
        .expand_on("Matchup")
        .cluster(&["Home ML", "Away ML"])
        .fill("Matchup")
}

pub fn all_views() -> Vec<ViewDefinition> {
    vec![player_props(), team_totals(), game_lines()]
}
