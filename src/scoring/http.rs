use reqwest::Client;
use serde_json::Value;

use crate::{
    cli::types::{Season, Week},
    Result,
};

/// Fetch one player's realized points for a regular-season week.
///
/// A response without `fantasy_points` (or with `null`) counts as 0, which is
/// what the provider returns for players who did not play.
pub async fn fetch_player_points(
    client: &Client,
    base_url: &str,
    player_id: &str,
    season: Season,
    week: Week,
) -> Result<f64> {
    let url = format!("{}/stats/nfl/player/{}", base_url.trim_end_matches('/'), player_id);
    let params = [
        ("season", season.to_string()),
        ("season_type", "regular".to_string()),
        ("week", week.to_string()),
    ];

    let res = client
        .get(&url)
        .query(&params)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(points_from_response(&res))
}

fn points_from_response(body: &Value) -> f64 {
    match body.get("fantasy_points") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
