use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::archive::{ChampionId, Lane};

use super::join::ParticipantItem;

/// Career accumulator for one player.
///
/// `combine` is field-wise addition, so any grouping or ordering of the
/// per-match snapshots folds to the same totals. `Default` is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_name: String,
    pub games: u64,
    pub wins: u64,
    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub gold_earned: u64,
    pub creep_score: u64,
    pub vision_score: u64,
    pub damage_to_champions: u64,
    pub wards_placed: u64,
    pub first_bloods: u64,
    /// Kills scored by the player's team across all games.
    pub team_kills: u64,
    pub time_played_ms: u64,
    pub champions: BTreeMap<ChampionId, u64>,
    pub lanes: BTreeMap<Lane, u64>,
}

impl PlayerStats {
    /// Snapshot of a single participant's game.
    pub fn derive(item: &ParticipantItem<'_>) -> Self {
        let stats = &item.participant.stats;
        Self {
            player_name: String::new(),
            games: 1,
            wins: u64::from(item.team.win),
            kills: stats.kills.into(),
            deaths: stats.deaths.into(),
            assists: stats.assists.into(),
            gold_earned: stats.gold_earned.into(),
            creep_score: stats.creep_score.into(),
            vision_score: stats.vision_score.into(),
            damage_to_champions: stats.damage_to_champions,
            wards_placed: stats.wards_placed.into(),
            first_bloods: u64::from(stats.first_blood_kill),
            team_kills: item.record.team_kills(item.team.team_id).into(),
            time_played_ms: item.record.duration_ms.max(0) as u64,
            champions: BTreeMap::from([(item.participant.champion_id, 1)]),
            lanes: BTreeMap::from([(item.participant.lane, 1)]),
        }
    }

    pub fn combine(mut self, other: Self) -> Self {
        self.games += other.games;
        self.wins += other.wins;
        self.kills += other.kills;
        self.deaths += other.deaths;
        self.assists += other.assists;
        self.gold_earned += other.gold_earned;
        self.creep_score += other.creep_score;
        self.vision_score += other.vision_score;
        self.damage_to_champions += other.damage_to_champions;
        self.wards_placed += other.wards_placed;
        self.first_bloods += other.first_bloods;
        self.team_kills += other.team_kills;
        self.time_played_ms += other.time_played_ms;
        for (champion, games) in other.champions {
            *self.champions.entry(champion).or_default() += games;
        }
        for (lane, games) in other.lanes {
            *self.lanes.entry(lane).or_default() += games;
        }
        if self.player_name.is_empty() {
            self.player_name = other.player_name;
        }
        self
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.games)
    }

    /// (kills + assists) / deaths, with zero deaths counted as one.
    pub fn kda(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }

    pub fn kill_participation(&self) -> f64 {
        ratio(self.kills + self.assists, self.team_kills)
    }

    pub fn cs_per_minute(&self) -> f64 {
        ratio(self.creep_score * 60_000, self.time_played_ms)
    }

    pub fn average(&self, total: u64) -> f64 {
        ratio(total, self.games)
    }

    pub fn most_played_champion(&self) -> Option<ChampionId> {
        self.champions
            .iter()
            .max_by(|(a_id, a), (b_id, b)| a.cmp(b).then(b_id.cmp(a_id)))
            .map(|(id, _)| *id)
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            player_name: self.player_name.clone(),
            games: self.games,
            win_rate: self.win_rate(),
            kda: self.kda(),
            kill_participation: self.kill_participation(),
            cs_per_minute: self.cs_per_minute(),
            avg_kills: self.average(self.kills),
            avg_deaths: self.average(self.deaths),
            avg_assists: self.average(self.assists),
            avg_gold: self.average(self.gold_earned),
            avg_vision_score: self.average(self.vision_score),
            most_played_champion: self.most_played_champion(),
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Averages derived from a [`PlayerStats`] accumulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub player_name: String,
    pub games: u64,
    pub win_rate: f64,
    pub kda: f64,
    pub kill_participation: f64,
    pub cs_per_minute: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub avg_gold: f64,
    pub avg_vision_score: f64,
    pub most_played_champion: Option<ChampionId>,
}
