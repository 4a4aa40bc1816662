use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::EnumIter;

pub type MatchId = i64;
pub type ParticipantId = u8;
pub type ChampionId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamSide {
    Blue,
    Red,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Lane {
    Top,
    Jungle,
    Mid,
    Bot,
    None,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Lane::Top => "TOP",
                Lane::Jungle => "JUNGLE",
                Lane::Mid => "MID",
                Lane::Bot => "BOT",
                Lane::None => "NONE",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: TeamSide,
    pub win: bool,
    #[serde(default)]
    pub first_blood: bool,
    #[serde(default)]
    pub towers_destroyed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u32,
    pub creep_score: u32,
    pub vision_score: u32,
    pub damage_to_champions: u64,
    pub wards_placed: u32,
    pub first_blood_kill: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub participant_id: ParticipantId,
    pub team: TeamSide,
    pub lane: Lane,
    pub champion_id: ChampionId,
    pub stats: ParticipantStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    ChampionKill,
    WardPlaced,
    BuildingKill,
    EliteMonsterKill,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub timestamp_ms: i64,
    #[serde(default)]
    pub killer_id: Option<ParticipantId>,
    #[serde(default)]
    pub victim_id: Option<ParticipantId>,
}

impl Event {
    pub fn is_champion_kill(&self) -> bool {
        self.event_type == EventType::ChampionKill
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFrame {
    pub timestamp_ms: i64,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A completed game as stored in the match archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub season: u32,
    pub played_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub blue_team: Team,
    pub red_team: Team,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub timeline: Vec<TimelineFrame>,
}

impl MatchRecord {
    pub fn participant(&self, participant_id: ParticipantId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }

    pub fn team_of(&self, participant: &Participant) -> &Team {
        if participant.team == self.blue_team.team_id {
            &self.blue_team
        } else {
            &self.red_team
        }
    }

    /// Summed kills of every participant on `side`.
    pub fn team_kills(&self, side: TeamSide) -> u32 {
        self.participants
            .iter()
            .filter(|p| p.team == side)
            .map(|p| p.stats.kills)
            .sum()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.timeline.iter().flat_map(|frame| frame.events.iter())
    }
}

/// Roster of one stored match: which named player played which participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentityRecord {
    pub match_id: MatchId,
    pub roster: BTreeMap<ParticipantId, String>,
}

impl PlayerIdentityRecord {
    pub fn new(match_id: MatchId) -> Self {
        Self {
            match_id,
            roster: BTreeMap::new(),
        }
    }

    pub fn with_player(mut self, participant_id: ParticipantId, name: impl Into<String>) -> Self {
        self.roster.insert(participant_id, name.into());
        self
    }

    pub fn player_name(&self, participant_id: ParticipantId) -> Option<&str> {
        self.roster.get(&participant_id).map(String::as_str)
    }
}
