#![allow(dead_code)] // Test utilities may not all be used in every test

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use match_stats::archive::{
    Event, EventType, InMemoryMatchStore, InMemoryPlayerIdentityStore, Lane, MatchId,
    MatchRecord, Participant, ParticipantId, ParticipantStats, Team, TeamSide, TimelineFrame,
};
use match_stats::champions::{Champion, InMemoryChampionCatalog};
use match_stats::{AggregationConfig, PlayerIdentityRecord, StatsService};

// ============================================================================
// Match Setup Utilities
// ============================================================================

pub struct MatchBuilder {
    record: MatchRecord,
    roster: PlayerIdentityRecord,
}

impl MatchBuilder {
    pub fn new(id: MatchId, season: u32) -> Self {
        Self {
            record: MatchRecord {
                id,
                season,
                played_at: Utc.with_ymd_and_hms(2021, 1, 1, 20, 0, 0).unwrap()
                    + chrono::Duration::hours(id),
                duration_ms: 1_800_000,
                blue_team: Team {
                    team_id: TeamSide::Blue,
                    win: true,
                    first_blood: false,
                    towers_destroyed: 0,
                },
                red_team: Team {
                    team_id: TeamSide::Red,
                    win: false,
                    first_blood: false,
                    towers_destroyed: 0,
                },
                participants: vec![],
                timeline: vec![],
            },
            roster: PlayerIdentityRecord::new(id),
        }
    }

    pub fn red_wins(mut self) -> Self {
        self.record.blue_team.win = false;
        self.record.red_team.win = true;
        self
    }

    /// Adds a named participant. Ids 1-5 play blue, 6-10 red.
    pub fn player(
        self,
        participant_id: ParticipantId,
        name: &str,
        lane: Lane,
        champion_id: i32,
        kda: (u32, u32, u32),
    ) -> Self {
        let mut builder = self.anonymous(participant_id, lane, champion_id, kda);
        builder.roster = builder.roster.with_player(participant_id, name);
        builder
    }

    /// Adds a participant with no roster entry.
    pub fn anonymous(
        mut self,
        participant_id: ParticipantId,
        lane: Lane,
        champion_id: i32,
        (kills, deaths, assists): (u32, u32, u32),
    ) -> Self {
        self.record.participants.push(Participant {
            participant_id,
            team: if participant_id <= 5 {
                TeamSide::Blue
            } else {
                TeamSide::Red
            },
            lane,
            champion_id,
            stats: ParticipantStats {
                kills,
                deaths,
                assists,
                gold_earned: 8_000 + kills * 350 + assists * 120,
                creep_score: 120 + u32::from(participant_id) * 7,
                vision_score: 15 + assists,
                damage_to_champions: u64::from(kills) * 2_500,
                wards_placed: 6,
                first_blood_kill: false,
            },
        });
        self
    }

    pub fn stats(
        mut self,
        participant_id: ParticipantId,
        update: impl FnOnce(&mut ParticipantStats),
    ) -> Self {
        if let Some(participant) = self
            .record
            .participants
            .iter_mut()
            .find(|p| p.participant_id == participant_id)
        {
            update(&mut participant.stats);
        }
        self
    }

    /// Adds a champion kill in its own timeline frame.
    pub fn kill(mut self, timestamp_ms: i64, killer: ParticipantId, victim: ParticipantId) -> Self {
        self.record.timeline.push(TimelineFrame {
            timestamp_ms: (timestamp_ms / 60_000 + 1) * 60_000,
            events: vec![Event {
                event_type: EventType::ChampionKill,
                timestamp_ms,
                killer_id: Some(killer),
                victim_id: Some(victim),
            }],
        });
        self
    }

    pub fn ward(mut self, timestamp_ms: i64) -> Self {
        self.record.timeline.push(TimelineFrame {
            timestamp_ms,
            events: vec![Event {
                event_type: EventType::WardPlaced,
                timestamp_ms,
                killer_id: None,
                victim_id: None,
            }],
        });
        self
    }

    pub fn build(self) -> (PlayerIdentityRecord, MatchRecord) {
        (self.roster, self.record)
    }
}

// ============================================================================
// Archive Setup Infrastructure
// ============================================================================

#[derive(Default)]
pub struct ArchiveBuilder {
    rosters: Vec<PlayerIdentityRecord>,
    matches: Vec<MatchRecord>,
    champions: Vec<Champion>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_match(mut self, builder: MatchBuilder) -> Self {
        let (roster, record) = builder.build();
        self.rosters.push(roster);
        self.matches.push(record);
        self
    }

    /// A roster pointing at a match that was never stored.
    pub fn with_orphan_roster(mut self, match_id: MatchId, name: &str) -> Self {
        self.rosters
            .push(PlayerIdentityRecord::new(match_id).with_player(1, name));
        self
    }

    pub fn with_champion(mut self, champion: Champion) -> Self {
        self.champions.push(champion);
        self
    }

    pub fn rosters(&self) -> &[PlayerIdentityRecord] {
        &self.rosters
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn service(&self, workers: usize) -> StatsService {
        StatsService::builder(
            Arc::new(InMemoryPlayerIdentityStore::with_records(self.rosters.clone())),
            Arc::new(InMemoryMatchStore::with_matches(self.matches.clone())),
        )
        .with_champion_catalog(Arc::new(InMemoryChampionCatalog::with_champions(
            self.champions.clone(),
        )))
        .with_config(
            AggregationConfig::default()
                .with_workers(workers)
                .with_fetch_concurrency(4),
        )
        .build()
        .expect("service should build")
    }
}

const NAMES: [&str; 12] = [
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy", "mallory",
    "oscar",
];
const LANES: [Lane; 5] = [Lane::Top, Lane::Jungle, Lane::Mid, Lane::Bot, Lane::Bot];

/// Seeded archive of `count` ten-player matches spread over three seasons.
///
/// Stats are drawn from small ranges so ties are common. A few participants
/// have no roster entry and a few matches have no kill events.
pub fn random_archive(seed: u64, count: i64) -> ArchiveBuilder {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut archive = ArchiveBuilder::new();

    for id in 1..=count {
        let season = rng.random_range(1..=3);
        let mut builder = MatchBuilder::new(id, season);
        if rng.random_bool(0.5) {
            builder = builder.red_wins();
        }

        let offset = rng.random_range(0..NAMES.len());
        for slot in 0..10u8 {
            let participant_id = slot + 1;
            let lane = LANES[usize::from(slot % 5)];
            let champion = rng.random_range(1..=20);
            let kda = (
                rng.random_range(0..=8),
                rng.random_range(0..=8),
                rng.random_range(0..=12),
            );
            builder = if rng.random_bool(0.1) {
                builder.anonymous(participant_id, lane, champion, kda)
            } else {
                let name = NAMES[(offset + usize::from(slot)) % NAMES.len()];
                builder.player(participant_id, name, lane, champion, kda)
            };
        }

        if rng.random_bool(0.85) {
            for _ in 0..rng.random_range(1..=4) {
                let killer = rng.random_range(1..=10);
                let victim = if killer > 5 { killer - 5 } else { killer + 5 };
                let timestamp = rng.random_range(60..=400) * 1_000;
                builder = builder.kill(timestamp, killer, victim);
            }
        } else {
            builder = builder.ward(90_000);
        }

        archive = archive.with_match(builder);
    }

    archive
}
