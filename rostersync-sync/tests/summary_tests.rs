mod common;

use common::{detail_with_ids, harness, ScriptedSession, StaticCatalog};
use pretty_assertions::assert_eq;
use rostersync_model::{AvatarSource, Player};
use rostersync_sync::{apply_detail, apply_summary, AccountSummary, ForceLevel};
use rostersync_types::{AvatarId, SyncStamp};
use serde_json::json;

fn summary() -> AccountSummary {
    serde_json::from_value(json!({
        "role": {"nickname": "Lumine", "level": 60},
        "avatars": [
            {"id": 1, "level": 85, "actived_constellation_num": 4, "fetter": 9, "element": "Hydro"},
            {"id": 2, "level": 70, "actived_constellation_num": 0, "fetter": 4, "element": "ELECTRO"}
        ],
        "stats": {
            "active_day_number": 1000,
            "magic_chest_number": 120,
            "spiral_abyss": "12-3",
            "avatar_number": 60
        },
        "world_explorations": [
            {"name": "蒙德", "exploration_percentage": 1000},
            {"name": "层岩巨渊"},
            {"name": "层岩巨渊·地下矿区", "exploration_percentage": 875}
        ],
        "homes": [{"level": 10}, {"level": 3}]
    }))
    .unwrap()
}

#[test]
fn summary_updates_basics_and_home() {
    let mut player = Player::new("1");
    apply_summary(&mut player, &summary(), SyncStamp::now());

    assert_eq!(player.name, "Lumine");
    assert_eq!(player.level, 60);
    assert_eq!(player.info.home_level, Some(10));
}

#[test]
fn stats_are_renamed_and_abyss_dropped() {
    let mut player = Player::new("1");
    apply_summary(&mut player, &summary(), SyncStamp::now());

    let keys: Vec<&str> = player.info.stats.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["activeDay", "avatar", "magicChest"]);
    assert_eq!(player.info.stats["activeDay"], json!(1000));
    assert!(!player.info.stats.contains_key("spiralAbyss"));
}

#[test]
fn exploration_collapses_region_variants() {
    let mut player = Player::new("1");
    apply_summary(&mut player, &summary(), SyncStamp::now());

    let exploration = &player.info.exploration;
    assert_eq!(exploration.len(), 2);
    assert_eq!(exploration["层岩巨渊"], 875);
    assert_eq!(exploration["蒙德"], 1000);
    assert!(!exploration.contains_key("层岩巨渊·地下矿区"));
}

#[test]
fn stubs_keep_detail_gear() {
    let mut player = Player::new("1");
    apply_detail(&mut player, &detail_with_ids([1]), 8, SyncStamp::now());
    apply_summary(&mut player, &summary(), SyncStamp::now());

    let avatar = player.avatar(AvatarId::new(1)).unwrap();
    assert_eq!(avatar.level, 85);
    assert_eq!(avatar.cons, 4);
    assert_eq!(avatar.element, "hydro");
    assert_eq!(avatar.source, AvatarSource::RemoteSummary);
    assert!(avatar.weapon.is_some());
    assert_eq!(avatar.artifacts.len(), 2);

    let stub = player.avatar(AvatarId::new(2)).unwrap();
    assert_eq!(stub.element, "electro");
    assert!(stub.weapon.is_none());
}

#[test]
fn summary_without_homes_has_no_home_level() {
    let mut raw = summary();
    raw.homes.clear();
    let mut player = Player::new("1");
    apply_summary(&mut player, &raw, SyncStamp::now());
    assert_eq!(player.info.home_level, None);
}

#[test]
fn summary_replaces_previous_info() {
    let mut player = Player::new("1");
    apply_summary(&mut player, &summary(), SyncStamp::now());

    let mut second = summary();
    second.stats.clear();
    apply_summary(&mut player, &second, SyncStamp::now());
    assert!(player.info.stats.is_empty());
}

#[tokio::test]
async fn refresh_merges_and_stamps() {
    let session = ScriptedSession::new(false).with_summary(summary());
    let h = harness(Some(session), StaticCatalog::default());
    let mut player = Player::new("1");

    assert!(h.sync.refresh_summary(&mut player, ForceLevel::Default).await.unwrap());
    assert!(player.markers.summary().is_some());
    assert_eq!(player.markers.detail(), None);
    assert_eq!(player.avatar_count(), 2);
    assert_eq!(h.store.persist_count(), 1);

    // Second call inside the window is gated.
    assert!(!h.sync.refresh_summary(&mut player, ForceLevel::Default).await.unwrap());
    assert_eq!(h.store.persist_count(), 1);
}

#[tokio::test]
async fn response_without_role_is_ignored() {
    let mut raw = summary();
    raw.role = None;
    let session = ScriptedSession::new(true).with_summary(raw);
    let h = harness(Some(session), StaticCatalog::default());
    let mut player = Player::new("1");

    assert!(!h.sync.refresh_summary(&mut player, ForceLevel::Full).await.unwrap());
    assert_eq!(player.avatar_count(), 0);
    assert_eq!(player.markers.summary(), None);
}

#[tokio::test]
async fn refresh_without_session_does_nothing() {
    let h = harness(None, StaticCatalog::default());
    let mut player = Player::new("1");
    assert!(!h.sync.refresh_summary(&mut player, ForceLevel::Full).await.unwrap());
}
