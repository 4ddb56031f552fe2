//! Tests for the in-memory leaderboard store.

use chrono::{TimeZone, Utc};
use number_drills::{
    BoardKey, Difficulty, GroupId, InMemoryLeaderboard, LeaderboardEntry, LeaderboardStore,
    RoundSummary,
};

fn entry(name: &str, score: u32) -> LeaderboardEntry {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let summary = RoundSummary::new(score, 60.0, 20);
    LeaderboardEntry::from_summary(name, &summary, at).expect("Failed to build entry")
}

#[tokio::test]
async fn test_top_orders_by_score() {
    let store = InMemoryLeaderboard::new();
    let group = GroupId::parse("Class-3A");
    let key = BoardKey::division(20, Difficulty::Medium);

    for (name, score) in [("ana", 120), ("ivo", 180), ("eva", 150)] {
        store.save_score(&group, &key, entry(name, score)).await.unwrap();
    }

    let top = store.top(&group, &key, 2).await.unwrap();
    let names: Vec<&str> = top.iter().map(|e| e.name().as_str()).collect();
    assert_eq!(names, ["ivo", "eva"]);
}

#[tokio::test]
async fn test_boards_are_separate_per_group_and_key() {
    let store = InMemoryLeaderboard::new();
    let key = BoardKey::division(20, Difficulty::Easy);
    let other_key = BoardKey::division(20, Difficulty::Hard);

    store
        .save_score(&GroupId::parse("a"), &key, entry("ana", 100))
        .await
        .unwrap();

    assert!(store.top(&GroupId::parse("b"), &key, 10).await.unwrap().is_empty());
    assert!(store.top(&GroupId::parse("a"), &other_key, 10).await.unwrap().is_empty());
    assert_eq!(store.top(&GroupId::parse(" A "), &key, 10).await.unwrap().len(), 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_store_shared_across_tasks() {
    let store = InMemoryLeaderboard::new();
    let key = BoardKey::division(10, Difficulty::Medium);

    let mut handles = Vec::new();
    for i in 0..8u32 {
        let store = store.clone();
        let key = key.clone();
        handles.push(tokio::spawn(async move {
            store
                .save_score(&GroupId::default(), &key, entry(&format!("p{i}"), i * 10))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    let top = store.top(&GroupId::default(), &key, 10).await.unwrap();
    assert_eq!(top.len(), 8);
    assert_eq!(*top[0].score(), 70);
}

#[test]
fn test_blank_name_rejected() {
    let summary = RoundSummary::new(10, 10.0, 2);
    assert!(LeaderboardEntry::from_summary("   ", &summary, Utc::now()).is_err());
}
