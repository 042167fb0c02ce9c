use crawl_content::ContentFactory;
use crawl_core::{GameState, TileKind};

#[test]
fn embedded_pack_starts_a_run() {
    let catalog = ContentFactory::embedded_catalog().unwrap();
    let config = ContentFactory::embedded_config().unwrap();
    let state = GameState::new_run(12345, config, &catalog.as_env()).unwrap();

    assert_eq!(state.cards.hand.len(), 3);
    assert_eq!(state.board.count_kind(TileKind::Key), 1);
    assert_eq!(state.board.count_kind(TileKind::Door), 1);
}

#[test]
fn boss_levels_come_from_the_pack() {
    let catalog = ContentFactory::embedded_catalog().unwrap();
    let env = catalog.as_env();
    assert_eq!(env.boss_for_level(3).as_deref(), Some("iron_warden"));
    assert_eq!(env.boss_for_level(5).as_deref(), Some("lich"));
    assert!(env.boss_for_level(2).is_none());
    assert!(env.boss("lich").unwrap().victory_rewards.game_complete);
}
