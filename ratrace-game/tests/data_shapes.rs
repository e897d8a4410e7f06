use ratrace_game::{
    Board, CardCatalog, ConfigError, GameConfig, GamePhase, GameSnapshot, Player, ProfessionList,
    SpaceKind, TurnEngine,
};
use serde_json::Value;

fn roster() -> Vec<Player> {
    vec![
        Player::new("p1", "Ada", "#ef4444"),
        Player::new("p2", "Bo", "#3b82f6"),
    ]
}

#[test]
fn saved_snapshot_has_camel_case_shape() {
    let mut engine = TurnEngine::new(GameConfig::with_seed(8));
    let snapshot = engine.new_game(roster()).unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["currentPlayerIndex"], 0);
    assert_eq!(value["gamePhase"], "rat_race");
    assert_eq!(value["professionDeck"].as_array().unwrap().len(), 6);

    let player = &value["players"][0];
    for key in [
        "id",
        "name",
        "color",
        "profession",
        "position",
        "onFastTrack",
        "ratRace",
        "fastTrack",
        "cash",
        "netWorth",
        "status",
        "hasCharityBonus",
        "rolledDice",
        "passesThisTurn",
    ] {
        assert!(player.get(key).is_some(), "player is missing {key}");
    }
    let rat_race = &player["ratRace"];
    for key in [
        "monthlyIncome",
        "monthlyExpenses",
        "monthlyPayday",
        "passiveIncome",
        "totalExpenses",
        "children",
        "creditLimit",
        "auditorId",
        "assets",
        "liabilities",
    ] {
        assert!(rat_race.get(key).is_some(), "ratRace is missing {key}");
    }
    assert_eq!(rat_race["auditorId"], "p2");
    assert_eq!(player["fastTrack"]["dreamPriceMultiplier"], 1);
}

#[test]
fn snapshot_survives_a_json_round_trip() {
    let mut engine = TurnEngine::new(GameConfig::with_seed(8));
    let snapshot = engine.new_game(roster()).unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn hand_written_save_loads_and_resumes() {
    let json = r##"{
        "players": [
            {"id": "p1", "name": "Ada", "color": "#ef4444", "profession": "Teacher",
             "position": 7, "cash": 1200,
             "ratRace": {"monthlyIncome": 3500, "monthlyExpenses": 1600, "monthlyPayday": 0,
                         "passiveIncome": 0, "totalExpenses": 0, "children": 1,
                         "creditLimit": 1000},
             "turn": {"phase": "rolled", "dice": [4], "skipsAfter": 0}},
            {"id": "p2", "name": "Bo", "color": "#3b82f6"}
        ],
        "currentPlayerIndex": 0,
        "gamePhase": "rat_race",
        "professionDeck": []
    }"##;
    let saved: GameSnapshot = serde_json::from_str(json).unwrap();
    assert!(saved.players[0].has_rolled());

    let mut engine = TurnEngine::new(GameConfig::with_seed(2));
    let resumed = engine.resume(saved);
    let ada = &resumed.players[0];
    assert!(!ada.has_rolled());
    assert_eq!(ada.profession.as_deref(), Some("Teacher"));
    assert_eq!(ada.rat_race.total_expenses, 1640);
    assert_eq!(ada.rat_race.monthly_payday, 1860);
    assert!(resumed.players[1].profession.is_some());
    assert_eq!(resumed.game_phase, GamePhase::RatRace);
}

#[test]
fn flat_turn_keys_save_loads_with_downsize_penalty() {
    let json = r##"{
        "players": [
            {"id": "p1", "name": "Ada", "profession": "Engineer", "color": "#ef4444",
             "position": 6, "onFastTrack": false,
             "ratRace": {"monthlyIncome": 5500, "monthlyExpenses": 2100, "monthlyPayday": 3400,
                         "passiveIncome": 0, "totalExpenses": 2100, "children": 0,
                         "creditLimit": 5000, "auditorId": "p2",
                         "assets": {"realEstate": [], "stocks": [], "businesses": [], "cash": 0},
                         "liabilities": {"homeLoan": 75000, "carLoan": 6000,
                                         "creditCardDebt": 3000, "bankLoans": []}},
             "fastTrack": {"buyout": 0, "incomeGoal": 0, "currentIncome": 0,
                           "businesses": [], "dreamPrice": 0, "dreamPriceMultiplier": 1},
             "cash": 800, "netWorth": -83200, "status": "active",
             "hasCharityBonus": false, "rolledDice": [], "passesThisTurn": 2},
            {"id": "p2", "name": "Bo", "profession": "Teacher", "color": "#3b82f6",
             "position": 4, "onFastTrack": false,
             "ratRace": {"monthlyIncome": 3500, "monthlyExpenses": 1600, "monthlyPayday": 1900,
                         "passiveIncome": 0, "totalExpenses": 1600, "children": 0,
                         "creditLimit": 2000, "auditorId": "p1"},
             "cash": 1200, "netWorth": 0, "status": "active",
             "hasCharityBonus": false, "rolledDice": [4], "passesThisTurn": 0}
        ],
        "currentPlayerIndex": 1,
        "gamePhase": "rat_race",
        "professionDeck": []
    }"##;
    let saved: GameSnapshot = serde_json::from_str(json).unwrap();
    assert_eq!(saved.players[0].passes_this_turn(), 2);
    assert_eq!(saved.players[1].rolled_dice(), &[4]);
    assert_eq!(saved.players[0].rat_race.liabilities.home_loan, 75_000);

    let mut engine = TurnEngine::new(GameConfig::with_seed(4));
    let resumed = engine.resume(saved);
    assert_eq!(resumed.players[0].passes_this_turn(), 2);
    assert!(!resumed.players[0].has_rolled());
    assert!(resumed.players[1].rolled_dice().is_empty());
    assert_eq!(resumed.current_player_index, 1);

    let value = serde_json::to_value(&resumed).unwrap();
    assert_eq!(value["players"][0]["passesThisTurn"], 2);
    assert_eq!(value["players"][1]["rolledDice"], serde_json::json!([]));
}

#[test]
fn malformed_snapshot_is_a_parse_error() {
    assert!(serde_json::from_str::<GameSnapshot>(r#"{"players": 3}"#).is_err());
    let value: Value = serde_json::from_str("{}").unwrap();
    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

#[test]
fn standard_assets_load() {
    let board = Board::rat_race();
    assert_eq!(board.iter().filter(|s| s.kind == SpaceKind::Exit).count(), 1);
    assert_eq!(
        board.iter().filter(|s| s.kind == SpaceKind::Opportunity).count(),
        7
    );
    let catalog = CardCatalog::load_from_static();
    assert!(catalog.validate().is_ok());
    let professions = ProfessionList::load_from_static();
    let names: Vec<&str> = professions.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Doctor", "Lawyer", "Teacher", "Engineer", "Janitor", "Secretary"]
    );
    for profession in &professions {
        assert_eq!(profession.cash_flow, profession.paycheck - profession.expenses);
    }
}

#[test]
fn custom_board_must_have_one_exit() {
    let json = r#"[
        {"id": 0, "name": "Payday", "kind": "payday", "position": 0},
        {"id": 1, "name": "Deal", "kind": "opportunity", "position": 1}
    ]"#;
    assert_eq!(
        Board::from_json(json),
        Err(ConfigError::ExitCount { found: 0 })
    );
}
