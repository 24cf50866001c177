mod common;

use common::{manager, manager_with_seed, trap_damage, wounded_manager};
use game_core::{CharacterId, GameEvent, Intent, Rejection, SessionStatus};
use runtime::RuntimeError;

fn rejection(result: runtime::Result<runtime::TurnReport>) -> Rejection {
    match result {
        Err(RuntimeError::Rejected(rejection)) => rejection,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn greenwood_road_walkthrough() {
    let mut manager = manager();
    assert_eq!(manager.state().player.location, "Main Road Entrance");

    let report = manager.apply(&Intent::go("west")).unwrap();
    assert_eq!(report.view.location, "Forest Edge");
    assert_eq!(trap_damage(&report.events), None);
    assert_eq!(
        report.events,
        [GameEvent::Moved {
            from: "Main Road Entrance".into(),
            to: "Forest Edge".into(),
            direction: "west".into(),
        }]
    );

    let report = manager.apply(&Intent::go("northwest")).unwrap();
    assert_eq!(report.view.location, "Bandit Camp");
    assert!(report.view.items.contains(&"Stolen goods".to_string()));

    manager.apply(&Intent::take("Stolen goods")).unwrap();
    assert_eq!(
        rejection(manager.apply(&Intent::take("Stolen goods"))),
        Rejection::ItemNotFound {
            item: "Stolen goods".into()
        }
    );
}

#[test]
fn moving_there_and_back_restores_position() {
    let mut manager = manager();
    let before = manager.state().player.clone();

    manager.apply(&Intent::go("west")).unwrap();
    let report = manager.apply(&Intent::go("east")).unwrap();

    let after = &manager.state().player;
    assert_eq!(report.view.location, "Main Road Entrance");
    assert_eq!(after.location, before.location);
    assert_eq!(after.inventory, before.inventory);
    assert_eq!(after.stats.health, before.stats.health);
    assert_eq!(report.turn, 2);
}

#[test]
fn rejected_intents_leave_state_untouched() {
    let mut manager = manager();
    manager.apply(&Intent::go("west")).unwrap();
    let before = manager.state().clone();

    let attempts = [
        Intent::go("north"),
        Intent::go("south southwest"),
        Intent::take("Crown Jewels"),
        Intent::use_item("Elixir of Vigor"),
        Intent::use_item("Fallen Tree"),
        Intent::attack("Bandit Captain"),
        Intent::rest(),
    ];
    for intent in attempts {
        assert!(
            matches!(manager.apply(&intent), Err(RuntimeError::Rejected(_))),
            "{intent} should be rejected"
        );
        assert_eq!(manager.state(), &before, "{intent} mutated state");
    }
}

#[test]
fn blocked_path_opens_once_obstacle_is_taken() {
    let mut manager = manager();
    manager.apply(&Intent::go("west")).unwrap();

    assert_eq!(
        rejection(manager.apply(&Intent::go("south southwest"))),
        Rejection::PathBlocked {
            direction: "south southwest".into(),
            item: "Fallen Tree".into(),
        }
    );
    assert!(!manager.view().unwrap().directions.contains(&"south southwest".to_string()));

    manager.apply(&Intent::take("Fallen Tree")).unwrap();
    assert!(manager.view().unwrap().directions.contains(&"south southwest".to_string()));

    let report = manager.apply(&Intent::go("south southwest")).unwrap();
    assert_eq!(report.view.location, "Collapsed Watchtower");
}

#[test]
fn trap_springs_once_until_reset() {
    let mut manager = manager();
    manager.apply(&Intent::go("west")).unwrap();
    manager.apply(&Intent::take("Fallen Tree")).unwrap();

    let first = manager.apply(&Intent::go("south southwest")).unwrap();
    let damage = trap_damage(&first.events).expect("trap fires on first arrival");
    assert!((1..=4).contains(&damage));
    assert_eq!(manager.state().player.stats.health, 12 - damage);
    let health = manager.state().player.stats.health;

    manager.apply(&Intent::go("north northeast")).unwrap();
    let second = manager.apply(&Intent::go("south southwest")).unwrap();
    assert_eq!(trap_damage(&second.events), None);
    assert_eq!(manager.state().player.stats.health, health);

    assert!(manager.reset_trap("Collapsed Watchtower").unwrap());
    manager.apply(&Intent::go("north northeast")).unwrap();
    let third = manager.apply(&Intent::go("south southwest")).unwrap();
    assert!(trap_damage(&third.events).is_some());
}

#[test]
fn taking_an_item_moves_exactly_one_into_inventory() {
    let mut manager = manager();
    manager.apply(&Intent::go("east")).unwrap();
    let held = manager.state().player.inventory.quantity("Healing Potion");

    let report = manager.apply(&Intent::take("healing potion")).unwrap();
    assert!(!report.view.items.contains(&"Healing Potion".to_string()));
    assert_eq!(
        manager.state().player.inventory.quantity("Healing Potion"),
        held + 1
    );
}

#[test]
fn trap_damage_stays_within_dice_bounds() {
    for seed in 0..40 {
        let mut manager = wounded_manager(seed, 2, 10);
        manager.apply(&Intent::go("west")).unwrap();
        manager.apply(&Intent::take("Fallen Tree")).unwrap();
        let report = manager.apply(&Intent::go("south southwest")).unwrap();

        let damage = trap_damage(&report.events).expect("trap fires");
        assert!((1..=4).contains(&damage), "seed {seed}: damage {damage}");

        let player = &manager.state().player;
        assert!(player.stats.health <= 1, "seed {seed}");
        assert_eq!(player.is_incapacitated(), damage >= 2, "seed {seed}");
    }
}

#[test]
fn defeat_ends_the_session() {
    let mut manager = wounded_manager(common::SEED, 1, 12);
    manager.apply(&Intent::go("west")).unwrap();
    manager.apply(&Intent::take("Fallen Tree")).unwrap();

    let report = manager.apply(&Intent::go("south southwest")).unwrap();
    assert_eq!(report.status, SessionStatus::Over);
    assert!(report.events.iter().any(|event| matches!(
        event,
        GameEvent::CharacterDefeated { character, .. } if *character == CharacterId::PLAYER
    )));

    let turn = manager.state().turn;
    assert!(matches!(
        manager.apply(&Intent::go("north northeast")),
        Err(RuntimeError::SessionOver)
    ));
    assert_eq!(manager.state().turn, turn);
    assert_eq!(manager.status(), SessionStatus::Over);
}

#[test]
fn same_seed_same_story() {
    let script = [
        Intent::go("west"),
        Intent::go("northwest"),
        Intent::attack("bandit lookout"),
        Intent::attack("bandit lookout"),
        Intent::attack("bandit lookout"),
    ];

    let run = |seed| {
        let mut manager = manager_with_seed(seed);
        let mut events = Vec::new();
        for intent in &script {
            if let Ok(report) = manager.apply(intent) {
                events.extend(report.events);
            }
        }
        (manager.state().clone(), events)
    };

    assert_eq!(run(7), run(7));
}
