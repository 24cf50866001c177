//! Intent resolution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! routes an [`Intent`] through the transition phases on a working copy of
//! the state and only hands back (or commits) that copy when every phase
//! succeeded, so a rejected intent never leaves a partial mutation behind.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{GameEvent, Intent};
use crate::combat::check_defeat;
use crate::env::GameEnv;
use crate::state::{CharacterId, GameState, SessionStatus};

/// Successful resolution: the next state and the events that led to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Game engine that resolves intents against a state it exclusively borrows.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Resolves `intent` and commits the resulting state on success.
    ///
    /// On error the borrowed state is left exactly as it was.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        intent: &Intent,
    ) -> Result<Vec<GameEvent>, ExecuteError> {
        let Resolution { state, events } = Self::resolve(intent, self.state, env)?;
        *self.state = state;
        Ok(events)
    }

    /// Pure step function: computes the state that follows `state` once
    /// `intent` is applied, together with the ordered events.
    ///
    /// Every success advances the turn counter by the intent's cost, and at
    /// least one. A
    /// player brought to zero health is marked dead and ends the session.
    pub fn resolve(
        intent: &Intent,
        state: &GameState,
        env: GameEnv<'_>,
    ) -> Result<Resolution, ExecuteError> {
        if state.is_over() {
            return Err(ExecuteError::SessionOver);
        }

        let mut working = state.clone();
        let output = transition::execute_transition(intent, &mut working, &env)?;
        let mut events = output.events;

        if !working.player.is_dead() && check_defeat(&working.player) {
            working.player.mark_dead();
            working.status = SessionStatus::Over;
            events.push(GameEvent::CharacterDefeated {
                character: CharacterId::PLAYER,
                name: working.player.name.clone(),
                location: working.player.location.clone(),
            });
        }

        working.turn = working.turn.saturating_add(output.cost);
        Ok(Resolution {
            state: working,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Rejection;
    use crate::combat::DiceExpr;
    use crate::config::GameConfig;
    use crate::env::{
        EquipSlot, HostileDefinition, ItemDefinition, ItemEffect, ItemFlags, LocationDefinition,
        LocationKind, PathDefinition, PcgRng, RegionDefinition, RngOracle, TrapDefinition,
        WorldDefinition, WorldGraph,
    };
    use crate::state::{Character, CharacterStats};

    /// Every die rolls its maximum.
    struct MaxRng;

    impl RngOracle for MaxRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            u32::MAX
        }

        fn roll_die(&self, _seed: u64, sides: u32) -> u32 {
            sides
        }
    }

    /// Every die rolls 1.
    struct MinRng;

    impl RngOracle for MinRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }
    }

    fn world() -> WorldGraph {
        WorldGraph::build(WorldDefinition {
            regions: vec![
                RegionDefinition::new(
                    "Greenwood",
                    "Old forest along the king's road.",
                    vec![
                        LocationDefinition::new("Main Road Entrance", LocationKind::Road)
                            .with_path(PathDefinition::new("west", "Forest Edge"))
                            .with_path(PathDefinition::new("north", "Old Ruins"))
                            .with_path(PathDefinition::new("east", "Riverside")),
                        LocationDefinition::new("Forest Edge", LocationKind::Forest)
                            .with_path(PathDefinition::new("northwest", "Bandit Camp"))
                            .with_path(PathDefinition::new("east", "Main Road Entrance"))
                            .with_path(PathDefinition::new("south", "Riverside").blocked_by("Fallen Log"))
                            .with_item("Fallen Log"),
                        LocationDefinition::new("Bandit Camp", LocationKind::Camp)
                            .with_path(PathDefinition::new("southeast", "Forest Edge"))
                            .with_item("Stolen goods")
                            .with_item("Stolen goods pouch")
                            .with_hostile(HostileDefinition::new(
                                "Bandit",
                                4,
                                DiceExpr::new(1, 6, 0),
                                12,
                            )),
                        LocationDefinition::new("Old Ruins", LocationKind::Ruins)
                            .with_path(PathDefinition::new("south", "Main Road Entrance"))
                            .with_path(PathDefinition::new("down", "Crypt"))
                            .with_trap(TrapDefinition::new("Falling stones", DiceExpr::new(1, 4, 0))),
                        LocationDefinition::new("Crypt", LocationKind::Dungeon)
                            .with_path(PathDefinition::new("up", "Old Ruins"))
                            .with_item("Golden Idol")
                            .with_trap(TrapDefinition::new("Poison darts", DiceExpr::new(1, 4, 0))),
                    ],
                ),
                RegionDefinition::new(
                    "Riverlands",
                    "",
                    vec![
                        LocationDefinition::new("Riverside", LocationKind::Town)
                            .with_path(PathDefinition::new("west", "Main Road Entrance"))
                            .with_item("Healing Potion")
                            .with_item("Longsword")
                            .with_item("Map"),
                    ],
                ),
            ],
            items: vec![
                ItemDefinition::consumable("Healing Potion", ItemEffect::Heal(DiceExpr::new(2, 4, 2))),
                ItemDefinition::equippable("Longsword", EquipSlot::Weapon)
                    .with_attack_bonus(2)
                    .with_damage(DiceExpr::new(1, 8, 0)),
                ItemDefinition::plain("Fallen Log").with_flags(ItemFlags::BLOCKS_PATH),
                ItemDefinition::plain("Golden Idol").with_flags(ItemFlags::TRIGGERS_TRAP),
            ],
        })
        .expect("world builds")
    }

    fn new_state(world: &WorldGraph) -> GameState {
        let player = Character::new(
            CharacterId::PLAYER,
            "Aria",
            "ranger",
            CharacterStats::new(10, 10),
            "Main Road Entrance",
        );
        GameState::new_game(world, player, 42)
    }

    fn step(
        state: &mut GameState,
        world: &WorldGraph,
        rng: &dyn RngOracle,
        intent: Intent,
    ) -> Result<Vec<GameEvent>, ExecuteError> {
        let config = GameConfig::default();
        GameEngine::new(state).execute(GameEnv::new(world, &config, rng), &intent)
    }

    fn rejection(result: Result<Vec<GameEvent>, ExecuteError>) -> Rejection {
        result
            .expect_err("intent should be rejected")
            .rejection()
            .expect("recoverable rejection")
    }

    #[test]
    fn walks_to_bandit_camp_and_loots_once() {
        let world = world();
        let mut state = new_state(&world);

        let events = step(&mut state, &world, &PcgRng, Intent::go("west")).unwrap();
        assert_eq!(state.player.location, "Forest Edge");
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::Moved { .. }));

        step(&mut state, &world, &PcgRng, Intent::go("northwest")).unwrap();
        assert_eq!(state.player.location, "Bandit Camp");

        let events = step(&mut state, &world, &PcgRng, Intent::take("Stolen goods")).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::ItemAcquired {
                item: "Stolen goods".into(),
                location: "Bandit Camp".into(),
            }]
        );
        assert_eq!(state.player.inventory.quantity("Stolen goods"), 1);
        assert_eq!(state.turn, 3);

        let camp = world.find_location("Bandit Camp").unwrap();
        assert!(state.visible_items(camp).all(|item| item != "Stolen goods"));

        assert_eq!(
            rejection(step(&mut state, &world, &PcgRng, Intent::take("stolen GOODS"))),
            Rejection::ItemNotFound {
                item: "stolen GOODS".into()
            }
        );
    }

    #[test]
    fn rejected_intents_leave_state_identical() {
        let world = world();
        let mut state = new_state(&world);
        let before = state.clone();

        let cases = [
            (Intent::go("up"), "invalid_direction"),
            (Intent::take("Golden Idol"), "item_not_found"),
            (Intent::use_item("Healing Potion"), "item_not_held"),
            (Intent::attack("Bandit"), "no_such_target"),
            (Intent::rest(), "unsafe_to_rest"),
        ];
        for (intent, code) in cases {
            let rejected = rejection(step(&mut state, &world, &PcgRng, intent));
            assert_eq!(rejected.code(), code);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn move_and_return_preserves_character() {
        let world = world();
        let mut state = new_state(&world);
        let before = state.player.clone();

        step(&mut state, &world, &PcgRng, Intent::go("West")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::go("  EAST ")).unwrap();

        assert_eq!(state.player, before);
        assert_eq!(state.turn, 2);
    }

    #[test]
    fn trap_fires_before_arrival_and_only_once() {
        let world = world();
        let mut state = new_state(&world);

        let events = step(&mut state, &world, &MaxRng, Intent::go("north")).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::TrapTriggered {
                    location: "Old Ruins".into(),
                    trap: "Falling stones".into(),
                    damage: 4,
                },
                GameEvent::Moved {
                    from: "Main Road Entrance".into(),
                    to: "Old Ruins".into(),
                    direction: "north".into(),
                },
            ]
        );
        assert_eq!(state.player.stats.health, 6);
        assert!(state.is_trap_sprung("Old Ruins"));

        step(&mut state, &world, &MaxRng, Intent::go("south")).unwrap();
        let events = step(&mut state, &world, &MaxRng, Intent::go("north")).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::Moved { .. }));
        assert_eq!(state.player.stats.health, 6);
    }

    #[test]
    fn blocked_path_opens_once_obstacle_is_taken() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &PcgRng, Intent::go("west")).unwrap();

        assert_eq!(
            rejection(step(&mut state, &world, &PcgRng, Intent::go("south"))),
            Rejection::PathBlocked {
                direction: "south".into(),
                item: "Fallen Log".into(),
            }
        );

        step(&mut state, &world, &PcgRng, Intent::take("fallen log")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::go("south")).unwrap();
        assert_eq!(state.player.location, "Riverside");
    }

    #[test]
    fn rigged_item_springs_trap_on_take() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &MinRng, Intent::go("north")).unwrap();

        let events = step(&mut state, &world, &MinRng, Intent::go("down")).unwrap();
        assert_eq!(events.len(), 1, "idol holds the crypt trap: {events:?}");

        let events = step(&mut state, &world, &MinRng, Intent::take("Golden Idol")).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "trap_triggered");
        assert_eq!(events[1].kind(), "item_acquired");
    }

    #[test]
    fn potion_heals_and_is_consumed() {
        let world = world();
        let mut state = new_state(&world);
        state.player.stats.health = 3;
        step(&mut state, &world, &MaxRng, Intent::go("east")).unwrap();
        step(&mut state, &world, &MaxRng, Intent::take("Healing Potion")).unwrap();

        let events = step(&mut state, &world, &MaxRng, Intent::use_item("healing potion")).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::ItemConsumed {
                    item: "Healing Potion".into(),
                    remaining: 0,
                },
                GameEvent::Healed {
                    character: CharacterId::PLAYER,
                    amount: 7,
                    health: 10,
                },
            ]
        );
        assert!(!state.player.inventory.has_item("Healing Potion"));
    }

    #[test]
    fn plain_items_are_not_usable_and_weapons_equip() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &PcgRng, Intent::go("east")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::take("Map")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::take("Longsword")).unwrap();

        assert_eq!(
            rejection(step(&mut state, &world, &PcgRng, Intent::use_item("Map"))),
            Rejection::ItemNotUsable { item: "Map".into() }
        );

        let events = step(&mut state, &world, &PcgRng, Intent::use_item("Longsword")).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::ItemEquipped {
                item: "Longsword".into(),
                slot: EquipSlot::Weapon,
                replaced: None,
            }]
        );
        assert_eq!(state.player.inventory.quantity("Longsword"), 1);
        assert_eq!(state.player.equipment.get(EquipSlot::Weapon), Some("Longsword"));
    }

    #[test]
    fn rest_restores_health_and_costs_rest_turns() {
        let world = world();
        let mut state = new_state(&world);
        state.player.stats.health = 2;
        step(&mut state, &world, &PcgRng, Intent::go("east")).unwrap();

        let events = step(&mut state, &world, &PcgRng, Intent::rest()).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Rested {
                location: "Riverside".into(),
                healed: 8,
                turns: GameConfig::DEFAULT_REST_TURNS,
            }]
        );
        assert_eq!(state.player.stats.health, 10);
        assert_eq!(state.turn, 1 + GameConfig::DEFAULT_REST_TURNS);
    }

    #[test]
    fn zero_rest_turns_still_advance_the_clock() {
        let world = world();
        let config = GameConfig::default().with_rest_turns(0);
        let mut state = new_state(&world);
        step(&mut state, &world, &PcgRng, Intent::go("east")).unwrap();

        let events = GameEngine::new(&mut state)
            .execute(GameEnv::new(&world, &config, &PcgRng), &Intent::rest())
            .unwrap();
        assert!(matches!(events[0], GameEvent::Rested { turns: 1, .. }));
        assert_eq!(state.turn, 2);
    }

    #[test]
    fn dropped_items_stay_where_they_were_left() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &PcgRng, Intent::go("east")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::take("Longsword")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::use_item("Longsword")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::go("west")).unwrap();

        let events = step(&mut state, &world, &PcgRng, Intent::drop_item("longsword")).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::ItemDropped {
                item: "Longsword".into(),
                location: "Main Road Entrance".into(),
                remaining: 0,
                unequipped: Some(EquipSlot::Weapon),
            }]
        );
        assert!(!state.player.inventory.has_item("Longsword"));
        assert_eq!(state.player.equipment.get(EquipSlot::Weapon), None);

        let road = world.find_location("Main Road Entrance").unwrap();
        assert_eq!(state.visible_items(road).collect::<Vec<_>>(), ["Longsword"]);
        assert_eq!(state.validate(&world), Ok(()));

        step(&mut state, &world, &PcgRng, Intent::take("Longsword")).unwrap();
        assert_eq!(state.player.inventory.quantity("Longsword"), 1);
        assert_eq!(state.visible_items(road).count(), 0);
        assert!(state.facts("Main Road Entrance").unwrap().is_empty());

        assert_eq!(
            rejection(step(&mut state, &world, &PcgRng, Intent::take("Longsword"))),
            Rejection::ItemNotFound {
                item: "Longsword".into()
            }
        );
    }

    #[test]
    fn dropping_an_unheld_item_is_rejected() {
        let world = world();
        let mut state = new_state(&world);
        let before = state.clone();
        assert_eq!(
            rejection(step(&mut state, &world, &PcgRng, Intent::drop_item("Map"))),
            Rejection::ItemNotHeld { item: "Map".into() }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn dropped_obstacle_does_not_block_again() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &PcgRng, Intent::go("west")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::take("Fallen Log")).unwrap();
        step(&mut state, &world, &PcgRng, Intent::drop_item("Fallen Log")).unwrap();

        let edge = world.find_location("Forest Edge").unwrap();
        assert_eq!(state.visible_items(edge).collect::<Vec<_>>(), ["Fallen Log"]);
        step(&mut state, &world, &PcgRng, Intent::go("south")).unwrap();
        assert_eq!(state.player.location, "Riverside");
    }

    #[test]
    fn defeated_hostile_cannot_be_attacked_again() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &MaxRng, Intent::go("west")).unwrap();
        step(&mut state, &world, &MaxRng, Intent::go("northwest")).unwrap();

        let events = step(&mut state, &world, &MaxRng, Intent::attack("bandit")).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::AttackHit {
                    attacker: "Aria".into(),
                    defender: "Bandit".into(),
                    roll: 20,
                    damage: 4,
                },
                GameEvent::CharacterDefeated {
                    character: CharacterId(1),
                    name: "Bandit".into(),
                    location: "Bandit Camp".into(),
                },
            ]
        );
        assert!(state.facts("Bandit Camp").unwrap().is_defeated("Bandit"));

        assert_eq!(
            rejection(step(&mut state, &world, &MaxRng, Intent::attack("Bandit"))),
            Rejection::TargetAlreadyDefeated {
                target: "Bandit".into()
            }
        );
    }

    #[test]
    fn surviving_hostile_strikes_back() {
        let world = world();
        let mut state = new_state(&world);
        step(&mut state, &world, &MinRng, Intent::go("west")).unwrap();
        step(&mut state, &world, &MinRng, Intent::go("northwest")).unwrap();

        let events = step(&mut state, &world, &MinRng, Intent::attack("Bandit")).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::AttackMissed {
                    attacker: "Aria".into(),
                    defender: "Bandit".into(),
                    roll: 1,
                },
                GameEvent::AttackMissed {
                    attacker: "Bandit".into(),
                    defender: "Aria".into(),
                    roll: 1,
                },
            ]
        );
    }

    #[test]
    fn player_defeat_ends_the_session() {
        let world = world();
        let mut state = new_state(&world);
        state.player.stats.health = 1;

        let events = step(&mut state, &world, &MaxRng, Intent::go("north")).unwrap();
        assert_eq!(events.last().map(GameEvent::kind), Some("character_defeated"));
        assert!(state.is_over());
        assert!(state.player.is_dead());

        let before = state.clone();
        let err = step(&mut state, &world, &MaxRng, Intent::go("south")).unwrap_err();
        assert_eq!(err, ExecuteError::SessionOver);
        assert_eq!(err.rejection(), Some(Rejection::SessionOver));
        assert_eq!(state, before);
    }

    #[test]
    fn resolve_does_not_touch_input_state() {
        let world = world();
        let config = GameConfig::default();
        let state = new_state(&world);
        let env = GameEnv::new(&world, &config, &PcgRng);

        let resolution = GameEngine::resolve(&Intent::go("west"), &state, env).unwrap();
        assert_eq!(state.player.location, "Main Road Entrance");
        assert_eq!(resolution.state.player.location, "Forest Edge");
        assert_eq!(resolution.state.turn, state.turn + 1);
    }

    #[test]
    fn same_seed_replays_identically() {
        let world = world();
        let script = [
            Intent::go("west"),
            Intent::go("northwest"),
            Intent::attack("Bandit"),
            Intent::attack("Bandit"),
        ];

        let run = || {
            let mut state = new_state(&world);
            let mut log = Vec::new();
            for intent in &script {
                log.push(step(&mut state, &world, &PcgRng, intent.clone()));
            }
            (state, log)
        };
        assert_eq!(run(), run());
    }
}
