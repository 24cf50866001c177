//! Effective combat numbers and the hit check.

use crate::combat::{DiceExpr, RollMode};
use crate::config::GameConfig;
use crate::env::{ItemDefinition, WorldGraph};
use crate::state::Character;

/// Effective combat numbers of one character, equipment included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatProfile {
    /// Natural attack roll.
    pub attack: DiceExpr,
    /// Whether the attack roll is made twice.
    pub attack_mode: RollMode,
    /// Added to the attack roll.
    pub attack_bonus: i32,
    /// Threshold an incoming attack roll must meet.
    pub defense: i32,
    /// Damage dealt on a hit.
    pub damage: DiceExpr,
}

impl CombatProfile {
    /// Derives the profile of `character`.
    ///
    /// Natural dice fall back to the configured base attack and unarmed
    /// damage. Equipped items add their bonuses (saturating), fold in their
    /// roll mode, and an equipped item with damage dice replaces the natural
    /// damage.
    pub fn of(character: &Character, world: &WorldGraph, config: &GameConfig) -> Self {
        let mut profile = Self {
            attack: character.stats.attack.unwrap_or(config.base_attack),
            attack_mode: character.stats.attack_mode,
            attack_bonus: character.stats.attack_bonus,
            defense: character.stats.defense,
            damage: character.stats.damage.unwrap_or(config.unarmed_damage),
        };

        for item in equipped_items(character, world) {
            profile.attack_bonus = profile.attack_bonus.saturating_add(item.attack_bonus);
            profile.defense = profile.defense.saturating_add(item.defense_bonus);
            profile.attack_mode = profile.attack_mode.combine(item.attack_mode);
            if let Some(damage) = item.damage {
                profile.damage = damage;
            }
        }
        profile
    }
}

fn equipped_items<'w>(
    character: &'w Character,
    world: &'w WorldGraph,
) -> impl Iterator<Item = &'w ItemDefinition> + 'w {
    character
        .equipment
        .iter()
        .filter_map(move |(_, item)| world.find_item(item))
}

/// A hit lands when the attack roll meets or exceeds the defense threshold.
#[inline]
pub fn check_hit(roll: i32, defense_threshold: i32) -> bool {
    roll >= defense_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{
        EquipSlot, LocationDefinition, LocationKind, RegionDefinition, WorldDefinition,
    };
    use crate::state::{CharacterId, CharacterStats};

    fn world() -> WorldGraph {
        WorldGraph::build(WorldDefinition {
            regions: vec![RegionDefinition::new(
                "Vale",
                "",
                vec![LocationDefinition::new("Gate", LocationKind::Road)],
            )],
            items: vec![
                ItemDefinition::equippable("Longsword", EquipSlot::Weapon)
                    .with_attack_bonus(2)
                    .with_damage(DiceExpr::new(1, 8, 0)),
                ItemDefinition::equippable("Leather Armor", EquipSlot::Armor).with_defense_bonus(2),
                ItemDefinition::equippable("Keen Eye Charm", EquipSlot::Trinket)
                    .with_attack_mode(RollMode::Advantage),
                ItemDefinition::equippable("Cursed Ring", EquipSlot::Trinket)
                    .with_attack_bonus(i32::MAX)
                    .with_attack_mode(RollMode::Disadvantage),
            ],
        })
        .expect("world builds")
    }

    #[test]
    fn meeting_the_threshold_hits() {
        assert!(check_hit(10, 10));
        assert!(check_hit(11, 10));
        assert!(!check_hit(9, 10));
    }

    #[test]
    fn unarmed_profile_uses_config_fallbacks() {
        let world = world();
        let config = GameConfig::default();
        let hero = Character::new(
            CharacterId::PLAYER,
            "Aria",
            "ranger",
            CharacterStats::new(10, 12).with_attack_bonus(1),
            "Gate",
        );
        let profile = CombatProfile::of(&hero, &world, &config);
        assert_eq!(profile.attack, config.base_attack);
        assert_eq!(profile.damage, config.unarmed_damage);
        assert_eq!(profile.attack_bonus, 1);
        assert_eq!(profile.defense, 12);
    }

    #[test]
    fn equipment_adds_bonuses_and_replaces_damage() {
        let world = world();
        let config = GameConfig::default();
        let mut hero = Character::new(
            CharacterId::PLAYER,
            "Aria",
            "ranger",
            CharacterStats::new(10, 10),
            "Gate",
        );
        hero.inventory.add_item("Longsword", 1);
        hero.inventory.add_item("Leather Armor", 1);
        hero.equipment.equip(EquipSlot::Weapon, "Longsword");
        hero.equipment.equip(EquipSlot::Armor, "Leather Armor");

        let profile = CombatProfile::of(&hero, &world, &config);
        assert_eq!(profile.attack_bonus, 2);
        assert_eq!(profile.defense, 12);
        assert_eq!(profile.damage, DiceExpr::new(1, 8, 0));
        assert_eq!(profile.attack_mode, RollMode::Normal);
    }

    #[test]
    fn equipped_trinket_grants_its_roll_mode() {
        let world = world();
        let config = GameConfig::default();
        let mut hero = Character::new(
            CharacterId::PLAYER,
            "Aria",
            "ranger",
            CharacterStats::new(10, 10),
            "Gate",
        );
        hero.inventory.add_item("Keen Eye Charm", 1);
        hero.equipment.equip(EquipSlot::Trinket, "Keen Eye Charm");
        assert_eq!(
            CombatProfile::of(&hero, &world, &config).attack_mode,
            RollMode::Advantage
        );

        hero.stats.attack_mode = RollMode::Disadvantage;
        assert_eq!(
            CombatProfile::of(&hero, &world, &config).attack_mode,
            RollMode::Normal
        );
    }

    #[test]
    fn huge_bonuses_saturate() {
        let world = world();
        let config = GameConfig::default();
        let mut hero = Character::new(
            CharacterId::PLAYER,
            "Aria",
            "ranger",
            CharacterStats::new(10, 10).with_attack_bonus(5),
            "Gate",
        );
        hero.inventory.add_item("Cursed Ring", 1);
        hero.equipment.equip(EquipSlot::Trinket, "Cursed Ring");

        let profile = CombatProfile::of(&hero, &world, &config);
        assert_eq!(profile.attack_bonus, i32::MAX);
        assert_eq!(profile.attack_mode, RollMode::Disadvantage);
    }
}
