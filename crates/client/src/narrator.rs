//! Keyword-driven stand-in for the narrative service.
//!
//! Maps short commands onto intents and renders every event as one plain
//! line. Used for local play and scripted self-play when no language model
//! is wired in.
use async_trait::async_trait;
use game_core::{CharacterId, GameEvent, Intent, LocationView};
use runtime::{NarrativeError, Narrator, TurnReport};

const COMPASS: &[&str] = &[
    "north",
    "south",
    "east",
    "west",
    "northeast",
    "northwest",
    "southeast",
    "southwest",
    "up",
    "down",
    "in",
    "out",
];

#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordNarrator;

impl KeywordNarrator {
    /// Parses `text` into an intent. A bare phrase is a direction when it
    /// names one of `directions` or is made only of compass words.
    pub fn parse(text: &str, directions: &[String]) -> Result<Intent, NarrativeError> {
        let text = text.trim();
        let (verb, rest) = match text.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb.to_ascii_lowercase(), rest.trim()),
            None => (text.to_ascii_lowercase(), ""),
        };
        let unrecognized = || NarrativeError::Unrecognized(text.to_string());

        let intent = match (verb.as_str(), rest) {
            ("rest" | "sleep", "") => Intent::rest(),
            ("go" | "move" | "walk", dir) if !dir.is_empty() => Intent::go(dir),
            ("pick", rest) => match rest.strip_prefix("up ") {
                Some(item) if !item.trim().is_empty() => Intent::take(item.trim()),
                _ => return Err(unrecognized()),
            },
            ("take" | "get", item) if !item.is_empty() => Intent::take(item),
            ("put", rest) => match rest.strip_prefix("down ") {
                Some(item) if !item.trim().is_empty() => Intent::drop_item(item.trim()),
                _ => return Err(unrecognized()),
            },
            ("drop" | "discard", item) if !item.is_empty() => Intent::drop_item(item),
            ("use" | "drink" | "equip" | "wield" | "wear", item) if !item.is_empty() => {
                Intent::use_item(item)
            }
            ("attack" | "fight" | "hit", target) if !target.is_empty() => Intent::attack(target),
            _ if is_direction(text, directions) => Intent::go(text),
            _ => return Err(unrecognized()),
        };
        Ok(intent)
    }

    /// One line per event, followed by a short description of the
    /// surroundings.
    pub fn describe(report: &TurnReport) -> String {
        let mut lines: Vec<String> = report.events.iter().map(describe_event).collect();
        lines.push(describe_view(&report.view));
        if report.is_over() {
            lines.push("Your adventure is over.".to_string());
        }
        lines.join("\n")
    }
}

#[async_trait]
impl Narrator for KeywordNarrator {
    async fn interpret(&self, text: &str, view: &LocationView) -> Result<Intent, NarrativeError> {
        Self::parse(text, &view.directions)
    }

    async fn render(&self, report: &TurnReport) -> Result<String, NarrativeError> {
        Ok(Self::describe(report))
    }
}

fn is_direction(text: &str, directions: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }
    directions.iter().any(|d| d.eq_ignore_ascii_case(text))
        || text
            .split_whitespace()
            .all(|word| COMPASS.iter().any(|c| c.eq_ignore_ascii_case(word)))
}

fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::Moved { to, direction, .. } => format!("You head {direction} to {to}."),
        GameEvent::TrapTriggered { trap, damage, .. } => {
            format!("A trap! {trap} deals {damage} damage.")
        }
        GameEvent::ItemAcquired { item, .. } => format!("You pick up the {item}."),
        GameEvent::ItemDropped {
            item,
            location,
            unequipped,
            ..
        } => match unequipped {
            Some(slot) => format!("You unequip your {slot} and leave the {item} at {location}."),
            None => format!("You leave the {item} at {location}."),
        },
        GameEvent::ItemConsumed { item, remaining } => {
            format!("You use the {item} ({remaining} left).")
        }
        GameEvent::Healed { amount, health, .. } => {
            format!("You recover {amount} health ({health} now).")
        }
        GameEvent::ItemEquipped {
            item,
            slot,
            replaced,
        } => match replaced {
            Some(old) => format!("You equip the {item} as your {slot}, setting aside the {old}."),
            None => format!("You equip the {item} as your {slot}."),
        },
        GameEvent::AttackHit {
            attacker,
            defender,
            roll,
            damage,
        } => format!("{attacker} hits {defender} for {damage} (rolled {roll})."),
        GameEvent::AttackMissed {
            attacker,
            defender,
            roll,
        } => format!("{attacker} misses {defender} (rolled {roll})."),
        GameEvent::CharacterDefeated {
            character,
            name,
            location,
        } => {
            if *character == CharacterId::PLAYER {
                format!("{name} falls at {location}.")
            } else {
                format!("{name} is defeated.")
            }
        }
        GameEvent::Rested {
            location,
            healed,
            turns,
        } => format!("You rest at {location} for {turns} turns and recover {healed} health."),
    }
}

/// Grounded summary of the player's surroundings.
pub fn describe_view(view: &LocationView) -> String {
    let mut line = format!("[{} - {}]", view.location, view.region);
    if !view.directions.is_empty() {
        line.push_str(&format!(" Exits: {}.", view.directions.join(", ")));
    }
    if !view.items.is_empty() {
        line.push_str(&format!(" You see: {}.", view.items.join(", ")));
    }
    if !view.hostiles.is_empty() {
        line.push_str(&format!(" Hostile: {}.", view.hostiles.join(", ")));
    }
    if view.can_rest {
        line.push_str(" It is safe to rest here.");
    }
    line
}
