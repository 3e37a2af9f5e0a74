use dioxus_logger::tracing;
use rand::seq::IndexedRandom;
use rand::Rng;
use serenity::async_trait;
use std::path::PathBuf;

use crate::bot::command::{Args, CommandHandler, Invocation, Reply};
use crate::bot::error::dispatch::CommandError;

const RACES: &[&str] = &[
    "Human",
    "Elf",
    "Dwarf",
    "Halfling",
    "Dragonborn",
    "Gnome",
    "Half-Elf",
    "Half-Orc",
    "Tiefling",
];

const CLASSES: &[&str] = &[
    "Barbarian",
    "Bard",
    "Cleric",
    "Druid",
    "Fighter",
    "Monk",
    "Paladin",
    "Ranger",
    "Rogue",
    "Sorcerer",
    "Warlock",
    "Wizard",
];

const BACKGROUNDS: &[&str] = &["Acolyte", "Criminal", "Folk Hero", "Noble", "Sage", "Soldier"];

const ALIGNMENTS: &[&str] = &[
    "Lawful Good",
    "Neutral Good",
    "Chaotic Good",
    "Lawful Neutral",
    "True Neutral",
    "Chaotic Neutral",
    "Lawful Evil",
    "Neutral Evil",
    "Chaotic Evil",
];

const TRAITS: &[&str] = &[
    "Always has a plan for when things go wrong",
    "Is incredibly slow to trust",
    "Is always polite and respectful",
    "Has a secret fear of the dark",
    "Always wants to know how things work",
    "Loves a good insult, even one directed at them",
    "Is suspicious of strangers",
    "Has a heart of gold, but never lets it show",
    "Is always calm, no matter what the situation",
    "Has a habit of talking to themselves",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub race: &'static str,
    pub class: &'static str,
    pub background: &'static str,
    pub alignment: &'static str,
    pub unique_trait: &'static str,
}

fn pick(table: &'static [&'static str], rng: &mut impl Rng) -> &'static str {
    table.choose(rng).copied().unwrap_or_default()
}

impl Character {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            race: pick(RACES, rng),
            class: pick(CLASSES, rng),
            background: pick(BACKGROUNDS, rng),
            alignment: pick(ALIGNMENTS, rng),
            unique_trait: pick(TRAITS, rng),
        }
    }

    pub fn profile(&self) -> String {
        format!(
            "**Character Profile**\nRace: {}\nClass: {}\nBackground: {}\nAlignment: {}\nUnique Trait: {}",
            self.race, self.class, self.background, self.alignment, self.unique_trait
        )
    }

    /// Image file name for the race portrait, e.g. `Half-Elf.jpg`.
    pub fn portrait_file(&self) -> String {
        format!("{}.jpg", self.race)
    }
}

pub struct CharacterCommand {
    images_dir: PathBuf,
}

impl CharacterCommand {
    pub fn new(images_dir: PathBuf) -> Self {
        Self { images_dir }
    }
}

#[async_trait]
impl CommandHandler for CharacterCommand {
    async fn handle(&self, _invocation: &Invocation, _args: &Args) -> Result<Reply, CommandError> {
        let character = Character::random(&mut rand::rng());
        let portrait = self.images_dir.join(character.portrait_file());

        if portrait.is_file() {
            Ok(Reply::new().say_with_file(character.profile(), portrait))
        } else {
            tracing::warn!("No portrait found at {}", portrait.display());
            Ok(Reply::text(character.profile()))
        }
    }
}
