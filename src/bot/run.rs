//! Random run suggestions for `/run`, `/challenge` and `/spin`.
//!
//! Stateless: every call draws fresh from the thread-local generator.

use rand::Rng;

const CHARACTERS: [&str; 34] = [
    "Isaac",
    "Magdalene",
    "Cain",
    "Judas",
    "???",
    "Eve",
    "Samson",
    "Azazel",
    "Lazarus",
    "Eden",
    "The Lost",
    "Lilith",
    "Keeper",
    "Apollyon",
    "The Forgotten",
    "Bethany",
    "Jacob and Esau",
    "Tainted Isaac",
    "Tainted Magdalene",
    "Tainted Cain",
    "Tainted Judas",
    "Tainted ???",
    "Tainted Eve",
    "Tainted Samson",
    "Tainted Azazel",
    "Tainted Lazarus",
    "Tainted Eden",
    "Tainted Lost",
    "Tainted Lilith",
    "Tainted Keeper",
    "Tainted Apollyon",
    "Tainted Forgotten",
    "Tainted Bethany",
    "Tainted Jacob",
];

const MODES: [&str; 2] = ["Hard", "Greed"];

const CHALLENGES: [&str; 45] = [
    "Pitch Black",
    "High Brow",
    "Head Trauma",
    "Darkness Falls",
    "The Tank",
    "Solar System",
    "Suicide King",
    "Cat Got Your Tongue",
    "Demo Man",
    "Cursed!",
    "Glass Cannon",
    "When Life Gives You Lemons",
    "Beans!",
    "It's in the Cards",
    "Slow Roll",
    "Computer Savvy",
    "Waka Waka",
    "The Host",
    "The Family Man",
    "Purist",
    "XXXXXXXXL",
    "SPEED!",
    "Blue Bomber",
    "PAY TO PLAY",
    "Have a Heart",
    "I RULE!",
    "BRAINS!",
    "PRIDE DAY!",
    "Onan's Streak",
    "The Guardian",
    "Backasswards",
    "Aprils Fool",
    "Pokey Mans",
    "Ultra Hard",
    "Pong",
    "Scat Man",
    "Bloody Mary",
    "Baptism by Fire",
    "Isaac's Awakening",
    "Seeing Double",
    "Pica Run",
    "Hot Potato",
    "Cantripped!",
    "Red Redemption",
    "DELETE THIS",
];

fn pick<'a>(options: &[&'a str]) -> &'a str {
    let mut rng = rand::thread_rng();
    options[rng.gen_range(0..options.len())]
}

/// Random character and difficulty.
pub fn new_run() -> String {
    format!("Character: *{}*\nMode: *{}*", pick(&CHARACTERS), pick(&MODES))
}

/// Random numbered challenge.
pub fn new_challenge() -> String {
    let idx = rand::thread_rng().gen_range(0..CHALLENGES.len());
    format!("Challenge: *{}. {}*", idx + 1, CHALLENGES[idx])
}

/// Either a run or a challenge, evenly.
pub fn new_spin() -> String {
    if rand::thread_rng().gen_bool(0.5) {
        new_run()
    } else {
        new_challenge()
    }
}
