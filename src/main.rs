use std::fs;

use rand::{thread_rng, Rng};

use coup_engine::{DecisionMaker, Game, HeuristicDecider, RandomDecider};

static NAMES: [&str; 10] = [
    "Ophelia",
    "Sebastian",
    "Isabella",
    "Edmund",
    "Arabella",
    "Cecil",
    "Josephine",
    "Augustus",
    "Cassandra",
    "Benedict",
];

fn main() {
    env_logger::init();

    let mut rng = thread_rng();

    let seats = NAMES
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, &name)| {
            let decider: Box<dyn DecisionMaker> = if i % 2 == 0 {
                Box::new(HeuristicDecider::new(rng.gen()))
            } else {
                Box::new(RandomDecider::new(rng.gen()))
            };
            (name.to_string(), decider)
        })
        .collect();

    let mut game = Game::new(seats, &mut rng).expect("valid player count");

    while game.winner().is_none() {
        game.play_turn(&mut rng).expect("bots only make legal moves");
    }

    for event in game.events() {
        println!("{event}");
    }

    let winner = game.winner().unwrap();
    println!(
        "game over after {} turns, {} wins",
        game.turn(),
        game.players()[winner].name()
    );

    let json = serde_json::to_string_pretty(game.events()).expect("events serialize");
    fs::write("events.json", json).expect("write events.json");
}
