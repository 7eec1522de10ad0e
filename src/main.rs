//! Lefatshe — Royal Bafokeng heritage map. Runs the heritage_map app.

use bevy::prelude::*;
use heritage_map::prelude::*;

fn main() {
    let _ = dotenvy::dotenv();

    HeritageMapBuilder::new()
        .window_title("Lefatshe la Bafokeng")
        .clear_color(Color::srgb(0.020, 0.031, 0.039))
        .discovery(config::discovery_channel())
        .build()
        .run();
}
