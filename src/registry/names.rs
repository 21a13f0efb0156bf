//! Airfield name synthesis.
//!
//! Names pair a phonetic-alphabet token, cycled by airfield index, with a
//! suffix word picked from the placement RNG stream. Both inputs are
//! deterministic, so names reproduce exactly for a given seed.

use crate::rng::SeededRng;

const PHONETIC: [&str; 26] = [
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India", "Juliett",
    "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo", "Sierra", "Tango",
    "Uniform", "Victor", "Whiskey", "Xray", "Yankee", "Zulu",
];

const SUFFIXES: [&str; 8] = [
    "Field", "Base", "Station", "Strip", "Point", "Ridge", "Flats", "Crossing",
];

/// Synthesize a display name for the airfield at generation index `index`.
///
/// Consumes exactly one draw from `rng`.
pub fn airfield_name(index: usize, rng: &mut SeededRng) -> String {
    let token = PHONETIC[index % PHONETIC.len()];
    let suffix = SUFFIXES[rng.pick_index(SUFFIXES.len())];
    format!("{} {}", token, suffix)
}
