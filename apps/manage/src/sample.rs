//! Random sample text.

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;

const WORDS: &[&str] = &[
    "amber", "bridge", "cedar", "delta", "ember", "falcon", "garden", "harbor", "island",
    "jasper", "kettle", "lantern", "meadow", "nectar", "orbit", "pepper", "quartz", "river",
    "saddle", "timber", "umbra", "velvet", "willow", "yonder", "zephyr", "copper", "summit",
    "thistle", "marble", "signal",
];

fn word(rng: &mut impl Rng) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("lorem")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A capitalized sentence of 4 to 9 words ending in a period.
pub fn sentence() -> String {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(4..10);
    let words: Vec<&str> = (0..len).map(|_| word(&mut rng)).collect();
    format!("{}.", capitalize(&words.join(" ")))
}

/// Three to six sentences.
pub fn paragraph() -> String {
    let count = rand::thread_rng().gen_range(3..7);
    (0..count).map(|_| sentence()).collect::<Vec<_>>().join(" ")
}

/// A username such as `amber_falcon4821`.
pub fn username() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}_{}{}",
        word(&mut rng),
        word(&mut rng),
        rng.gen_range(1000..10000)
    )
}

pub fn password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// A uniformly chosen element, `None` when `items` is empty.
pub fn pick<T: Copy>(items: &[T]) -> Option<T> {
    items.choose(&mut rand::thread_rng()).copied()
}
