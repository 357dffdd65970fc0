//! Weighted draw of the correct vowel for Distinction rounds.

use rand::Rng;

/// Draw one of the targets with probability proportional to its weight.
pub fn weighted_pick<'a, R: Rng + ?Sized>(
    targets: &'a [String; 3],
    weights: &[f64; 3],
    rng: &mut R,
) -> &'a str {
    let total: f64 = weights.iter().sum();
    let mut draw = rng.gen::<f64>() * total;

    for (name, weight) in targets.iter().zip(weights) {
        if draw < *weight {
            return name;
        }
        draw -= weight;
    }

    // Rounding can leave a sliver past the last interval.
    &targets[0]
}

/// Draw the round's vowel, redrawing while it repeats the previous round.
///
/// After `max_attempts` colliding draws the repeat is accepted.
pub fn pick_distinction_vowel<'a, R: Rng + ?Sized>(
    targets: &'a [String; 3],
    weights: &[f64; 3],
    last: Option<&str>,
    max_attempts: u32,
    rng: &mut R,
) -> &'a str {
    let mut attempts = 0;
    loop {
        let pick = weighted_pick(targets, weights, rng);
        attempts += 1;
        if last != Some(pick) || attempts >= max_attempts {
            return pick;
        }
    }
}
