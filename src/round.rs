use rand::Rng;

use crate::colors::Hsl;
use crate::modes::Mode;

/// One question: a target color and the swatches offered for it. The target
/// is always one of the options. Duplicate options are allowed; with 360
/// hues x 30 saturations x 30 lightnesses they are vanishingly rare.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub target: Hsl,
    pub options: Vec<Hsl>,
}

pub fn generate<R: Rng>(mode: Mode, rng: &mut R) -> Round {
    let options: Vec<Hsl> = (0..mode.option_count()).map(|_| rng.gen()).collect();
    let target = options[rng.gen_range(0..options.len())];
    Round { target, options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn target_is_always_one_of_the_options() {
        let mut rng = StdRng::seed_from_u64(42);
        for &mode in Mode::ALL.iter() {
            for _ in 0..200 {
                let round = generate(mode, &mut rng);
                assert!(round.options.contains(&round.target));
            }
        }
    }

    #[test]
    fn option_count_matches_the_mode() {
        let mut rng = StdRng::seed_from_u64(42);
        for &mode in Mode::ALL.iter() {
            let round = generate(mode, &mut rng);
            assert_eq!(round.options.len(), mode.option_count());
        }
    }

    #[test]
    fn same_seed_same_round() {
        let a = generate(Mode::Classic, &mut StdRng::seed_from_u64(9));
        let b = generate(Mode::Classic, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
