//! Bayesian update for a binary sensor and the information it carries.
//!
//! A labeler is modeled as an imperfect binary sensor with sensitivity PL
//! and specificity PD. All information quantities are in bits.

use swap_core::Verdict;

/// Posterior P(LENS) after one verdict, given prior `p` and the labeler's
/// confusion matrix.
///
/// ```text
/// LENS: p' = p·PL / (PL·p + (1-PD)·(1-p))
/// NOT:  p' = p·(1-PL) / ((1-PL)·p + PD·(1-p))
/// ```
pub fn posterior(p: f64, pl: f64, pd: f64, said: Verdict) -> f64 {
    let (like_lens, like_not) = likelihoods(pl, pd, said);
    let evidence = like_lens * p + like_not * (1.0 - p);
    if evidence <= 0.0 || !evidence.is_finite() {
        return p;
    }
    p * like_lens / evidence
}

/// P(verdict | LENS) and P(verdict | NOT).
pub fn likelihoods(pl: f64, pd: f64, said: Verdict) -> (f64, f64) {
    match said {
        Verdict::Lens => (pl, 1.0 - pd),
        Verdict::Not => (1.0 - pl, pd),
    }
}

/// Information gained from one verdict: KL divergence of the posterior
/// from the prior `p0`.
pub fn information_gain(p0: f64, pl: f64, pd: f64, said: Verdict) -> f64 {
    let p1 = posterior(p0, pl, pd, said);
    binary_kl(p1, p0)
}

/// Expected information gain of one verdict on a subject with prior `p0`:
/// the mutual information between the truth and the verdict.
/// Zero for an uninformative labeler (PL = 1 - PD).
pub fn expected_information_gain(p0: f64, pl: f64, pd: f64) -> f64 {
    let p_says_lens = pl * p0 + (1.0 - pd) * (1.0 - p0);
    let gain_lens = information_gain(p0, pl, pd, Verdict::Lens);
    let gain_not = information_gain(p0, pl, pd, Verdict::Not);
    (p_says_lens * gain_lens + (1.0 - p_says_lens) * gain_not).max(0.0)
}

/// KL(Bern(p) || Bern(q)) in bits, with 0·log 0 = 0.
fn binary_kl(p: f64, q: f64) -> f64 {
    fn term(a: f64, b: f64) -> f64 {
        if a <= 0.0 || b <= 0.0 {
            0.0
        } else {
            a * (a / b).log2()
        }
    }
    (term(p, q) + term(1.0 - p, 1.0 - q)).max(0.0)
}
