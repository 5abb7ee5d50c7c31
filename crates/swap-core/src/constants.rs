/// Upper bound on the random shortlist size used for trajectory plots.
pub const MAX_SHORTLIST: usize = 500;
