/// The weighted contribution of each penalty term to the objective.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenaltyTerms {
    pub composition: f64,
    pub balance: f64,
    pub occupancy: f64,
}

impl PenaltyTerms {
    pub fn new(composition: f64, balance: f64, occupancy: f64) -> Self {
        Self {
            composition,
            balance,
            occupancy,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.composition + self.balance + self.occupancy
    }
}
