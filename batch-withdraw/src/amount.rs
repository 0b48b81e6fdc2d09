use rand::Rng;

/// Per-wallet withdrawal amount, as a number and as sent to the exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAmount {
    pub value: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct AmountPlanner {
    base: f64,
    randomize: bool,
    spread: f64,
    decimals: usize,
}

impl AmountPlanner {
    pub fn new(base: f64, randomize: bool, spread: f64, decimals: usize) -> Self {
        Self {
            base,
            randomize,
            spread,
            decimals,
        }
    }

    /// Nominal amount, or a uniform pick in `[base * (1 - spread%), base]`
    /// floored to the network precision when randomization is on.
    pub fn next<R: Rng>(&self, rng: &mut R) -> PlannedAmount {
        if !self.randomize {
            return PlannedAmount {
                value: self.base,
                text: self.base.to_string(),
            };
        }

        let low = 1.0 - self.spread / 100.0;
        let factor = if low < 1.0 {
            rng.gen_range(low..=1.0)
        } else {
            1.0
        };

        let floor = self.base * low;
        let stepped = floor_to(self.base * factor, self.decimals);
        let text = format!("{:.*}", self.decimals, stepped);
        let value: f64 = text.parse().unwrap_or(stepped);

        // A step coarser than the spread can land outside the range
        if value > self.base || value < floor - self.base * 1e-12 {
            let clamped = value.clamp(floor, self.base);
            return PlannedAmount {
                value: clamped,
                text: clamped.to_string(),
            };
        }

        PlannedAmount { value, text }
    }
}

/// Rounds `amount` down to `decimals` places.
fn floor_to(amount: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    // nudge absorbs representation error such as 0.0009 * 1e8 = 89999.99999
    ((amount * scale) + 1e-6).floor() / scale
}
