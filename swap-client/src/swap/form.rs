//! Swap form state.
//!
//! Pure state with no I/O: the selected pair, both amount fields, the cached
//! price ratio and the slippage setting. [`SwapController`](super::SwapController)
//! drives it and performs the requests.

use shared::{Token, TokenPrices};

use crate::core::error::{ClientError, Result};

/// Slippage tolerance presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slippage {
    /// 0.5 %
    Low,
    /// 2.5 %
    #[default]
    Medium,
    /// 5 %
    High,
}

impl Slippage {
    pub const ALL: [Slippage; 3] = [Slippage::Low, Slippage::Medium, Slippage::High];

    pub fn percent(self) -> f64 {
        match self {
            Slippage::Low => 0.5,
            Slippage::Medium => 2.5,
            Slippage::High => 5.0,
        }
    }

    pub fn from_percent(percent: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.percent() == percent)
    }
}

/// Which side of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Source token
    One,
    /// Destination token
    Two,
}

#[derive(Debug, Clone, Default)]
pub struct SwapForm {
    tokens: Vec<Token>,
    token_one: Option<Token>,
    token_two: Option<Token>,
    token_one_amount: String,
    token_two_amount: String,
    prices: Option<TokenPrices>,
    slippage: Slippage,
}

impl SwapForm {
    /// Replace the token list. The first two entries become the pair.
    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        if tokens.len() >= 2 {
            self.token_one = Some(tokens[0].clone());
            self.token_two = Some(tokens[1].clone());
            self.reset_quote();
        }
        self.tokens = tokens;
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token_one(&self) -> Option<&Token> {
        self.token_one.as_ref()
    }

    pub fn token_two(&self) -> Option<&Token> {
        self.token_two.as_ref()
    }

    /// Both sides, once selected.
    pub fn pair(&self) -> Option<(&Token, &Token)> {
        self.token_one.as_ref().zip(self.token_two.as_ref())
    }

    pub fn token_one_amount(&self) -> &str {
        &self.token_one_amount
    }

    pub fn token_two_amount(&self) -> &str {
        &self.token_two_amount
    }

    pub fn prices(&self) -> Option<TokenPrices> {
        self.prices
    }

    pub fn set_prices(&mut self, prices: TokenPrices) {
        self.prices = Some(prices);
    }

    pub fn slippage(&self) -> Slippage {
        self.slippage
    }

    pub fn set_slippage(&mut self, slippage: Slippage) {
        self.slippage = slippage;
    }

    /// Amount entry converts with the cached ratio; no request is made.
    ///
    /// An empty or unparsable value, or a missing ratio, clears the other side.
    pub fn change_amount(&mut self, value: &str) {
        self.token_one_amount = value.to_string();

        let converted = match (self.prices, value.trim().parse::<f64>()) {
            (Some(prices), Ok(amount)) if !value.trim().is_empty() => format!("{:.12}", amount * prices.ratio),
            _ => String::new(),
        };
        self.token_two_amount = converted;
    }

    /// Swap source and destination.
    pub fn switch_tokens(&mut self) {
        std::mem::swap(&mut self.token_one, &mut self.token_two);
        self.reset_quote();
    }

    /// Pick `index` from the token list for `side`.
    pub fn select_token(&mut self, side: Side, index: usize) -> Result<()> {
        let token = self
            .tokens
            .get(index)
            .cloned()
            .ok_or_else(|| ClientError::Validation(format!("No token at index {}", index)))?;

        match side {
            Side::One => self.token_one = Some(token),
            Side::Two => self.token_two = Some(token),
        }
        self.reset_quote();
        Ok(())
    }

    /// The amount field accepts input only once a ratio is known.
    pub fn input_enabled(&self) -> bool {
        self.prices.is_some()
    }

    pub fn can_swap(&self, connected: bool) -> bool {
        connected && !self.token_one_amount.is_empty()
    }

    /// Show the aggregator's raw destination amount in the second field.
    pub fn set_destination_amount(&mut self, dst_amount: &str) {
        let decimals = self.token_two.as_ref().map(|t| t.decimals).unwrap_or(18);
        self.token_two_amount = display_amount(dst_amount, decimals);
    }

    pub fn clear_amounts(&mut self) {
        self.token_one_amount.clear();
        self.token_two_amount.clear();
    }

    fn reset_quote(&mut self) {
        self.clear_amounts();
        self.prices = None;
    }
}

/// `raw / 10^decimals` with two decimals. Unparsable input shows as empty.
pub fn display_amount(raw: &str, decimals: u8) -> String {
    match raw.parse::<f64>() {
        Ok(value) => format!("{:.2}", value / 10f64.powi(decimals as i32)),
        Err(_) => String::new(),
    }
}
