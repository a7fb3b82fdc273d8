//! Loan eligibility tiers
//!
//! Static lookup data selected by a strict threshold ladder on the final score:
//!
//! | Tier | Final score | Max amount (₹) | Rate |
//! |---|---|---|---|
//! | Excellent | ≥ 80 | 1,000,000 | 7.5% |
//! | Good | ≥ 70 | 750,000 | 8.5% |
//! | Fair | ≥ 60 | 500,000 | 10% |
//! | Limited | ≥ 50 | 250,000 | 12% |
//! | Not Eligible | < 50 | 0 | - |

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanTier {
    NotEligible,
    Limited,
    Fair,
    Good,
    Excellent,
}

impl LoanTier {
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= 80.0 {
            LoanTier::Excellent
        } else if final_score >= 70.0 {
            LoanTier::Good
        } else if final_score >= 60.0 {
            LoanTier::Fair
        } else if final_score >= 50.0 {
            LoanTier::Limited
        } else {
            LoanTier::NotEligible
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            LoanTier::Excellent => "Excellent",
            LoanTier::Good => "Good",
            LoanTier::Fair => "Fair",
            LoanTier::Limited => "Limited",
            LoanTier::NotEligible => "Not Eligible",
        }
    }

    /// Rupees
    pub fn max_loan_amount(&self) -> u64 {
        match self {
            LoanTier::Excellent => 1_000_000,
            LoanTier::Good => 750_000,
            LoanTier::Fair => 500_000,
            LoanTier::Limited => 250_000,
            LoanTier::NotEligible => 0,
        }
    }

    /// Percent per annum
    pub fn interest_rate(&self) -> f64 {
        match self {
            LoanTier::Excellent => 7.5,
            LoanTier::Good => 8.5,
            LoanTier::Fair => 10.0,
            LoanTier::Limited => 12.0,
            LoanTier::NotEligible => 0.0,
        }
    }

    pub fn terms(&self) -> &'static str {
        match self {
            LoanTier::Excellent => "Flexible terms with 3-year repayment period",
            LoanTier::Good => "Standard terms with 2.5-year repayment period",
            LoanTier::Fair => "Structured terms with 2-year repayment period",
            LoanTier::Limited => "Restricted terms with 1.5-year repayment period",
            LoanTier::NotEligible => "Not eligible for loan at this time",
        }
    }

    pub fn requirements(&self) -> &'static [&'static str] {
        match self {
            LoanTier::Excellent => &[
                "Standard documentation",
                "Basic insurance coverage",
                "Regular progress reports",
            ],
            LoanTier::Good => &[
                "Standard documentation",
                "Basic insurance coverage",
                "Monthly progress reports",
                "Collateral security",
            ],
            LoanTier::Fair => &[
                "Detailed documentation",
                "Comprehensive insurance coverage",
                "Bi-weekly progress reports",
                "Collateral security",
                "Guarantor required",
            ],
            LoanTier::Limited => &[
                "Extensive documentation",
                "Full insurance coverage",
                "Weekly progress reports",
                "Multiple collateral securities",
                "Multiple guarantors required",
            ],
            LoanTier::NotEligible => &[
                "Improve soil quality",
                "Implement better weather protection measures",
                "Consider alternative farming methods",
                "Reapply after 6 months with improvements",
            ],
        }
    }
}

/// Materialized tier data, as handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanEligibility {
    pub tier: LoanTier,
    pub status: String,
    pub max_loan_amount: u64,
    pub interest_rate: f64,
    pub terms: String,
    pub requirements: Vec<String>,
}

impl From<LoanTier> for LoanEligibility {
    fn from(tier: LoanTier) -> Self {
        Self {
            tier,
            status: tier.status().to_string(),
            max_loan_amount: tier.max_loan_amount(),
            interest_rate: tier.interest_rate(),
            terms: tier.terms().to_string(),
            requirements: tier.requirements().iter().map(|r| r.to_string()).collect(),
        }
    }
}

pub fn determine_loan_eligibility(final_score: f64) -> LoanEligibility {
    LoanTier::from_score(final_score).into()
}
