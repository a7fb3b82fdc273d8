//! Credit scoring
//!
//! Two independent paths:
//! - `aggregate`: weather score + soil score → final score → loan tier
//! - `application`: officer-entered application scores (+ land profile) → credit score → risk band

pub mod aggregate;
pub mod application;
pub mod eligibility;

pub use aggregate::{aggregate, final_credit_score, CreditDecision};
pub use application::{score_application, ApplicationRisk, ApplicationScore, CropType, FarmApplication};
pub use eligibility::{determine_loan_eligibility, LoanEligibility, LoanTier};
