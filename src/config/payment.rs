//! Payment configuration

use serde::Deserialize;

use crate::domain::billing::BillingPlan;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (rzp_test_... or rzp_live_...)
    pub razorpay_key_id: String,

    /// Razorpay key secret
    pub razorpay_key_secret: String,

    /// Plan used when create-order receives no recognizable plan id
    #[serde(default = "default_plan")]
    pub default_plan: String,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    /// The parsed default plan. Call after `validate()`.
    pub fn default_billing_plan(&self) -> Result<BillingPlan, ValidationError> {
        BillingPlan::parse(&self.default_plan).ok_or(ValidationError::UnknownDefaultPlan)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__RAZORPAY_KEY_SECRET",
            ));
        }

        // Verify the key prefix for safety
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }

        self.default_billing_plan()?;

        Ok(())
    }
}

fn default_plan() -> String {
    "pro".to_string()
}
