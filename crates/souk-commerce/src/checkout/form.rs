//! Checkout form data and validation.

use std::collections::BTreeMap;

use crate::checkout::card::{self, CardBrand};

/// Everything collected on the payment page.
///
/// Deliberately not serializable: the raw card number and CVV must never be
/// written anywhere. Orders keep only the detected brand and last four
/// digits.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    /// Optional region or governorate.
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub card_number: String,
    /// Expiry as `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// Field errors keyed by field name. An empty map means the form is valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

impl CheckoutForm {
    /// Validate every field, collecting all failures at once.
    ///
    /// Returns the detected card brand on success so callers never have to
    /// re-parse the number.
    pub fn validate(&self) -> Result<CardBrand, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", "First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.insert("last_name", "Last name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required".to_string());
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Invalid email address".to_string());
        }
        if self.phone.trim().is_empty() {
            errors.insert("phone", "Phone number is required".to_string());
        }
        if self.address.trim().is_empty() {
            errors.insert("address", "Address is required".to_string());
        }
        if self.city.trim().is_empty() {
            errors.insert("city", "City is required".to_string());
        }
        if self.zip_code.trim().is_empty() {
            errors.insert("zip_code", "ZIP code is required".to_string());
        }

        let brand = match card::validate_number(&self.card_number) {
            Ok(brand) => Some(brand),
            Err(e) => {
                errors.insert("card_number", e.to_string());
                None
            }
        };
        if let Err(e) = card::validate_expiry(&self.expiry_date) {
            errors.insert("expiry_date", e.to_string());
        }
        if let Err(e) = card::validate_cvv(&self.cvv, brand) {
            errors.insert("cvv", e.to_string());
        }
        if let Err(e) = card::validate_cardholder_name(&self.cardholder_name) {
            errors.insert("cardholder_name", e.to_string());
        }

        match brand {
            Some(brand) if errors.is_empty() => Ok(brand),
            _ => Err(errors),
        }
    }

    /// Customer's full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Single-line shipping address, the shape order records store.
    pub fn combined_address(&self) -> String {
        let mut parts = vec![self.address.trim(), self.city.trim()];
        if !self.state.trim().is_empty() {
            parts.push(self.state.trim());
        }
        if !self.zip_code.trim().is_empty() {
            parts.push(self.zip_code.trim());
        }
        if !self.country.trim().is_empty() {
            parts.push(self.country.trim());
        }
        parts.join(", ")
    }
}

/// Minimal shape check: local part, `@`, and a dotted domain.
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    }
}
