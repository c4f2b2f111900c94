//! Payment card validation.
//!
//! Numbers and CVVs are checked locally and discarded. Only the detected
//! brand and the last four digits ever reach an order record; a real
//! deployment hands the rest to a payment processor for tokenization.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card networks the store recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Jcb,
    DinersClub,
}

impl CardBrand {
    /// Get the brand as a string slug.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Discover => "discover",
            CardBrand::Jcb => "jcb",
            CardBrand::DinersClub => "diners_club",
        }
    }

    /// Human-readable brand name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "American Express",
            CardBrand::Discover => "Discover",
            CardBrand::Jcb => "JCB",
            CardBrand::DinersClub => "Diners Club",
        }
    }

    /// Number lengths the brand issues.
    pub fn lengths(&self) -> &'static [usize] {
        match self {
            CardBrand::Visa => &[13, 16, 19],
            CardBrand::Mastercard => &[16],
            CardBrand::Amex => &[15],
            CardBrand::Discover => &[16],
            CardBrand::Jcb => &[16],
            CardBrand::DinersClub => &[14],
        }
    }

    /// Expected CVV length for the brand.
    pub fn cvv_length(&self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }

    /// Detect the brand from the leading digits of a normalized number.
    pub fn detect(digits: &str) -> Option<CardBrand> {
        if digits.starts_with('4') {
            return Some(CardBrand::Visa);
        }
        if let Some(two) = digits.get(0..2).and_then(|s| s.parse::<u32>().ok()) {
            if (51..=55).contains(&two) || (22..=27).contains(&two) {
                return Some(CardBrand::Mastercard);
            }
            if two == 34 || two == 37 {
                return Some(CardBrand::Amex);
            }
            if two == 65 {
                return Some(CardBrand::Discover);
            }
            if two == 35 {
                return Some(CardBrand::Jcb);
            }
            if two == 30 || two == 36 || two == 38 {
                return Some(CardBrand::DinersClub);
            }
        }
        if digits.starts_with("6011") {
            return Some(CardBrand::Discover);
        }
        None
    }
}

/// Why a card field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("Card number is required")]
    NumberRequired,
    #[error("Invalid card number")]
    InvalidNumber,
    #[error("Invalid expiry date")]
    InvalidExpiry,
    #[error("Card has expired")]
    CardExpired,
    #[error("Invalid CVV")]
    InvalidCvv,
    #[error("Invalid cardholder name")]
    InvalidName,
}

/// Strip everything but digits from a card number as entered.
pub fn normalize_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn checksum over a digit string.
pub fn luhn_check(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let d = match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        let d = if double {
            let doubled = d * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            d
        };
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Validate a card number: digits only, a known brand, a length that brand
/// issues, and a passing Luhn checksum. Returns the detected brand.
pub fn validate_number(input: &str) -> Result<CardBrand, CardError> {
    let digits = normalize_number(input);
    if digits.is_empty() {
        return Err(CardError::NumberRequired);
    }
    let brand = CardBrand::detect(&digits).ok_or(CardError::InvalidNumber)?;
    if !brand.lengths().contains(&digits.len()) {
        return Err(CardError::InvalidNumber);
    }
    if !luhn_check(&digits) {
        return Err(CardError::InvalidNumber);
    }
    Ok(brand)
}

/// Validate an `MM/YY` expiry: a real month, not in the past, and no more
/// than twenty years out.
pub fn validate_expiry(input: &str) -> Result<(), CardError> {
    let (month_part, year_part) = match input.trim().split_once('/') {
        Some(parts) => parts,
        None => return Err(CardError::InvalidExpiry),
    };
    if month_part.len() != 2 || year_part.len() != 2 {
        return Err(CardError::InvalidExpiry);
    }
    if !month_part.chars().all(|c| c.is_ascii_digit())
        || !year_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CardError::InvalidExpiry);
    }

    let month: u32 = month_part.parse().map_err(|_| CardError::InvalidExpiry)?;
    let year: i32 = year_part.parse().map_err(|_| CardError::InvalidExpiry)?;
    if !(1..=12).contains(&month) {
        return Err(CardError::InvalidExpiry);
    }

    let year = 2000 + year;
    let now = Utc::now();
    if year < now.year() || (year == now.year() && month < now.month()) {
        return Err(CardError::CardExpired);
    }
    if year > now.year() + 20 {
        return Err(CardError::InvalidExpiry);
    }
    Ok(())
}

/// Validate a CVV against the detected brand, or accept 3-4 digits when the
/// brand is unknown.
pub fn validate_cvv(input: &str, brand: Option<CardBrand>) -> Result<(), CardError> {
    let cvv = input.trim();
    if cvv.is_empty() || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(CardError::InvalidCvv);
    }
    match brand {
        Some(brand) if cvv.len() != brand.cvv_length() => Err(CardError::InvalidCvv),
        None if !(3..=4).contains(&cvv.len()) => Err(CardError::InvalidCvv),
        _ => Ok(()),
    }
}

/// Validate a cardholder name: 2 to 50 characters of letters, spaces,
/// hyphens, apostrophes, and periods.
pub fn validate_cardholder_name(input: &str) -> Result<(), CardError> {
    let name = input.trim();
    if name.len() < 2 || name.len() > 50 {
        return Err(CardError::InvalidName);
    }
    let allowed = name
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'' || c == '.');
    if !allowed {
        return Err(CardError::InvalidName);
    }
    Ok(())
}

/// Last four digits of the number as entered, for order records.
pub fn last_four(input: &str) -> String {
    let digits = normalize_number(input);
    let start = digits.len().saturating_sub(4);
    digits[start..].to_string()
}
