use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

use super::transaction::{Transaction, TxnType};

/// Format used for the form's default timestamp (`2025-01-15T10:30:00.000Z`).
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Product,
    Quantity,
    PricePerUnit,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Date => write!(f, "date"),
            FormField::Product => write!(f, "product"),
            FormField::Quantity => write!(f, "quantity"),
            FormField::PricePerUnit => write!(f, "pricePerUnit"),
        }
    }
}

/// A field-level validation message shown once the form has been submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The add-transaction form model.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub date: String,
    pub product: String,
    pub txn_type: TxnType,
    pub quantity: f64,
    pub price_per_unit: f64,

    /// Set on the first submit attempt so the view starts showing field errors.
    pub submitted: bool,
}

impl TransactionForm {
    /// Blank form stamped with `now`.
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            date: iso_timestamp(now),
            product: String::new(),
            txn_type: TxnType::Buy,
            quantity: 0.0,
            price_per_unit: 0.0,
            submitted: false,
        }
    }

    /// Put every field back to its default, with a fresh timestamp.
    pub fn reset_at(&mut self, now: DateTime<Utc>) {
        *self = Self::new_at(now);
    }

    /// Check the form against the same rules the view enforces.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.date.trim().is_empty() {
            errors.push(FieldError::new(FormField::Date, "Date is required"));
        }
        if self.product.trim().is_empty() {
            errors.push(FieldError::new(FormField::Product, "Product is required"));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            errors.push(FieldError::new(
                FormField::Quantity,
                "Quantity must be greater than 0",
            ));
        }
        if !self.price_per_unit.is_finite() || self.price_per_unit <= 0.0 {
            errors.push(FieldError::new(
                FormField::PricePerUnit,
                "Price per unit must be greater than 0",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Field errors to display. Empty until the form has been submitted once.
    pub fn visible_errors(&self) -> Vec<FieldError> {
        if !self.submitted {
            return Vec::new();
        }
        self.validate().err().unwrap_or_default()
    }

    /// Build the unsaved transaction this form describes.
    pub fn to_transaction(&self) -> Transaction {
        Transaction::new(
            self.date.clone(),
            self.product.clone(),
            self.txn_type,
            self.quantity,
            self.price_per_unit,
        )
    }
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new_at(Utc::now())
    }
}
