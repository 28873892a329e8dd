use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    models::{ProductRequest, ProductStatus, StoreAvailability},
    utils::validation::is_valid_email,
};

use super::error::ClientError;

/// Mirror of the add/edit product form: numeric fields arrive as text from
/// the inputs and are only parsed on submit. [`ProductForm::validate`] is
/// the fast-path check; the server re-validates the same rules.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub location: String,
    pub image: String,
    pub status: Option<ProductStatus>,
    pub brand: String,
    pub sizes: String,
    pub product_code: String,
    pub order_name: String,
    pub store_availability: Vec<StoreAvailability>,
}

fn optional(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ProductForm {
    /// Produces the typed request payload, or the first validation failure.
    pub fn validate(&self) -> Result<ProductRequest, ClientError> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation("Name is required".to_string()));
        }

        if self.price.trim().is_empty() {
            return Err(ClientError::Validation("Price is required".to_string()));
        }

        let price = Decimal::from_str(self.price.trim()).map_err(|_| {
            ClientError::Validation("Price must be a valid positive number".to_string())
        })?;
        if price <= Decimal::ZERO {
            return Err(ClientError::Validation(
                "Price must be a valid positive number".to_string(),
            ));
        }

        let stock = match self.stock.trim() {
            "" => None,
            text => {
                let stock = text.parse::<i32>().map_err(|_| {
                    ClientError::Validation(
                        "Stock must be a valid non-negative number".to_string(),
                    )
                })?;
                if stock < 0 {
                    return Err(ClientError::Validation(
                        "Stock must be a valid non-negative number".to_string(),
                    ));
                }
                Some(stock)
            }
        };

        Ok(ProductRequest {
            name: Some(self.name.trim().to_string()),
            description: optional(&self.description),
            price: Some(price),
            stock,
            category: optional(&self.category),
            location: optional(&self.location),
            image: optional(&self.image),
            status: self.status,
            brand: optional(&self.brand),
            sizes: optional(&self.sizes),
            product_code: optional(&self.product_code),
            order_name: optional(&self.order_name),
            store_availability: if self.store_availability.is_empty() {
                None
            } else {
                Some(self.store_availability.clone())
            },
        })
    }
}

pub fn validate_login(username: &str, password: &str) -> Result<(), ClientError> {
    if username.trim().is_empty() {
        return Err(ClientError::Validation("Username is required".to_string()));
    }

    if password.trim().is_empty() {
        return Err(ClientError::Validation("Password is required".to_string()));
    }

    Ok(())
}

pub fn validate_registration(
    username: &str,
    password: &str,
    email: Option<&str>,
) -> Result<(), ClientError> {
    validate_login(username, password)?;

    if password.len() < 6 {
        return Err(ClientError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if let Some(email) = email {
        if !email.trim().is_empty() && !is_valid_email(email.trim()) {
            return Err(ClientError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
    }

    Ok(())
}
