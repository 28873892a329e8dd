use rust_decimal::Decimal;

use crate::{
    error::{AppError, Result},
    models::ProductRequest,
};

/// Authoritative gate: invalid data never reaches the products table, no
/// matter what the client pre-checked.
pub fn validate_product(payload: &ProductRequest) -> Result<()> {
    match payload.name.as_deref() {
        None => return Err(AppError::BadRequest("name is required".to_string())),
        Some(name) if name.trim().is_empty() => {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        Some(_) => {}
    }

    match payload.price {
        None => return Err(AppError::BadRequest("price is required".to_string())),
        Some(price) if price <= Decimal::ZERO => {
            return Err(AppError::BadRequest(
                "price must be a positive number".to_string(),
            ));
        }
        Some(_) => {}
    }

    if let Some(stock) = payload.stock {
        if stock < 0 {
            return Err(AppError::BadRequest(
                "stock must be a non-negative number".to_string(),
            ));
        }
    }

    Ok(())
}

/// Same shape check on both sides of the wire: one `@`, non-empty local
/// part, a dot somewhere in the domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> ProductRequest {
        ProductRequest {
            name: Some("Widget".to_string()),
            price: Some(Decimal::new(999, 2)),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_valid_payload() {
        assert!(validate_product(&valid_payload()).is_ok());
    }

    #[test]
    fn rejects_missing_or_blank_name() {
        let mut payload = valid_payload();
        payload.name = None;
        assert!(matches!(
            validate_product(&payload),
            Err(AppError::BadRequest(_))
        ));

        payload.name = Some("   ".to_string());
        assert!(matches!(
            validate_product(&payload),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_missing_zero_or_negative_price() {
        let mut payload = valid_payload();
        payload.price = None;
        assert!(validate_product(&payload).is_err());

        payload.price = Some(Decimal::ZERO);
        assert!(validate_product(&payload).is_err());

        payload.price = Some(Decimal::new(-100, 2));
        assert!(validate_product(&payload).is_err());
    }

    #[test]
    fn rejects_negative_stock_but_allows_absent() {
        let mut payload = valid_payload();
        payload.stock = Some(-1);
        assert!(validate_product(&payload).is_err());

        payload.stock = None;
        assert!(validate_product(&payload).is_ok());

        payload.stock = Some(0);
        assert!(validate_product(&payload).is_ok());
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@.com"));
    }
}
