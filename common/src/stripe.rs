use stripe::Client;

use crate::error::{AppError, Res};

/// Builds a Stripe client, refusing to do so when no secret key is configured.
pub fn create_client(secret_key: &str) -> Res<Client> {
    if secret_key.trim().is_empty() {
        return Err(AppError::Config(
            "STRIPE_SECRET_KEY is not configured".to_string(),
        ));
    }
    Ok(Client::new(secret_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_secret_key_is_a_config_error() {
        let Err(err) = create_client("  ") else {
            panic!("blank secret key accepted");
        };
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.to_string(), "STRIPE_SECRET_KEY is not configured");
    }
}
