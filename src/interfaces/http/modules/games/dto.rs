//! Game DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{Game, NewGame};
use crate::shared::pagination::{PageRequest, DEFAULT_PAGE_SIZE};

/// Largest accepted price. With at most two decimal places this keeps every
/// price within the digits an `f64` holds exactly, so the JSON number in
/// responses decodes back to the stored value.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Decimal places a price may carry.
pub const PRICE_SCALE: u32 = 2;

/// Catalog record. `price` is rendered as a JSON number.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub id: Uuid,
    pub name: String,
    pub publisher: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<Game> for GameResponse {
    fn from(g: Game) -> Self {
        Self {
            id: g.id,
            name: g.name,
            publisher: g.publisher,
            price: g.price,
        }
    }
}

/// Body of insert and full-update requests.
///
/// `price` accepts a JSON number or a decimal string (`29.99` or `"29.99"`).
/// It must lie in `0..=MAX_PRICE` with at most two decimal places.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GameRequest {
    #[validate(
        length(min = 1, max = 100, message = "name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, max = 100, message = "publisher must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub publisher: String,
    #[validate(custom(function = "valid_price"))]
    pub price: Decimal,
}

impl From<GameRequest> for NewGame {
    fn from(req: GameRequest) -> Self {
        NewGame::new(req.name, req.publisher, req.price)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn price_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(price_error("negative", "price must not be negative".into()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(price_error(
            "scale",
            format!("price must have at most {PRICE_SCALE} decimal places"),
        ));
    }
    if *price > MAX_PRICE {
        return Err(price_error(
            "too_large",
            format!("price must not exceed {MAX_PRICE}"),
        ));
    }
    Ok(())
}

/// Parse a price path segment under the same rules as request bodies.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let price = raw.trim().parse::<Decimal>().ok()?;
    valid_price(&price).ok()?;
    Some(price)
}

/// Pagination query parameters
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGamesParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    #[param(minimum = 1, default = 1)]
    pub page: u32,
    /// Records per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 50, message = "page_size must be between 1 and 50"))]
    #[param(minimum = 1, maximum = 50, default = 5)]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl From<ListGamesParams> for PageRequest {
    fn from(p: ListGamesParams) -> Self {
        PageRequest::new(p.page, p.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, publisher: &str, price: Decimal) -> GameRequest {
        GameRequest {
            name: name.into(),
            publisher: publisher.into(),
            price,
        }
    }

    #[test]
    fn well_formed_request_validates() {
        assert!(request("Chrono Trigger", "Square", Decimal::new(2999, 2))
            .validate()
            .is_ok());
        assert!(request("Free", "Indie", Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn blank_and_oversized_fields_fail() {
        let errors = request("   ", &"x".repeat(101), Decimal::ONE)
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("publisher"));
    }

    #[test]
    fn negative_price_fails() {
        let errors = request("Tetris", "Nintendo", Decimal::new(-1, 2))
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn over_precise_or_huge_price_fails() {
        for price in [
            Decimal::new(1999, 3),
            Decimal::from_str_exact("12345678901234567.89").unwrap(),
            MAX_PRICE + Decimal::new(1, 2),
        ] {
            let errors = request("Tetris", "Nintendo", price).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("price"), "{price}");
        }
        assert!(request("Tetris", "Nintendo", MAX_PRICE).validate().is_ok());
        // Trailing zeros do not count as precision.
        assert!(request("Tetris", "Nintendo", Decimal::new(29900, 3))
            .validate()
            .is_ok());
    }

    #[test]
    fn response_price_decodes_back_exactly() {
        #[derive(Deserialize)]
        struct Echo {
            #[serde(with = "rust_decimal::serde::float")]
            price: Decimal,
        }

        for raw in ["0", "0.01", "0.1", "9.99", "29.90", "12345.67", "999999999.99", "1000000000"] {
            let stored = raw.parse::<Decimal>().unwrap();
            let req = request("Tetris", "Nintendo", stored);
            assert!(req.validate().is_ok(), "{raw}");

            let game = NewGame::from(req).into_game();
            let body = serde_json::to_string(&GameResponse::from(game)).unwrap();
            let echo: Echo = serde_json::from_str(&body).unwrap();
            assert_eq!(echo.price, stored, "{raw} rendered as {body}");
        }
    }

    #[test]
    fn price_accepts_number_or_string() {
        let from_number: GameRequest =
            serde_json::from_str(r#"{"name":"a","publisher":"b","price":29.99}"#).unwrap();
        let from_string: GameRequest =
            serde_json::from_str(r#"{"name":"a","publisher":"b","price":"29.99"}"#).unwrap();
        assert_eq!(from_number.price, Decimal::new(2999, 2));
        assert_eq!(from_string.price, Decimal::new(2999, 2));
    }

    #[test]
    fn response_serializes_price_as_number() {
        let game = NewGame::new("Tetris", "Nintendo", Decimal::new(999, 2)).into_game();
        let json = serde_json::to_value(GameResponse::from(game)).unwrap();
        assert_eq!(json["price"], serde_json::json!(9.99));
    }

    #[test]
    fn parse_price_rules() {
        assert_eq!(parse_price("9.99"), Some(Decimal::new(999, 2)));
        assert_eq!(parse_price("0"), Some(Decimal::ZERO));
        assert_eq!(parse_price("-0.01"), None);
        assert_eq!(parse_price("1.999"), None);
        assert_eq!(parse_price("12345678901234567.89"), None);
        assert_eq!(parse_price("cheap"), None);
    }
}
