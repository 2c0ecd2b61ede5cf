use axum::extract::{Extension, Form, Json, Path};
use axum::response::Redirect;
use axum_macros::debug_handler;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{BookingUpdate, ConfirmedQuote};
use crate::auth::User;
use crate::entities::Booking;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct ConfirmParams {
    origin: String,
    destination: String,
    price: String,
    wait_time: String,
    multiplier: Option<String>,
}

// POST /redirect/:provider_id: persist the confirmed quote and send the
// user to the provider's external booking page. Unparseable numbers mean a
// tampered or broken form; nothing is saved and the user goes back home.
#[debug_handler]
pub async fn confirm(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(provider_id): Path<Uuid>,
    Form(params): Form<ConfirmParams>,
) -> Result<Redirect, Error> {
    let provider = api.find_provider(user.clone(), provider_id).await?;

    let quote = match parse_confirmed(params) {
        Some(quote) => quote,
        None => return Ok(Redirect::to("/")),
    };

    api.create_booking(user, provider.id, quote).await?;

    Ok(Redirect::to(&provider.booking_link))
}

fn parse_confirmed(params: ConfirmParams) -> Option<ConfirmedQuote> {
    let price = params.price.trim().parse::<Decimal>().ok()?;
    let wait_time = params.wait_time.trim().parse::<i32>().ok()?;
    let multiplier = match params.multiplier.as_deref().map(str::trim) {
        None | Some("") => Decimal::ONE,
        Some(raw) => raw.parse().ok()?,
    };

    Some(ConfirmedQuote {
        origin: params.origin,
        destination: params.destination,
        price,
        wait_time,
        multiplier,
    })
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Booking>>, Error> {
    let bookings = api.list_bookings(user).await?;

    Ok(bookings.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, Error> {
    let booking = api.find_booking(user, id).await?;

    Ok(booking.into())
}

#[debug_handler]
pub async fn update(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Form(params): Form<BookingUpdate>,
) -> Result<Json<Booking>, Error> {
    let booking = api.update_booking(user, id, params).await?;

    Ok(booking.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, Error> {
    api.delete_booking(user, id).await?;

    Ok(Redirect::to("/my-quotes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(price: &str, wait_time: &str, multiplier: Option<&str>) -> ConfirmParams {
        ConfirmParams {
            origin: "Airport".into(),
            destination: "Downtown".into(),
            price: price.into(),
            wait_time: wait_time.into(),
            multiplier: multiplier.map(Into::into),
        }
    }

    #[test]
    fn well_formed_fields_parse() {
        let quote = parse_confirmed(params("19350.00", "7", Some("1.21"))).unwrap();

        assert_eq!(quote.price, Decimal::new(1935000, 2));
        assert_eq!(quote.wait_time, 7);
        assert_eq!(quote.multiplier, Decimal::new(121, 2));
    }

    #[test]
    fn missing_multiplier_defaults_to_one() {
        let quote = parse_confirmed(params("19350.00", "7", None)).unwrap();
        assert_eq!(quote.multiplier, Decimal::ONE);

        let quote = parse_confirmed(params("19350.00", "7", Some(""))).unwrap();
        assert_eq!(quote.multiplier, Decimal::ONE);
    }

    #[test]
    fn malformed_numbers_do_not_parse() {
        assert!(parse_confirmed(params("not-a-price", "7", Some("1.2"))).is_none());
        assert!(parse_confirmed(params("19350.00", "soon", Some("1.2"))).is_none());
        assert!(parse_confirmed(params("19350.00", "7", Some("surge"))).is_none());
    }
}
