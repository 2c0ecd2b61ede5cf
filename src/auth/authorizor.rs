use oso::{Oso, PolarClass};

use crate::auth::{Platform, User};
use crate::entities::Booking;

pub fn new() -> Oso {
    let mut o = Oso::new();

    o.register_class(Platform::get_polar_class()).unwrap();
    o.register_class(User::get_polar_class()).unwrap();
    o.register_class(Booking::get_polar_class()).unwrap();

    o.load_str(include_str!("rules.polar")).unwrap();

    o
}

#[cfg(test)]
fn test_booking(user_id: uuid::Uuid) -> Booking {
    use crate::entities::{PricingPolicy, Provider};
    use rust_decimal::Decimal;

    let provider = Provider::new(
        "FastCab".into(),
        "logos/default.png".into(),
        Decimal::new(300000, 2),
        Decimal::new(80000, 2),
        PricingPolicy::Randomized {
            max_multiplier: Decimal::new(150, 2),
        },
        "https://fastcab.example/book".into(),
    );

    Booking::new(
        user_id,
        None,
        "Airport".into(),
        "Downtown".into(),
        &provider,
        Decimal::new(1900000, 2),
        5,
        Decimal::ONE,
    )
}

#[test]
fn owner_booking_role_test() {
    use uuid::Uuid;

    let authorizor = new();

    let owner = User::new(Uuid::new_v4());
    let booking = test_booking(owner.id);

    let result = authorizor.query_rule("has_role", (owner.clone(), "owner", booking.clone()));
    assert!(result.unwrap().next().unwrap().is_ok());

    for action in ["read", "update", "delete"] {
        let result = authorizor.is_allowed(owner.clone(), action, booking.clone());
        assert_eq!(result.unwrap(), true);
    }
}

#[test]
fn foreign_user_cannot_touch_booking_test() {
    use uuid::Uuid;

    let authorizor = new();

    let owner = User::new(Uuid::new_v4());
    let stranger = User::new(Uuid::new_v4());
    let booking = test_booking(owner.id);

    for action in ["read", "update", "delete"] {
        let result = authorizor.is_allowed(stranger.clone(), action, booking.clone());
        assert_eq!(result.unwrap(), false);
    }
}

#[test]
fn platform_admin_role_test() {
    use uuid::Uuid;

    let authorizor = new();

    let admin = User {
        id: Uuid::new_v4(),
        roles: vec!["admin".into()],
    };

    let result = authorizor.is_allowed(admin.clone(), "create_provider", Platform::default());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(admin, "create_route", Platform::default());
    assert_eq!(result.unwrap(), true);

    let rider = User::new(Uuid::new_v4());
    let result = authorizor.is_allowed(rider, "create_provider", Platform::default());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn system_role_implies_admin_test() {
    let authorizor = new();

    let system = User::new_system_user();

    let result = authorizor.is_allowed(system, "create_provider", Platform::default());
    assert_eq!(result.unwrap(), true);
}
