use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::entities::{PricingPolicy, Provider, Quote, Route};
use crate::error::{validation_error, Error};

const WAIT_TIME_MIN: i32 = 3;
const WAIT_TIME_MAX: i32 = 12;

#[derive(Clone, Debug)]
pub struct Estimate {
    pub price: Decimal,
    pub wait_time: i32,
    pub multiplier: Decimal,
}

// currency rounding is half-up throughout
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Simulates one provider's offer for a route. Randomized providers draw a
/// fresh multiplier and wait time on every call; fixed providers are
/// deterministic.
pub fn estimate(provider: &Provider, route: &Route) -> Result<Estimate, Error> {
    estimate_with(provider, route, &mut rand::thread_rng())
}

pub fn estimate_with<R: Rng>(
    provider: &Provider,
    route: &Route,
    rng: &mut R,
) -> Result<Estimate, Error> {
    if route.distance_km <= Decimal::ZERO {
        return Err(validation_error("route distance must be positive"));
    }

    if provider.base_fare < Decimal::ZERO || provider.cost_per_km < Decimal::ZERO {
        return Err(validation_error("provider fares must not be negative"));
    }

    match &provider.policy {
        PricingPolicy::Randomized { max_multiplier } => {
            if *max_multiplier < Decimal::ONE {
                return Err(validation_error("max multiplier must be at least 1"));
            }

            let ceiling = max_multiplier
                .to_f64()
                .ok_or_else(|| validation_error("max multiplier out of range"))?;
            let drawn = rng.gen_range(1.0..=ceiling);
            // rounding a draw near the ceiling must not push it past the ceiling
            let multiplier = round_currency(
                Decimal::from_f64(drawn)
                    .ok_or_else(|| validation_error("multiplier out of range"))?,
            )
            .min(*max_multiplier);

            let variable_cost = route.distance_km * provider.cost_per_km * multiplier;
            let price = round_currency(provider.base_fare + variable_cost);
            let wait_time = rng.gen_range(WAIT_TIME_MIN..=WAIT_TIME_MAX);

            Ok(Estimate {
                price,
                wait_time,
                multiplier,
            })
        }
        PricingPolicy::Fixed {
            cost_per_min,
            multiplier,
            wait_time,
        } => {
            if *cost_per_min < Decimal::ZERO {
                return Err(validation_error("provider fares must not be negative"));
            }
            if *multiplier <= Decimal::ZERO {
                return Err(validation_error("multiplier must be positive"));
            }

            let base = provider.base_fare
                + route.distance_km * provider.cost_per_km
                + Decimal::from(route.time_min) * *cost_per_min;
            let price = round_currency(base * *multiplier);

            Ok(Estimate {
                price,
                wait_time: *wait_time,
                multiplier: round_currency(*multiplier),
            })
        }
    }
}

/// Quotes a route across every registered provider, in the order given.
/// A provider that fails to estimate is logged and skipped; it never aborts
/// the pass.
pub fn quote_providers(providers: &[Provider], route: &Route) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(providers.len());

    for provider in providers {
        match estimate(provider, route) {
            Ok(est) => quotes.push(Quote::new(provider, route, est)),
            Err(err) => {
                tracing::warn!(provider = %provider.name, error = ?err, "skipping provider quote");
            }
        }
    }

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn fast_cab() -> Provider {
        Provider::new(
            "FastCab".into(),
            "logos/fastcab.png".into(),
            Decimal::new(300000, 2),
            Decimal::new(80000, 2),
            PricingPolicy::Randomized {
                max_multiplier: Decimal::new(150, 2),
            },
            "https://fastcab.example/book".into(),
        )
    }

    fn legacy_cab() -> Provider {
        Provider::new(
            "LegacyCab".into(),
            "logos/default.png".into(),
            Decimal::new(300000, 2),
            Decimal::new(80000, 2),
            PricingPolicy::Fixed {
                cost_per_min: Decimal::new(10000, 2),
                multiplier: Decimal::ONE,
                wait_time: 5,
            },
            "https://www.google.com".into(),
        )
    }

    fn airport_downtown() -> Route {
        Route::new(
            "Airport".into(),
            "Downtown".into(),
            Decimal::new(2000, 2),
            25,
            None,
        )
    }

    #[test]
    fn randomized_estimate_stays_within_bounds() {
        let provider = fast_cab();
        let route = airport_downtown();

        for _ in 0..200 {
            let est = estimate(&provider, &route).unwrap();

            assert!(est.price >= provider.base_fare);
            assert!(est.multiplier >= Decimal::ONE);
            assert!(est.multiplier <= Decimal::new(150, 2));
            assert_eq!(est.multiplier, round_currency(est.multiplier));
            assert!((WAIT_TIME_MIN..=WAIT_TIME_MAX).contains(&est.wait_time));
        }
    }

    #[test]
    fn randomized_price_follows_the_drawn_multiplier() {
        // base 3000, 20 km at 800/km, max multiplier 1.5:
        // price must equal round(3000 + 20 * 800 * m) and stay in [3000, 27000]
        let provider = fast_cab();
        let route = airport_downtown();

        for _ in 0..200 {
            let est = estimate(&provider, &route).unwrap();

            let expected = round_currency(
                provider.base_fare + route.distance_km * provider.cost_per_km * est.multiplier,
            );
            assert_eq!(est.price, expected);
            assert!(est.price >= Decimal::new(300000, 2));
            assert!(est.price <= Decimal::new(2700000, 2));
        }
    }

    #[test]
    fn fixed_estimate_is_deterministic() {
        let provider = legacy_cab();
        let route = airport_downtown();

        // 3000 + 20 * 800 + 25 * 100 = 21500
        let est = estimate(&provider, &route).unwrap();
        assert_eq!(est.price, Decimal::new(2150000, 2));
        assert_eq!(est.wait_time, 5);
        assert_eq!(est.multiplier, Decimal::new(100, 2));

        let again = estimate(&provider, &route).unwrap();
        assert_eq!(est.price, again.price);
        assert_eq!(est.wait_time, again.wait_time);
    }

    #[test]
    fn fixed_multiplier_scales_the_whole_fare() {
        let mut provider = legacy_cab();
        provider.policy = PricingPolicy::Fixed {
            cost_per_min: Decimal::new(10000, 2),
            multiplier: Decimal::new(110, 2),
            wait_time: 8,
        };
        let route = airport_downtown();

        // 21500 * 1.10 = 23650.00
        let est = estimate(&provider, &route).unwrap();
        assert_eq!(est.price, Decimal::new(2365000, 2));
        assert_eq!(est.wait_time, 8);
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        let provider = fast_cab();
        let mut route = airport_downtown();

        route.distance_km = Decimal::ZERO;
        assert!(estimate(&provider, &route).is_err());

        route.distance_km = Decimal::new(-100, 2);
        assert!(estimate(&provider, &route).is_err());
    }

    #[test]
    fn malformed_provider_parameters_are_rejected() {
        let route = airport_downtown();

        let mut provider = fast_cab();
        provider.policy = PricingPolicy::Randomized {
            max_multiplier: Decimal::new(50, 2),
        };
        assert!(estimate(&provider, &route).is_err());

        let mut provider = fast_cab();
        provider.cost_per_km = Decimal::new(-80000, 2);
        assert!(estimate(&provider, &route).is_err());
    }

    #[test]
    fn degenerate_multiplier_range_yields_one() {
        let mut provider = fast_cab();
        provider.policy = PricingPolicy::Randomized {
            max_multiplier: Decimal::ONE,
        };
        let route = airport_downtown();

        let est = estimate(&provider, &route).unwrap();
        assert_eq!(est.multiplier, Decimal::new(100, 2));
        // 3000 + 20 * 800 * 1.00
        assert_eq!(est.price, Decimal::new(1900000, 2));
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        use rand::{rngs::StdRng, SeedableRng};

        let provider = fast_cab();
        let route = airport_downtown();

        let a = estimate_with(&provider, &route, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = estimate_with(&provider, &route, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(a.price, b.price);
        assert_eq!(a.wait_time, b.wait_time);
        assert_eq!(a.multiplier, b.multiplier);
    }

    #[test]
    fn quoting_with_no_providers_yields_empty_list() {
        let route = airport_downtown();

        assert!(quote_providers(&[], &route).is_empty());
    }

    #[test]
    fn malformed_provider_is_skipped_not_fatal() {
        let route = airport_downtown();

        let mut broken = fast_cab();
        broken.name = "BrokenCab".into();
        broken.policy = PricingPolicy::Randomized {
            max_multiplier: Decimal::new(50, 2),
        };

        let providers = vec![fast_cab(), broken, legacy_cab()];
        let quotes = quote_providers(&providers, &route);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].provider_name, "FastCab");
        assert_eq!(quotes[1].provider_name, "LegacyCab");
    }

    #[test]
    fn quotes_carry_the_resolved_route_direction() {
        let providers = vec![fast_cab()];
        let route = airport_downtown();

        let quotes = quote_providers(&providers, &route);
        assert_eq!(quotes[0].origin, "Airport");
        assert_eq!(quotes[0].destination, "Downtown");
        assert_eq!(quotes[0].provider_id, providers[0].id);
        assert_ne!(quotes[0].provider_id, Uuid::nil());
    }
}
