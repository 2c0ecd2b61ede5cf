use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub origin: String,
    pub destination: String,
    pub distance_km: Decimal,
    pub time_min: i32,
    pub created_by: Option<Uuid>,
}

impl Route {
    pub fn new(
        origin: String,
        destination: String,
        distance_km: Decimal,
        time_min: i32,
        created_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            destination,
            distance_km,
            time_min,
            created_by,
        }
    }

    /// A route connects a pair in either direction, case-insensitively.
    pub fn connects(&self, origin: &str, destination: &str) -> bool {
        let origin = origin.to_lowercase();
        let destination = destination.to_lowercase();
        let own_origin = self.origin.to_lowercase();
        let own_destination = self.destination.to_lowercase();

        (own_origin == origin && own_destination == destination)
            || (own_origin == destination && own_destination == origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn connects_in_both_directions() {
        let route = airport_downtown();

        assert!(route.connects("Airport", "Downtown"));
        assert!(route.connects("Downtown", "Airport"));
    }

    #[test]
    fn connects_ignores_case() {
        let route = airport_downtown();

        assert!(route.connects("airport", "DOWNTOWN"));
        assert!(route.connects("downtown", "airport"));
    }

    #[test]
    fn does_not_connect_unknown_pair() {
        let route = airport_downtown();

        assert!(!route.connects("Airport", "Harbor"));
        assert!(!route.connects("Harbor", "Downtown"));
    }
}
