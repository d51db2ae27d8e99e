use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Catalog entry. Global and read-only through the API.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub default_cost: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TripActivity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub stop_id: Option<Uuid>,
    pub activity_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub scheduled_date: Option<OffsetDateTime>,
    pub cost: Decimal,
    pub duration_minutes: Option<i32>,
    pub order_index: i32,
    pub notes: Option<String>,
}

/// Validated insert. `title` and `cost` fall back to the catalog entry when
/// `activity_id` is set.
#[derive(Debug, Clone)]
pub struct NewTripActivity {
    pub stop_id: Option<Uuid>,
    pub activity_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_date: Option<OffsetDateTime>,
    pub cost: Option<Decimal>,
    pub duration_minutes: Option<i32>,
    pub order_index: Option<i32>,
    pub notes: Option<String>,
}

pub(crate) const ACTIVITY_COLUMNS: &str = "id, name, category, description, default_cost";

pub(crate) const TRIP_ACTIVITY_COLUMNS: &str = "ta.id, ta.trip_id, ta.stop_id, ta.activity_id, ta.title, ta.description, \
     ta.scheduled_date, ta.cost, ta.duration_minutes, ta.order_index, ta.notes";

pub(crate) struct SeedActivity {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub default_cost: &'static str,
}

pub(crate) const SEED_CATALOG: &[SeedActivity] = &[
    SeedActivity { name: "Eiffel Tower Visit", category: "Sightseeing", description: "Visit the iconic iron lattice tower", default_cost: "30.00" },
    SeedActivity { name: "Louvre Museum", category: "Culture", description: "World's largest art museum", default_cost: "25.00" },
    SeedActivity { name: "Colosseum Tour", category: "History", description: "Ancient Roman amphitheatre", default_cost: "40.00" },
    SeedActivity { name: "Sushi Making Class", category: "Food", description: "Learn to make authentic sushi", default_cost: "80.00" },
    SeedActivity { name: "Grand Canal Gondola", category: "Experience", description: "Romantic ride in Venice", default_cost: "100.00" },
    SeedActivity { name: "Statue of Liberty Ferry", category: "Sightseeing", description: "Visit the symbol of freedom", default_cost: "20.00" },
    SeedActivity { name: "Mount Fuji Day Trip", category: "Nature", description: "Full day tour to Japan's highest peak", default_cost: "120.00" },
    SeedActivity { name: "Wine Tasting in Tuscany", category: "Food & Drink", description: "Visit local vineyards", default_cost: "90.00" },
    SeedActivity { name: "Northern Lights Tour", category: "Nature", description: "Hunt for the aurora borealis", default_cost: "150.00" },
    SeedActivity { name: "Safari in Kruger Park", category: "Adventure", description: "African wildlife experience", default_cost: "250.00" },
];
