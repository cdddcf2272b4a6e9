//! Demo records and the synthetic data generator.
//!
//! The table displays a directory of people. Records are generated once at
//! startup and are immutable afterwards; a `--seed` flag makes runs
//! reproducible.

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;

use crate::table::{ColumnRegistry, ColumnSpec, Record, Value};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carmen", "Derek", "Elena", "Felix", "Greta", "Hugo", "Iris", "Jonas",
    "Katja", "Liam", "Mona", "Nadia", "Oscar", "Priya", "Quentin", "Rosa", "Stefan", "Tara",
    "Umar", "Vera", "Wendel", "Xenia", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Baier", "Costa", "Dietrich", "Evans", "Fischer", "Garcia", "Hoffmann", "Ito",
    "Jensen", "Keller", "Lindgren", "Moreau", "Novak", "Okafor", "Petrov", "Quinn", "Rossi",
    "Schmidt", "Tanaka", "Ullrich", "Vargas", "Weber", "Young", "Zimmer",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "mail.test", "post.dev"];

/// One row of the demo directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// 24-character hex identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Contact address derived from the name.
    pub email: String,
    /// Age in years.
    pub age: i64,
    /// Date the person registered.
    pub registration_date: NaiveDate,
}

impl Record for Person {
    fn value(&self, column_id: &str) -> Option<Value> {
        match column_id {
            "id" => Some(Value::Text(self.id.clone())),
            "name" => Some(Value::Text(self.name.clone())),
            "email" => Some(Value::Text(self.email.clone())),
            "age" => Some(Value::Int(self.age)),
            "registration_date" => Some(Value::Date(self.registration_date)),
            _ => None,
        }
    }
}

/// The column registry for the person directory.
///
/// Sizes are terminal cells. The registration date renders through the
/// date formatter and keeps a fixed width.
pub fn person_columns() -> ColumnRegistry {
    ColumnRegistry::new(vec![
        ColumnSpec::new("id", "ID").with_size(26),
        ColumnSpec::new("name", "Name").with_size(18).filterable(),
        ColumnSpec::new("email", "Email").with_size(28).filterable(),
        ColumnSpec::new("age", "Age").with_size(7),
        ColumnSpec::new("registration_date", "Registered")
            .with_size(14)
            .fixed(),
    ])
}

fn hex_id(rng: &mut impl Rng) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    (0..24)
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect()
}

fn new_person(rng: &mut impl Rng) -> Person {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    let domain = EMAIL_DOMAINS[rng.random_range(0..EMAIL_DOMAINS.len())];

    let name = format!("{} {}", first, last);
    let email = format!(
        "{}.{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        domain
    );

    // Registered some time within the past two years.
    let days_ago = rng.random_range(0..730);
    let registration_date = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days_ago))
        .unwrap_or_else(|| Utc::now().date_naive());

    Person {
        id: hex_id(rng),
        name,
        email,
        age: rng.random_range(16..=40),
        registration_date,
    }
}

/// Generate `len` synthetic people from the given source of randomness.
pub fn make_data(len: usize, rng: &mut impl Rng) -> Vec<Person> {
    (0..len).map(|_| new_person(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_make_data_len() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(make_data(20, &mut rng).len(), 20);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(make_data(0, &mut rng).is_empty());
    }

    #[test]
    fn test_person_fields_are_plausible() {
        let mut rng = StdRng::seed_from_u64(7);
        for person in make_data(50, &mut rng) {
            assert_eq!(person.id.len(), 24);
            assert!(person.id.chars().all(|c| c.is_ascii_hexdigit()));
            assert!((16..=40).contains(&person.age));
            assert!(person.name.contains(' '));
            assert!(person.email.contains('@'));
            assert!(person.registration_date <= Utc::now().date_naive());
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(make_data(10, &mut a), make_data(10, &mut b));
    }

    #[test]
    fn test_record_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let person = &make_data(1, &mut rng)[0];

        assert_eq!(
            person.value("name"),
            Some(Value::Text(person.name.clone()))
        );
        assert_eq!(person.value("age"), Some(Value::Int(person.age)));
        assert_eq!(
            person.value("registration_date"),
            Some(Value::Date(person.registration_date))
        );
        assert_eq!(person.value("unknown"), None);
    }

    #[test]
    fn test_registry_matches_record_columns() {
        let registry = person_columns();
        let mut rng = StdRng::seed_from_u64(3);
        let person = &make_data(1, &mut rng)[0];

        for spec in registry.iter() {
            assert!(person.value(&spec.id).is_some(), "column {}", spec.id);
        }
    }

    #[test]
    fn test_registry_capabilities() {
        let registry = person_columns();
        assert!(registry.get("name").unwrap().filterable);
        assert!(registry.get("email").unwrap().filterable);
        assert!(!registry.get("id").unwrap().filterable);
        assert!(!registry.get("registration_date").unwrap().resizable);
    }
}
