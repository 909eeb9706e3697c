// Identity records for tests

use role_claims_core::kernel::IdentityRecord;
use serde_json::{Map, Value};

const DOMAINS: [&str; 5] = ["Equipment", "Chat", "System", "Storage", "Calendar"];
const LEVELS: [&str; 3] = ["reader", "writer", "admin"];

/// Account with the given custom claims
pub fn record(uid: &str, claims: Value) -> IdentityRecord {
    let claims: Map<String, Value> =
        serde_json::from_value(claims).expect("Claims fixture must be an object");
    IdentityRecord::new(uid).with_claims(claims)
}

/// `count` accounts, each holding one role picked from its index
pub fn generated_records(count: usize) -> Vec<IdentityRecord> {
    (0..count)
        .map(|i| {
            let mut claims = Map::new();
            let domain = DOMAINS[i % DOMAINS.len()];
            let level = LEVELS[i % LEVELS.len()];
            claims.insert(format!("{}Role", domain), Value::from(level));

            let mut record =
                IdentityRecord::new(uuid::Uuid::new_v4().to_string()).with_claims(claims);
            record.display_name = Some(format!("User {}", i));
            record
        })
        .collect()
}

/// Domain and level `generated_records` assigned to record `i`
pub fn generated_role(i: usize) -> (&'static str, &'static str) {
    (DOMAINS[i % DOMAINS.len()], LEVELS[i % LEVELS.len()])
}
