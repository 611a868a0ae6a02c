// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Shared fixtures for roster tests: in-memory records and the canned
//! JSON payload a mock directory server returns.

use roster_app::{PostalAddress, Record, RecordId};

pub fn sample_record(id: i64, name: &str) -> Record {
    let slug = name.to_ascii_lowercase().replace(' ', ".");
    Record {
        id: RecordId::new(id),
        name: name.to_owned(),
        email: format!("{slug}@example.edu"),
        username: slug.clone(),
        phone: format!("555-01{id:02}"),
        website: format!("{slug}.example.edu"),
        company_name: "Example U".to_owned(),
        address: PostalAddress {
            street: format!("{id} College Ave"),
            suite: format!("Apt. {id}"),
            city: "Springfield".to_owned(),
            zipcode: format!("625{id:02}"),
        },
    }
}

pub fn sample_records(count: usize) -> Vec<Record> {
    (1..=count as i64)
        .map(|id| sample_record(id, &format!("Student {id}")))
        .collect()
}

/// JSON body in the remote endpoint's wire shape, including fields the
/// client is expected to ignore (`geo` inside the address).
pub fn sample_users_json() -> String {
    serde_json::json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "username": "Antonette",
            "email": "Shanna@melissa.tv",
            "address": {
                "street": "Victor Plains",
                "suite": "Suite 879",
                "city": "Wisokyburgh",
                "zipcode": "90566-7771",
                "geo": { "lat": "-43.9509", "lng": "-34.4618" }
            },
            "phone": "010-692-6593 x09125",
            "website": "anastasia.net",
            "company": {
                "name": "Deckow-Crist",
                "catchPhrase": "Proactive didactic contingency",
                "bs": "synergize scalable supply-chains"
            }
        }
    ])
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::{sample_records, sample_users_json};

    #[test]
    fn sample_records_have_unique_ids() {
        let records = sample_records(5);
        assert_eq!(records.len(), 5);
        for window in records.windows(2) {
            assert!(window[0].id < window[1].id);
        }
    }

    #[test]
    fn sample_users_json_is_an_array_of_two() {
        let value: serde_json::Value =
            serde_json::from_str(&sample_users_json()).expect("fixture parses");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
