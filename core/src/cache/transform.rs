use std::collections::HashSet;

use crate::api::{Error, RemoteSession};
use crate::cache::SessionSummary;

/// Converts the backend's listing into cache entries, keeping backend order.
///
/// A record without an id fails the whole listing. Repeated ids keep their
/// first occurrence, and a blank name falls back to the id.
pub fn to_summaries(remote: Vec<RemoteSession>) -> Result<Vec<SessionSummary>, Error> {
    let mut seen = HashSet::with_capacity(remote.len());
    let mut summaries = Vec::with_capacity(remote.len());

    for (index, record) in remote.into_iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(Error::InvalidShape(format!("record {} has an empty id", index)));
        }
        let session_id = record.id;
        if !seen.insert(session_id.clone()) {
            log::debug!("Dropping duplicate session {} from listing", session_id);
            continue;
        }

        let display_name = if record.name.trim().is_empty() {
            session_id.clone()
        } else {
            record.name
        };

        summaries.push(SessionSummary {
            session_id,
            display_name,
            created_at: record.created_at,
        });
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn remote(id: &str, name: &str) -> RemoteSession {
        RemoteSession {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn to_summaries_maps_fields_and_keeps_order() {
        // Act
        let summaries = to_summaries(vec![remote("s2", "Second"), remote("s1", "Ops")]).unwrap();

        // Assert
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].session_id, "s2");
        assert_eq!(summaries[1], SessionSummary::new("s1", "Ops", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn to_summaries_with_empty_id_returns_invalid_shape() {
        let result = to_summaries(vec![remote("s1", "Ops"), remote("  ", "Broken")]);

        match result {
            Err(Error::InvalidShape(message)) => assert!(message.contains("record 1")),
            other => panic!("Expected InvalidShape, got {:?}", other),
        }
    }

    #[test]
    fn to_summaries_keeps_ids_verbatim() {
        let summaries = to_summaries(vec![remote(" s1 ", "Ops")]).unwrap();

        assert_eq!(summaries[0].session_id, " s1 ");
    }

    #[test]
    fn to_summaries_keeps_first_of_duplicate_ids() {
        let summaries = to_summaries(vec![remote("s1", "First"), remote("s1", "Second")]).unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].display_name, "First");
    }

    #[test]
    fn to_summaries_with_blank_name_uses_id() {
        let summaries = to_summaries(vec![remote("s1", "")]).unwrap();

        assert_eq!(summaries[0].display_name, "s1");
    }

    #[test]
    fn to_summaries_of_empty_listing_is_empty() {
        assert!(to_summaries(vec![]).unwrap().is_empty());
    }
}
