use log::warn;
use shared::{AvailabilityState, BookingDetail};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingDetailError {
    #[error("Booking details need a date")]
    EmptyKey,
    #[error("Booking details can only be saved for busy or tentative days ({date_key} is {state})")]
    NotBookable {
        date_key: String,
        state: AvailabilityState,
    },
    #[error("No booking details for {0}")]
    NotFound(String),
}

/// Booking details of one owner, keyed by date key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDetailMap {
    entries: BTreeMap<String, BookingDetail>,
}

impl BookingDetailMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the detail at `key`; the detail's own date key is
    /// overwritten with `key`
    pub fn upsert(
        &mut self,
        key: &str,
        mut detail: BookingDetail,
    ) -> Result<Option<BookingDetail>, BookingDetailError> {
        if key.is_empty() {
            return Err(BookingDetailError::EmptyKey);
        }
        detail.date_key = key.to_string();
        Ok(self.entries.insert(key.to_string(), detail))
    }

    pub fn remove(&mut self, key: &str) -> Option<BookingDetail> {
        self.entries.remove(key)
    }

    /// Drop the address of the detail at `key`; true when one was removed
    pub fn clear_address(&mut self, key: &str) -> bool {
        self.entries
            .get_mut(key)
            .and_then(|detail| detail.address.take())
            .is_some()
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &BookingDetail) -> bool,
    {
        self.entries.retain(|key, detail| keep(key, detail));
    }

    pub fn get(&self, key: &str) -> Option<&BookingDetail> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BookingDetail)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &BookingDetail> {
        self.entries.values()
    }
}

impl FromIterator<(String, BookingDetail)> for BookingDetailMap {
    fn from_iter<I: IntoIterator<Item = (String, BookingDetail)>>(iter: I) -> Self {
        let mut map = BookingDetailMap::new();
        for (key, detail) in iter {
            if let Err(e) = map.upsert(&key, detail) {
                warn!("Skipping stored booking detail: {}", e);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(person: &str) -> BookingDetail {
        BookingDetail {
            date_key: String::new(),
            contact_person: person.to_string(),
            contact_phone: "999 888 777".to_string(),
            address: None,
            description: "Birthday".to_string(),
        }
    }

    #[test]
    fn test_upsert_sets_date_key() {
        let mut map = BookingDetailMap::new();
        let previous = map.upsert("2024-5-4", detail("Ana")).unwrap();
        assert!(previous.is_none());
        assert_eq!(map.get("2024-5-4").unwrap().date_key, "2024-5-4");
    }

    #[test]
    fn test_upsert_replaces() {
        let mut map = BookingDetailMap::new();
        map.upsert("2024-5-4", detail("Ana")).unwrap();
        let previous = map.upsert("2024-5-4", detail("Luis")).unwrap();
        assert_eq!(previous.unwrap().contact_person, "Ana");
        assert_eq!(map.get("2024-5-4").unwrap().contact_person, "Luis");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_upsert_rejects_blank_key() {
        let mut map = BookingDetailMap::new();
        assert_eq!(map.upsert("", detail("Ana")), Err(BookingDetailError::EmptyKey));
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut map = BookingDetailMap::new();
        map.upsert("2024-5-4", detail("Ana")).unwrap();
        assert!(map.remove("2024-5-4").is_some());
        assert!(map.remove("2024-5-4").is_none());
        assert!(!map.contains("2024-5-4"));
    }

    #[test]
    fn test_clear_address() {
        let mut map = BookingDetailMap::new();
        let mut with_address = detail("Ana");
        with_address.address = Some("Av. Brasil 500".to_string());
        map.upsert("2024-5-4", with_address).unwrap();

        assert!(map.clear_address("2024-5-4"));
        assert!(map.get("2024-5-4").unwrap().address.is_none());
        assert!(!map.clear_address("2024-5-4"));
        assert!(!map.clear_address("2024-5-5"));
    }

    #[test]
    fn test_retain() {
        let mut map = BookingDetailMap::new();
        map.upsert("2024-5-4", detail("Ana")).unwrap();
        map.upsert("2024-5-5", detail("Luis")).unwrap();
        map.retain(|key, _| key == "2024-5-5");
        assert_eq!(map.len(), 1);
        assert!(map.contains("2024-5-5"));
    }

    #[test]
    fn test_from_iter_skips_blank_keys() {
        let map: BookingDetailMap = vec![
            ("2024-5-4".to_string(), detail("Ana")),
            (String::new(), detail("Ghost")),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 1);
    }
}
